//! CLI command definitions and dispatch.

pub mod group;
pub mod migrate;
pub mod serve;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use dochub_auth::PasswordHasher;
use dochub_core::config::AppConfig;
use dochub_core::error::AppError;
use dochub_database::DatabasePool;
use dochub_database::repositories::{GroupRepository, UserRepository};
use dochub_service::UserService;

use crate::output::OutputFormat;

/// DocHub: shared documents filed in permissioned folders
#[derive(Debug, Parser)]
#[command(name = "dochub", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay (`config/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log progress at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the DocHub server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// User management
    User(user::UserArgs),
    /// Group management
    Group(group::GroupArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Group(args) => group::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<SqlitePool, AppError> {
    tracing::debug!(url = %config.database.url, "Connecting to database");
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

/// Helper: user service over a migrated database
pub async fn user_service(config: &AppConfig) -> Result<UserService, AppError> {
    let pool = create_db_pool(config).await?;
    dochub_database::migration::run_migrations(&pool).await?;
    Ok(UserService::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(GroupRepository::new(pool)),
        Arc::new(PasswordHasher::default()),
    ))
}
