//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;
use dochub_service::user::NewUser;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Login name
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// First name
        #[arg(long, default_value = "")]
        first_name: String,
        /// Last name
        #[arg(long, default_value = "")]
        last_name: String,
        /// Grant every right
        #[arg(long)]
        superuser: bool,
    },
    /// List all users
    List,
    /// Add a user to a group
    Join {
        /// Login name
        username: String,
        /// Group name
        group: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    superuser: bool,
    active: bool,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = super::user_service(config).await?;

    match &args.command {
        UserCommand::Create {
            username,
            password,
            first_name,
            last_name,
            superuser,
        } => {
            let user = users
                .create_user(NewUser {
                    username: username.clone(),
                    password: password.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    is_superuser: *superuser,
                })
                .await?;
            output::print_success(&format!("User '{}' created with id {}", user.username, user.id));
        }
        UserCommand::List => {
            let rows: Vec<UserRow> = users
                .list_users()
                .await?
                .iter()
                .map(|u| UserRow {
                    id: u.id,
                    username: u.username.clone(),
                    name: u.display_name(),
                    superuser: u.is_superuser,
                    active: u.is_active,
                })
                .collect();
            output::print_list(&rows, format)?;
        }
        UserCommand::Join { username, group } => {
            users.join_group(username, group).await?;
            output::print_success(&format!("User '{username}' joined group '{group}'"));
        }
    }

    Ok(())
}
