//! Group management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for group commands
#[derive(Debug, Args)]
pub struct GroupArgs {
    /// Group subcommand
    #[command(subcommand)]
    pub command: GroupCommand,
}

/// Group subcommands
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Create a group
    Create {
        /// Group name
        name: String,
    },
    /// List all groups
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct GroupRow {
    id: i64,
    name: String,
}

/// Execute group commands
pub async fn execute(
    args: &GroupArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let users = super::user_service(config).await?;

    match &args.command {
        GroupCommand::Create { name } => {
            let group = users.create_group(name).await?;
            output::print_success(&format!("Group '{}' created with id {}", group.name, group.id));
        }
        GroupCommand::List => {
            let rows: Vec<GroupRow> = users
                .list_groups()
                .await?
                .into_iter()
                .map(|g| GroupRow {
                    id: g.id,
                    name: g.name,
                })
                .collect();
            output::print_list(&rows, format)?;
        }
    }

    Ok(())
}
