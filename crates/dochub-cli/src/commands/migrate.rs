//! Database migration command.

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;

use crate::output;

/// Apply every pending migration
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    println!("Running database migrations...");
    dochub_database::migration::run_migrations(&pool).await?;
    output::print_success("All migrations applied successfully.");
    Ok(())
}
