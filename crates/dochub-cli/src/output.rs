//! Rendering of command results.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use dochub_core::error::AppError;

/// How listings are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Render `rows` on stdout.
pub fn print_list<T>(rows: &[T], format: OutputFormat) -> Result<(), AppError>
where
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Table if rows.is_empty() => println!("(none)"),
        OutputFormat::Table => println!("{}", Table::new(rows).with(Style::psql())),
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("ok: {msg}");
}

/// Report a failed command on stderr with its error code.
pub fn print_error(err: &AppError) {
    eprintln!("error [{}]: {err}", err.kind.code());
}
