//! Output formatting utilities

use crate::error::CliResult;
use colored::*;
use serde::Serialize;
use srat_types::RequestStatus;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print records as a table of rows, or the records themselves as JSON/YAML
pub fn print_output<T, R, F>(records: &[T], to_row: F, format: OutputFormat) -> CliResult<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    match format {
        OutputFormat::Table => {
            if records.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                println!("{}", Table::new(records.iter().map(to_row)));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(records)?),
    }
    Ok(())
}

/// Print a single record. Table format falls back to JSON.
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?)
        }
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(data)?),
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Status label coloured by how far along the chain it is
pub fn status_label(status: RequestStatus) -> String {
    let label = status.label();
    match status {
        RequestStatus::Paid => label.green().to_string(),
        RequestStatus::Rejected => label.red().to_string(),
        RequestStatus::ApprovedForFinance => label.cyan().to_string(),
        _ => label.yellow().to_string(),
    }
}

pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn timestamp(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
