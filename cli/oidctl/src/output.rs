//! Output formatting for CLI commands.

use colored::Colorize;
use serde::Serialize;

use crate::error::CliError;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Text,
    /// JSON format.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

/// Serialize `data` as pretty JSON, falling back to `fallback`.
pub fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

/// Print a labeled field for text output.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{:<14} {}", format!("{label}:").bold(), value);
}

/// Print a validity verdict for one input.
pub fn print_verdict(input: &str, valid: bool) {
    if valid {
        println!("{} {}", "valid".green().bold(), input);
    } else {
        println!("{} {}", "invalid".red().bold(), input);
    }
}
