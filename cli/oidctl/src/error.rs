//! Error handling and display for the CLI.

use colored::Colorize;
use objectid::ObjectIdError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{invalid} of {total} inputs are not valid ObjectIds")]
    InvalidInputs { invalid: usize, total: usize },

    #[error("cannot decode {input:?}: {source}")]
    Decode {
        input: String,
        #[source]
        source: ObjectIdError,
    },

    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::Decode { source, .. } if source.is_shape_error() => {
                eprintln!(
                    "\n{}",
                    "Hint: ObjectIds are 24 hex characters (or 16 base64 characters with --base64)."
                        .yellow()
                );
            }
            CliError::UnknownFormat(_) => {
                eprintln!("\n{}", "Hint: Use --format text or --format json.".yellow());
            }
            _ => {}
        }
    }
}
