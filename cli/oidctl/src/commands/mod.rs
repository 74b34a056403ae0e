//! CLI commands.

mod inspect;
mod new;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// oid - Generate, inspect, and validate ObjectIds.
#[derive(Debug, Parser)]
#[command(name = "oid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text or json).
    #[arg(long, global = true, default_value = "text")]
    format: String,

    /// Log filter (trace, debug, info, warn, error, or a directive list).
    #[arg(long, global = true, env = "OID_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate new ObjectIds.
    New(new::NewCommand),

    /// Decode an ObjectId into its fields.
    Inspect(inspect::InspectCommand),

    /// Check whether inputs are valid ObjectIds.
    Validate(validate::ValidateCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        crate::logging::init(&self.log_level)?;

        let format: OutputFormat = self.format.parse()?;
        let ctx = CommandContext { format };

        tracing::debug!(command = ?self.command, "running command");

        match self.command {
            Commands::New(cmd) => cmd.run(&ctx),
            Commands::Inspect(cmd) => cmd.run(&ctx),
            Commands::Validate(cmd) => cmd.run(&ctx),
            Commands::Version => {
                println!("oid {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_new_with_flags() {
        let cli = Cli::try_parse_from(["oid", "--format", "json", "new", "-n", "3", "--time", "1700000000"])
            .unwrap();
        assert_eq!(cli.format, "json");
        assert!(matches!(cli.command, Commands::New(_)));
    }

    #[test]
    fn test_parse_validate_requires_input() {
        assert!(Cli::try_parse_from(["oid", "validate"]).is_err());
    }
}
