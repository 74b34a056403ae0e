//! oidctl (oid) - CLI for ObjectIds
//!
//! Generates fresh ids, decodes existing ones, and validates untrusted input.

use anyhow::Result;
use clap::Parser;

mod commands;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
