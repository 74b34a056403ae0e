//! Logging initialization for the CLI.
//!
//! Logs go to stderr so stdout stays clean for ids and JSON.

use std::io;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Default filter when neither `--log-level` nor `OID_LOG` parses.
const DEFAULT_FILTER: &str = "warn";

/// Builds the filter for `level`, falling back to [`DEFAULT_FILTER`].
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize compact stderr logging.
pub fn init(level: &str) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_filter(build_filter(level));

    tracing_subscriber::registry().with(stderr_layer).try_init()?;

    Ok(())
}
