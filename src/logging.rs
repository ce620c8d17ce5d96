//! Logging setup.
//!
//! Installs a global `tracing` subscriber writing human-readable lines to
//! stderr, so stdout stays clean for `--format json` / `csv` output.
//! `RUST_LOG` wins over the configured level when it is set.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging with `level` as the default filter.
///
/// An unparsable level falls back to `info`. Calling this twice is an error
/// from the second call on; callers may ignore it.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
