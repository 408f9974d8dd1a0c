//! Structured logging setup.
//!
//! `RUST_LOG` takes precedence; otherwise this crate and the core crate log
//! at `info`, or `debug` when verbose.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Call once, at startup.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "github_repos_bot={level},github_repos_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
