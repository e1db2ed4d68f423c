//! Tracing setup. The terminal belongs to the game screen, so log lines go
//! to ~/.ballotbird/ballotbird.log instead of stdout.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::utils::persistence;

pub const LOG_FILE: &str = "ballotbird.log";

/// Used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,ballotbird=info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, appending to the log file.
pub fn setup_logging() -> anyhow::Result<()> {
    let path = persistence::save_path(LOG_FILE).context("locating log file")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
