//! Logging setup
//!
//! Events go to `<base>/ibank.log` so they never interleave with the
//! terminal dialogue on stdout. `RUST_LOG` overrides the level from settings.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{paths::BankPaths, settings::Settings};
use crate::error::{BankError, BankResult};

/// Install the global subscriber
///
/// Calling this twice is harmless; the second call keeps the first
/// subscriber.
pub fn init(paths: &BankPaths, settings: &Settings) -> BankResult<()> {
    let log_file = paths.log_file();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| BankError::Io(format!("Failed to open {}: {}", log_file.display(), e)))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    Ok(())
}
