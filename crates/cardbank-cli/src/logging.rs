//! Log setup
//!
//! The terminal UI owns stdout, so events go to a log file instead.

use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let path = config.file();
    let writer = Mutex::new(open_log_file(&path)?);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(writer))
                .try_init()?;
        }
        _ => {
            subscriber
                .with(
                    fmt::layer()
                        .pretty()
                        .with_ansi(false)
                        .with_target(true)
                        .with_writer(writer),
                )
                .try_init()?;
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> anyhow::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}
