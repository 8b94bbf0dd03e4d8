use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Prefix of the rolled log files.
    pub component: String,
    /// Directory for daily rolled log files. No file output when unset.
    pub directory: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set.
    pub filter: String,
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            component: "dynscope".to_string(),
            directory: None,
            filter: "info".to_string(),
            to_stderr: true,
        }
    }
}

/// Install the global subscriber for a host embedding the resolver.
///
/// Returns the file writer guard, which must be kept alive for buffered
/// lines to be flushed. If a subscriber is already installed this is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    // Roll daily, with the component name as the prefix
    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, &config.component);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = config.to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    Ok(guard)
}
