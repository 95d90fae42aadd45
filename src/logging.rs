//! Subscriber setup for the binary.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::LoggingConfig;

pub const LOG_FILE_PREFIX: &str = "wallet-tool.log";

/// `RUST_LOG` if set, otherwise the configured level with noisy HTTP crates held at info.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper=info,h2=info,reqwest=info", config.level)))
}

/// Install the global subscriber: console on stderr, plus a daily rolling file
/// when `config.dir` is set. Keep the returned guard alive until exit or buffered
/// lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console = fmt::layer().with_writer(std::io::stderr).with_target(true);

    match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer().with_writer(writer).with_ansi(false);
            tracing_subscriber::registry()
                .with(env_filter(config))
                .with(console)
                .with(file)
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(env_filter(config)).with(console).try_init()?;
            Ok(None)
        }
    }
}
