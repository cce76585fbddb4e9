use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

const LOG_FILE_PREFIX: &str = "trainer.log";

/// Keeps the non-blocking file writer flushing. Drop it only at shutdown.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

pub fn init_tracing(config: &LogConfig) -> Option<FileLogGuard> {
    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);

    let file_sink = config
        .file_dir
        .as_deref()
        .and_then(|dir| match open_file_sink(dir) {
            Ok(sink) => Some(sink),
            Err(err) => {
                eprintln!("file logging disabled, cannot use {}: {err}", dir.display());
                None
            }
        });

    match file_sink {
        Some((file_writer, guard)) => {
            let file_layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();

            Some(FileLogGuard { _guard: guard })
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stdout_layer)
                .init();
            None
        }
    }
}

fn open_file_sink(
    dir: &Path,
) -> std::io::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
    Ok(tracing_appender::non_blocking(appender))
}
