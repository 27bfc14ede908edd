//! Tracing subscriber set-up.
//!
//! Console output goes to stderr so `extract --format json` stays pipeable.
//! Filtering follows `RUST_LOG`. With a log directory a daily-rotated JSON file
//! is written as well; keep the returned guard alive until exit so buffered
//! lines are flushed.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of the rotated log files.
pub const LOG_FILE_PREFIX: &str = "irrigation-report.log";

pub fn init_logging(json: bool, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let console = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let (file, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(console)
        .with(file)
        .init();

    guard
}
