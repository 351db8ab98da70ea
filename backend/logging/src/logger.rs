//! Structured Logger
//!
//! Wraps `tracing` with env-based level control, an optional stderr console
//! layer and an optional daily-rolling NDJSON file.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How the global logger should be set up.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Fallback filter directive when `RUST_LOG` is unset (e.g. "info").
    pub level: String,
    /// Directory for `chatpane.log.YYYY-MM-DD`; no file output when `None`.
    pub dir: Option<PathBuf>,
    /// Human-readable lines on stderr. Turned off while the TUI owns the terminal.
    pub console: bool,
    /// Emit console lines as JSON instead of plain text.
    pub json: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            console: true,
            json: false,
        }
    }
}

/// Initialize the global structured logger.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the program.
pub fn init_logger(options: &LogOptions) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.level));

    let console_layer = (options.console && !options.json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(true)
    });
    let console_json_layer = (options.console && options.json).then(|| {
        fmt::layer().json().with_writer(std::io::stderr)
    });

    let appender = options.dir.as_ref().and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("chatpane.log")
            .build(dir)
            .map_err(|e| eprintln!("chatpane: file logging disabled for {}: {e}", dir.display()))
            .ok()
    });
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(console_json_layer)
        .with(file_layer)
        .try_init();

    guard
}
