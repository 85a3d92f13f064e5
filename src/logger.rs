//! Custom logging module.
//!
//! This module provides a logger implementation that formats log entries and
//! forwards them to a sink callback, e.g. stderr for the command line or a
//! log panel in an editor front end.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

type Sink = Box<dyn Fn(String) + Send + Sync>;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that filters by level and hands formatted lines to a sink
///
pub struct SessionLogger {
    level: LevelFilter,
    sink: Arc<Mutex<Option<Sink>>>,
}

impl SessionLogger {
    pub fn new(level: LevelFilter) -> Self {
        SessionLogger {
            level,
            sink: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_sink(&self, sink: Sink) {
        if let Ok(mut guard) = self.sink.lock() {
            *guard = Some(sink);
        }
    }

    /// Install this logger as the global `log` backend.
    ///
    pub fn install(self) -> Result<(), AppError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for SessionLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(sink) = self.sink.lock() {
                if let Some(ref cb) = *sink {
                    cb(format_log(record));
                }
            }
        }
    }

    fn flush(&self) {}
}

/// Install a [`SessionLogger`] writing to stderr.
///
pub fn init_stderr(level: LevelFilter) -> Result<(), AppError> {
    let logger = SessionLogger::new(level);
    logger.set_sink(Box::new(|line| eprintln!("{}", line)));
    logger.install()
}
