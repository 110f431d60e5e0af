//! # Logger Service
//!
//! This crate is the host's backend for the `log` facade.
//!
//! ## Philosophy
//!
//! Libraries only ever talk to `log`. The host installs exactly one backend,
//! which tags each line with the process it came from, since several
//! processes of the same application usually share a terminal or a file.
//!
//! Line format:
//!
//! ```text
//! 2026-01-02T03:04:05Z INFO [:worker] services_dispatcher::dispatcher: ...
//! ```

pub mod capture;

pub use capture::{CapturedRecord, LogCapture};

use core_types::ProcessName;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Environment variable overriding the configured level
pub const LOG_LEVEL_ENV: &str = "APPHOST_LOG";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoggerError {
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    #[error("A logger is already installed")]
    AlreadyInstalled,
}

/// Parses a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`)
pub fn parse_level(name: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(name.trim()).map_err(|_| LoggerError::InvalidLevel(name.to_string()))
}

/// Resolves the effective level, letting `APPHOST_LOG` win over `configured`
pub fn effective_level(configured: &str) -> Result<LevelFilter, LoggerError> {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(name) if !name.trim().is_empty() => parse_level(&name),
        _ => parse_level(configured),
    }
}

/// Formats one log line
pub fn format_line(
    at: OffsetDateTime,
    level: Level,
    process: &ProcessName,
    target: &str,
    message: &str,
) -> String {
    let timestamp = at
        .format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    format!("{} {} [{}] {}: {}", timestamp, level, process, target, message)
}

/// `log` backend writing process-tagged lines to stderr
pub struct HostLogger {
    process: ProcessName,
    level: LevelFilter,
    stderr: bool,
    capture: Option<LogCapture>,
}

impl HostLogger {
    pub fn new(process: impl Into<ProcessName>, level: LevelFilter) -> Self {
        Self {
            process: process.into(),
            level,
            stderr: true,
            capture: None,
        }
    }

    /// Also records every emitted line into `capture`
    pub fn with_capture(mut self, capture: LogCapture) -> Self {
        self.capture = Some(capture);
        self
    }

    /// Stops writing to stderr
    pub fn quiet(mut self) -> Self {
        self.stderr = false;
        self
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Installs this logger as the global `log` backend
    pub fn install(self) -> Result<(), LoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map_err(|_| LoggerError::AlreadyInstalled)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        if self.stderr {
            let line = format_line(
                OffsetDateTime::now_utc(),
                record.level(),
                &self.process,
                record.target(),
                &message,
            );
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }
        if let Some(capture) = &self.capture {
            capture.push(CapturedRecord {
                level: record.level(),
                target: record.target().to_string(),
                message,
            });
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Installs a stderr logger for `process` at `level`
pub fn init(level: LevelFilter, process: impl Into<ProcessName>) -> Result<(), LoggerError> {
    HostLogger::new(process, level).install()
}
