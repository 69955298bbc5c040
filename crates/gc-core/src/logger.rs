//! Job log side-channel
//!
//! Every device failure is reported as a `(device or none, message)` pair.
//! The core never writes to the console; where the entries end up is the
//! logger's business.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Success,
    Warning,
    Failure,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Debug => "debug",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Failure => "failure",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub device: Option<String>,
    pub message: String,
}

/// Receives job log entries.
pub trait JobLogger: Send + Sync {
    fn log(&self, level: LogLevel, device: Option<&str>, message: &str);

    fn log_debug(&self, message: &str) {
        self.log(LogLevel::Debug, None, message);
    }

    fn log_success(&self, device: Option<&str>, message: &str) {
        self.log(LogLevel::Success, device, message);
    }

    fn log_warning(&self, device: Option<&str>, message: &str) {
        self.log(LogLevel::Warning, device, message);
    }

    fn log_failure(&self, device: Option<&str>, message: &str) {
        self.log(LogLevel::Failure, device, message);
    }
}

/// Forwards entries to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingJobLogger;

impl JobLogger for TracingJobLogger {
    fn log(&self, level: LogLevel, device: Option<&str>, message: &str) {
        let device = device.unwrap_or("-");
        match level {
            LogLevel::Debug => tracing::debug!(device, "{message}"),
            LogLevel::Success => tracing::info!(device, "{message}"),
            LogLevel::Warning => tracing::warn!(device, "{message}"),
            LogLevel::Failure => tracing::error!(device, "{message}"),
        }
    }
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryJobLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryJobLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn failures(&self) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.level == LogLevel::Failure)
            .collect()
    }
}

impl JobLogger for MemoryJobLogger {
    fn log(&self, level: LogLevel, device: Option<&str>, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                device: device.map(String::from),
                message: message.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_captures_failures() {
        let logger = MemoryJobLogger::new();
        logger.log_debug("starting");
        logger.log_failure(Some("r1"), "boom");
        logger.log_failure(None, "settings");

        assert_eq!(logger.entries().len(), 3);
        let failures = logger.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].device.as_deref(), Some("r1"));
        assert_eq!(failures[1].device, None);
    }
}
