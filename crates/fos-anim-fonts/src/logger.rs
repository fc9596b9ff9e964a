//! Embedder diagnostics
//!
//! Resolution never aborts on bad input; it reports through a [`Logger`]
//! instead. The default forwards to `tracing`.

use std::cell::RefCell;

use serde_json::Value;

/// Severity of a diagnostic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// Diagnostics sink supplied by the embedder
pub trait Logger {
    /// Record one entry. `context` is the offending document node, if any.
    fn log(&self, level: LogLevel, context: Option<&Value>, message: &str);
}

/// Logger forwarding to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, context: Option<&Value>, message: &str) {
        match (level, context) {
            (LogLevel::Info, None) => tracing::info!("{}", message),
            (LogLevel::Info, Some(json)) => tracing::info!(context = %json, "{}", message),
            (LogLevel::Warning, None) => tracing::warn!("{}", message),
            (LogLevel::Warning, Some(json)) => tracing::warn!(context = %json, "{}", message),
            (LogLevel::Error, None) => tracing::error!("{}", message),
            (LogLevel::Error, Some(json)) => tracing::error!(context = %json, "{}", message),
        }
    }
}

/// A buffered log entry
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub context: Option<Value>,
}

/// Logger that keeps every entry in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: RefCell<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Number of entries at `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.entries.borrow().iter().filter(|e| e.level == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, context: Option<&Value>, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            level,
            message: message.to_string(),
            context: context.cloned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_logger_counts() {
        let logger = MemoryLogger::new();
        logger.log(LogLevel::Warning, None, "first");
        logger.log(LogLevel::Error, Some(&json!({ "fName": "" })), "second");
        logger.log(LogLevel::Warning, None, "third");

        assert_eq!(logger.count(LogLevel::Warning), 2);
        assert_eq!(logger.count(LogLevel::Error), 1);
        assert_eq!(logger.entries()[1].context, Some(json!({ "fName": "" })));

        logger.clear();
        assert!(logger.is_empty());
    }

    #[test]
    fn test_tracing_logger_does_not_panic() {
        TracingLogger.log(LogLevel::Info, Some(&json!([1, 2])), "hello");
        TracingLogger.log(LogLevel::Error, None, "bye");
    }
}
