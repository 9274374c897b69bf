//! Structured logging boundary contract.

use std::fmt;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Debug.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

impl LogLevel {
    /// Upper-case level name as rendered in console output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Structured value carried by a field: string, number, boolean, or nested JSON.
pub type LogValue = serde_json::Value;

/// A single structured key/value attribute attached to a log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogField {
    /// Field key.
    pub key: Box<str>,
    /// Field value.
    pub value: LogValue,
}

impl LogField {
    /// Build a field from any key and any value convertible to JSON.
    pub fn new(key: impl Into<Box<str>>, value: impl Into<LogValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a string-valued field.
    pub fn string(key: impl Into<Box<str>>, value: impl Into<String>) -> Self {
        Self::new(key, LogValue::String(value.into()))
    }
}

impl<K, V> From<(K, V)> for LogField
where
    K: Into<Box<str>>,
    V: Into<LogValue>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// Ordered field list. Order is preserved end to end; duplicates are allowed
/// here and resolved (or kept) by the logger adapter.
pub type LogFields = Vec<LogField>;

/// Structured log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional per-call fields, appended after the logger's own fields.
    pub fields: Option<LogFields>,
    /// Optional error payload.
    pub error: Option<LogValue>,
}

impl LogEvent {
    /// Build an event with no fields and no error.
    pub fn new(level: LogLevel, message: impl Into<Box<str>>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: None,
            error: None,
        }
    }
}

/// Boundary contract for structured logging.
///
/// Implementations must be cheap to share across threads: the context logger
/// hands the same base logger to every concurrent request.
pub trait LoggerPort: Send + Sync {
    /// Emit a structured event.
    fn log(&self, event: LogEvent);

    /// Create a child logger with `fields` attached to every event, after the
    /// receiver's own fields. The receiver is left untouched.
    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort>;

    /// Convenience: debug event.
    fn debug(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            fields,
            ..LogEvent::new(LogLevel::Debug, message)
        });
    }

    /// Convenience: info event.
    fn info(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            fields,
            ..LogEvent::new(LogLevel::Info, message)
        });
    }

    /// Convenience: warn event.
    fn warn(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            fields,
            ..LogEvent::new(LogLevel::Warn, message)
        });
    }

    /// Convenience: error event.
    fn error(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            fields,
            ..LogEvent::new(LogLevel::Error, message)
        });
    }
}
