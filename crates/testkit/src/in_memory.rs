//! In-memory logger doubles and enricher helpers.
//!
//! These implementations are intended for:
//! - Unit/integration tests of the context logger
//! - Deterministic rendering of log lines without a tracing subscriber

use ctxlog_ports::{Enrich, LogEvent, LogField, LogFields, LogLevel, LogValue, LoggerPort};
use std::sync::{Arc, Mutex};

/// A no-op logger implementation.
#[derive(Debug, Default)]
pub struct NoopLogger;

impl LoggerPort for NoopLogger {
    fn log(&self, _event: LogEvent) {}

    fn child(&self, _fields: LogFields) -> Box<dyn LoggerPort> {
        Box::new(Self)
    }
}

/// One captured log record: the logger's accumulated fields followed by the
/// per-call fields, duplicates kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity.
    pub level: LogLevel,
    /// Message.
    pub message: String,
    /// Fields in attachment order.
    pub fields: LogFields,
    /// Optional error payload.
    pub error: Option<LogValue>,
}

impl LogRecord {
    /// Render as a console line: `LEVEL\tmessage` plus `\t{fields}` when any
    /// field is attached.
    pub fn render_line(&self) -> String {
        if self.fields.is_empty() {
            format!("{}\t{}", self.level, self.message)
        } else {
            format!(
                "{}\t{}\t{}",
                self.level,
                self.message,
                render_fields(&self.fields)
            )
        }
    }
}

/// Render fields as a compact JSON object, preserving order and duplicates.
pub fn render_fields(fields: &[LogField]) -> String {
    let body: Vec<String> = fields
        .iter()
        .map(|field| format!("{}:{}", LogValue::String(field.key.to_string()), field.value))
        .collect();
    format!("{{{}}}", body.join(","))
}

/// Logger double that records every event into a shared buffer.
///
/// Children share the parent's buffer, so a test can hold the root and
/// inspect everything written through loggers derived from it.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    fields: LogFields,
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingLogger {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields attached to this logger (not including per-call fields).
    pub fn fields(&self) -> &[LogField] {
        &self.fields
    }

    /// Snapshot of every record captured so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().expect("records lock").clone()
    }

    /// Rendered console lines for every record captured so far.
    pub fn lines(&self) -> Vec<String> {
        self.records()
            .iter()
            .map(LogRecord::render_line)
            .collect()
    }

    /// Drop all captured records.
    pub fn clear(&self) {
        self.records.lock().expect("records lock").clear();
    }
}

impl LoggerPort for RecordingLogger {
    fn log(&self, event: LogEvent) {
        let mut fields = self.fields.clone();
        fields.extend(event.fields.unwrap_or_default());
        let record = LogRecord {
            level: event.level,
            message: event.message.into(),
            fields,
            error: event.error,
        };
        self.records.lock().expect("records lock").push(record);
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.fields.clone();
        merged.extend(fields);
        Box::new(Self {
            fields: merged,
            records: Arc::clone(&self.records),
        })
    }
}

/// Enricher that returns the same fields for every context.
#[derive(Debug, Clone, Default)]
pub struct StaticFields(LogFields);

impl StaticFields {
    /// Wrap a fixed field list.
    pub fn new(fields: LogFields) -> Self {
        Self(fields)
    }
}

impl<C: ?Sized> Enrich<C> for StaticFields {
    fn enrich(&self, _ctx: &C) -> LogFields {
        self.0.clone()
    }
}

/// Enricher producing a single fixed string field.
pub fn static_field(key: &str, value: &str) -> StaticFields {
    StaticFields(vec![LogField::string(key, value)])
}
