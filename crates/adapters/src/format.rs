//! JSON line format that keeps log fields structured.
//!
//! [`TracingLogger`](crate::TracingLogger) hands its ordered fields to
//! `tracing` as one encoded `attributes` value. This format decodes that
//! value back into the `fields` object of the output line, one entry per log
//! field in order, and decodes `error` into a top-level JSON value. Fields of
//! events from other sources are written as plain JSON values.
//!
//! ```json
//! {"timestamp":"...","level":"INFO","target":"ctxlog","message":"hello","fields":{"correlationId":"req-1"}}
//! ```

use crate::logger::{ATTRIBUTES_FIELD, ERROR_FIELD};
use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const MESSAGE_FIELD: &str = "message";

/// Event formatter writing one flattened JSON object per line.
#[derive(Debug, Clone, Copy)]
pub struct FlattenedJsonFormat<T = SystemTime> {
    timer: T,
    with_time: bool,
}

impl FlattenedJsonFormat {
    /// Format with wall-clock timestamps.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timer: SystemTime,
            with_time: true,
        }
    }
}

impl Default for FlattenedJsonFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FlattenedJsonFormat<T> {
    /// Omit the `timestamp` key.
    #[must_use]
    pub fn without_time(self) -> Self {
        Self {
            with_time: false,
            ..self
        }
    }
}

impl<S, N, T> FormatEvent<S, N> for FlattenedJsonFormat<T>
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut line = Map::new();
        if self.with_time {
            let mut timestamp = String::new();
            self.timer.format_time(&mut Writer::new(&mut timestamp))?;
            line.insert(
                "timestamp".to_owned(),
                Value::String(timestamp.trim_end().to_owned()),
            );
        }

        let metadata = event.metadata();
        line.insert(
            "level".to_owned(),
            Value::String(metadata.level().to_string()),
        );
        line.insert(
            "target".to_owned(),
            Value::String(metadata.target().to_owned()),
        );

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            line.insert(MESSAGE_FIELD.to_owned(), message);
        }
        line.insert("fields".to_owned(), Value::Object(visitor.fields));
        if let Some(error) = visitor.error {
            line.insert(ERROR_FIELD.to_owned(), error);
        }

        let rendered = serde_json::to_string(&Value::Object(line)).map_err(|_| fmt::Error)?;
        writeln!(writer, "{rendered}")
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    message: Option<Value>,
    fields: Map<String, Value>,
    error: Option<Value>,
}

impl EventVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == MESSAGE_FIELD {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_owned(), value);
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            ATTRIBUTES_FIELD => match serde_json::from_str(value) {
                Ok(Value::Object(attributes)) => self.fields.extend(attributes),
                _ => self.insert(field, Value::String(value.to_owned())),
            },
            ERROR_FIELD => {
                self.error = Some(
                    serde_json::from_str(value)
                        .unwrap_or_else(|_| Value::String(value.to_owned())),
                );
            },
            _ => self.insert(field, Value::String(value.to_owned())),
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Number::from_f64(value).map_or(Value::Null, Value::Number));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct Capture {
        bytes: Arc<Mutex<Vec<u8>>>,
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_raw<F: FnOnce()>(format: FlattenedJsonFormat, body: F) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(format)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, body);
        let bytes = capture.bytes.lock().expect("capture lock");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn single_line(raw: &str) -> Value {
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 1, "{raw}");
        serde_json::from_str(lines[0]).expect("json line")
    }

    #[test]
    fn attributes_are_flattened_in_order() {
        let raw = capture_raw(FlattenedJsonFormat::new().without_time(), || {
            tracing::info!(
                target: "ctxlog",
                attributes = r#"{"b":1,"a":{"nested":true}}"#,
                "hello"
            );
        });

        assert_eq!(
            raw,
            "{\"level\":\"INFO\",\"target\":\"ctxlog\",\"message\":\"hello\",\
             \"fields\":{\"b\":1,\"a\":{\"nested\":true}}}\n"
        );
    }

    #[test]
    fn error_is_decoded_to_top_level() {
        let line = single_line(&capture_raw(FlattenedJsonFormat::new().without_time(), || {
            tracing::error!(error = r#"{"code":"E1"}"#, "failed");
        }));

        assert_eq!(line["error"], json!({ "code": "E1" }));
        assert_eq!(line["fields"], json!({}));
    }

    #[test]
    fn plain_event_fields_keep_their_types() {
        let line = single_line(&capture_raw(FlattenedJsonFormat::new().without_time(), || {
            tracing::debug!(enrichers = 3_u64, ready = true, source = "otel", "registered");
        }));

        assert_eq!(line["level"], json!("DEBUG"));
        assert_eq!(line["message"], json!("registered"));
        assert_eq!(
            line["fields"],
            json!({ "enrichers": 3, "ready": true, "source": "otel" })
        );
    }

    #[test]
    fn undecodable_attributes_are_kept_as_text() {
        let line = single_line(&capture_raw(FlattenedJsonFormat::new().without_time(), || {
            tracing::info!(attributes = "not json", "odd");
        }));

        assert_eq!(line.pointer("/fields/attributes"), Some(&json!("not json")));
    }

    #[test]
    fn timestamp_is_written_by_default() {
        let line = single_line(&capture_raw(FlattenedJsonFormat::default(), || {
            tracing::info!("tick");
        }));

        assert!(line["timestamp"].as_str().is_some_and(|value| !value.is_empty()));
    }
}
