//! `tracing`-backed logger adapter.
//!
//! Events go to the `tracing` facade under target `ctxlog`. Fields
//! accumulated through `child` (enrichment fields first, per-call fields
//! last) travel as one ordered JSON object in the `attributes` event field,
//! since `tracing` field names are fixed per call site. Filtering and output
//! stay with the installed subscriber; [`FlattenedJsonFormat`] writes the
//! fields back out as a structured object.
//!
//! [`FlattenedJsonFormat`]: crate::FlattenedJsonFormat

use ctxlog_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use ctxlog_shared::redaction::{REDACTED, is_secret_key};
use serde_json::Value;

/// Target used for every event emitted by [`TracingLogger`].
pub const TRACING_TARGET: &str = "ctxlog";
/// Event field carrying the encoded log fields.
pub const ATTRIBUTES_FIELD: &str = "attributes";
/// Event field carrying the encoded error value.
pub const ERROR_FIELD: &str = "error";

/// Logger forwarding to the `tracing` facade.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    base_fields: LogFields,
}

impl TracingLogger {
    /// Create a logger with no attached fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Fields attached to this logger.
    #[must_use]
    pub fn base_fields(&self) -> &LogFields {
        &self.base_fields
    }
}

macro_rules! emit {
    ($level:expr, $message:expr, $attributes:expr, $error:expr) => {
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            attributes = $attributes,
            error = $error,
            "{}",
            $message
        )
    };
}

impl LoggerPort for TracingLogger {
    fn log(&self, event: LogEvent) {
        let mut fields = self.base_fields.clone();
        if let Some(extra) = event.fields {
            fields.extend(extra);
        }
        let attributes = render_attributes(&fields);

        let error = event.error.map(|mut value| {
            redact_value(&mut value);
            value.to_string()
        });

        let attributes = attributes.as_deref();
        let error = error.as_deref();
        let message = &*event.message;
        match event.level {
            LogLevel::Debug => emit!(tracing::Level::DEBUG, message, attributes, error),
            LogLevel::Info => emit!(tracing::Level::INFO, message, attributes, error),
            LogLevel::Warn => emit!(tracing::Level::WARN, message, attributes, error),
            LogLevel::Error => emit!(tracing::Level::ERROR, message, attributes, error),
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn LoggerPort> {
        let mut merged = self.base_fields.clone();
        merged.extend(fields);
        Box::new(Self {
            base_fields: merged,
        })
    }
}

/// Render fields as a JSON object string, or `None` when there are none.
///
/// Keys keep the position of their first occurrence; a repeated key takes
/// the value of its last occurrence. Secret-looking keys are redacted.
#[must_use]
pub fn render_attributes(fields: &LogFields) -> Option<String> {
    if fields.is_empty() {
        return None;
    }
    Some(fields_to_json(fields).to_string())
}

fn fields_to_json(fields: &LogFields) -> Value {
    let mut map = serde_json::Map::new();
    for field in fields {
        let mut value = field.value.clone();
        if is_secret_key(&field.key) {
            value = Value::String(REDACTED.to_string());
        } else {
            redact_value(&mut value);
        }
        map.insert(field.key.to_string(), value);
    }
    Value::Object(map)
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                if is_secret_key(key) {
                    *nested = Value::String(REDACTED.to_string());
                } else {
                    redact_value(nested);
                }
            }
        },
        Value::Array(items) => {
            for item in items {
                redact_value(item);
            }
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlattenedJsonFormat;
    use ctxlog_ports::LogField;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct Capture {
        bytes: Arc<Mutex<Vec<u8>>>,
    }

    impl Capture {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.bytes.lock().expect("capture lock");
            String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| serde_json::from_str(line).expect("json line"))
                .collect()
        }
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

    fn capture<F: FnOnce()>(body: F) -> Vec<Value> {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(FlattenedJsonFormat::new().without_time())
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, body);
        capture.lines()
    }

    #[test]
    fn plain_event_has_no_fields() {
        let lines = capture(|| TracingLogger::new().info("testing", None));

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], json!("INFO"));
        assert_eq!(lines[0]["target"], json!(TRACING_TARGET));
        assert_eq!(lines[0]["message"], json!("testing"));
        assert_eq!(lines[0]["fields"], json!({}));
    }

    #[test]
    fn child_fields_are_written_as_structured_fields() {
        let lines = capture(|| {
            let child = TracingLogger::new().child(vec![
                LogField::string("dummy", "value"),
                LogField::string("dummy2", "value2"),
            ]);
            child.warn("testing", Some(vec![LogField::new("n", 1)]));
        });

        assert_eq!(lines[0]["level"], json!("WARN"));
        assert_eq!(lines[0].pointer("/fields/dummy"), Some(&json!("value")));
        assert_eq!(lines[0].pointer("/fields/n"), Some(&json!(1)));
        let keys: Vec<&str> = lines[0]["fields"]
            .as_object()
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, vec!["dummy", "dummy2", "n"]);
    }

    #[test]
    fn levels_map_onto_tracing_levels() {
        let lines = capture(|| {
            let logger = TracingLogger::new();
            logger.debug("d", None);
            logger.info("i", None);
            logger.warn("w", None);
            logger.error("e", None);
        });

        let levels: Vec<&str> = lines
            .iter()
            .filter_map(|line| line["level"].as_str())
            .collect();
        assert_eq!(levels, vec!["DEBUG", "INFO", "WARN", "ERROR"]);
    }

    #[test]
    fn secrets_are_redacted_in_fields_and_errors() {
        let lines = capture(|| {
            TracingLogger::new()
                .with_base_fields(vec![LogField::string("apiKey", "secret")])
                .log(LogEvent {
                    fields: Some(vec![LogField::string("safe", "ok")]),
                    error: Some(json!({ // pragma: allowlist secret
                        "token": "should-hide",
                        "nested": { "password": "nope", "value": 7 } // pragma: allowlist secret
                    })),
                    ..LogEvent::new(LogLevel::Error, "failed")
                });
        });

        assert_eq!(lines[0]["fields"], json!({ "apiKey": REDACTED, "safe": "ok" }));
        assert_eq!(lines[0]["error"]["token"], json!(REDACTED));
        assert_eq!(lines[0]["error"]["nested"]["password"], json!(REDACTED));
        assert_eq!(lines[0]["error"]["nested"]["value"], json!(7));
    }

    #[test]
    fn keys_containing_secret_words_pass_through() {
        let fields = vec![
            LogField::string("author", "ada"),
            LogField::string("partitionKey", "p-7"),
            LogField::string("monkey", "george"),
            LogField::new("tokensUsed", 42),
        ];
        assert_eq!(
            render_attributes(&fields).as_deref(),
            Some(r#"{"author":"ada","partitionKey":"p-7","monkey":"george","tokensUsed":42}"#)
        );
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let fields = vec![
            LogField::string("a", "1"),
            LogField::string("b", "2"),
            LogField::string("a", "3"),
        ];
        assert_eq!(
            render_attributes(&fields).as_deref(),
            Some("{\"a\":\"3\",\"b\":\"2\"}")
        );
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let parent = TracingLogger::new().with_base_fields(vec![LogField::string("p", "1")]);
        let _child = parent.child(vec![LogField::string("c", "2")]);
        assert_eq!(parent.base_fields(), &vec![LogField::string("p", "1")]);
    }

    #[test]
    fn empty_fields_render_nothing() {
        assert_eq!(render_attributes(&LogFields::new()), None);
    }
}
