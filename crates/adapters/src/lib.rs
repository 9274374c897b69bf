//! # ctxlog-adapters
//!
//! Adapter implementations for ports:
//! - [`TracingLogger`]: a [`LoggerPort`](ctxlog_ports::LoggerPort) over the `tracing` facade
//! - [`FlattenedJsonFormat`]: a `tracing-subscriber` event format that writes log fields as JSON
//! - built-in enrichers for request identity and OpenTelemetry span ids
//!
//! This crate depends on `ports` and `shared`.

pub mod enrich;
pub mod format;
pub mod logger;

pub use enrich::{
    CorrelationIdEnricher, KEY_CORRELATION_ID, KEY_SPAN_ID, KEY_TENANT_ID, KEY_TRACE_ID,
    OtelContextCarrier, SpanAndTraceIds, TenantIdEnricher, span_and_trace_ids,
};
pub use format::FlattenedJsonFormat;
pub use logger::{ATTRIBUTES_FIELD, ERROR_FIELD, TRACING_TARGET, TracingLogger, render_attributes};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
