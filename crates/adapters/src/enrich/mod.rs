//! Built-in enrichers for [`RequestContext`](ctxlog_shared::RequestContext)
//! and OpenTelemetry contexts.

pub mod correlation;
pub mod otel;

pub use correlation::{CorrelationIdEnricher, KEY_CORRELATION_ID, KEY_TENANT_ID, TenantIdEnricher};
pub use otel::{KEY_SPAN_ID, KEY_TRACE_ID, OtelContextCarrier, SpanAndTraceIds, span_and_trace_ids};
