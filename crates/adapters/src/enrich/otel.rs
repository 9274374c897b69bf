//! OpenTelemetry span and trace id enricher.
//!
//! Only a span that is currently recording contributes fields; each id is
//! added only when it is valid (not all zero). Ids are lowercase hex.

use ctxlog_ports::{Enrich, LogField, LogFields};
use ctxlog_shared::RequestContext;
use opentelemetry::Context;
use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceId};

/// Field key for the span id.
pub const KEY_SPAN_ID: &str = "SpanId";
/// Field key for the trace id.
pub const KEY_TRACE_ID: &str = "TraceId";

/// Access to the OpenTelemetry context carried by a request context.
pub trait OtelContextCarrier {
    /// The OpenTelemetry context active for this request.
    fn otel_context(&self) -> &Context;
}

impl OtelContextCarrier for Context {
    fn otel_context(&self) -> &Context {
        self
    }
}

impl OtelContextCarrier for RequestContext {
    fn otel_context(&self) -> &Context {
        Self::otel_context(self)
    }
}

/// Adds `SpanId` then `TraceId` from the active span.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanAndTraceIds;

impl<C> Enrich<C> for SpanAndTraceIds
where
    C: OtelContextCarrier + ?Sized,
{
    fn enrich(&self, ctx: &C) -> LogFields {
        span_and_trace_ids(ctx.otel_context())
    }
}

/// Fields for the span active in `cx`; empty unless the span is recording.
#[must_use]
pub fn span_and_trace_ids(cx: &Context) -> LogFields {
    let span = cx.span();
    if !span.is_recording() {
        return LogFields::new();
    }
    valid_ids(span.span_context())
}

fn valid_ids(span_context: &SpanContext) -> LogFields {
    let mut fields = LogFields::with_capacity(2);
    if span_context.span_id() != SpanId::INVALID {
        fields.push(LogField::string(
            KEY_SPAN_ID,
            span_context.span_id().to_string(),
        ));
    }
    if span_context.trace_id() != TraceId::INVALID {
        fields.push(LogField::string(
            KEY_TRACE_ID,
            span_context.trace_id().to_string(),
        ));
    }
    fields
}
