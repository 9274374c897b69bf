//! Context logger composition from a validated logging config.

use ctxlog_adapters::{CorrelationIdEnricher, SpanAndTraceIds, TenantIdEnricher, TracingLogger};
use ctxlog_config::{EnricherKind, ValidatedLoggingConfig};
use ctxlog_core::ContextLogger;
use ctxlog_ports::{LogField, LogFields, LoggerPort, SharedEnrich};
use ctxlog_shared::RequestContext;
use std::sync::Arc;

/// Build the request-scoped logger over a [`TracingLogger`] base.
#[must_use]
pub fn build_context_logger(config: &ValidatedLoggingConfig) -> ContextLogger<RequestContext> {
    build_context_logger_with_base(config, Arc::new(TracingLogger::new()))
}

/// Build the request-scoped logger over any base logger.
///
/// Static fields are attached once to `base`; the configured enrichers are
/// then registered in config order.
#[must_use]
pub fn build_context_logger_with_base(
    config: &ValidatedLoggingConfig,
    base: Arc<dyn LoggerPort>,
) -> ContextLogger<RequestContext> {
    let static_fields = static_fields(config);
    let base = if static_fields.is_empty() {
        base
    } else {
        Arc::from(base.child(static_fields))
    };

    let logger = ContextLogger::<RequestContext>::with_enrichers(
        base,
        config.enrichers.iter().copied().map(enricher_for),
    );
    tracing::debug!(
        target: "ctxlog::infra",
        enrichers = logger.enricher_count(),
        static_fields = config.static_fields.len(),
        "context logger built"
    );
    logger
}

/// Built-in enricher for a configured kind.
#[must_use]
pub fn enricher_for(kind: EnricherKind) -> SharedEnrich<RequestContext> {
    match kind {
        EnricherKind::CorrelationId => Arc::new(CorrelationIdEnricher),
        EnricherKind::TenantId => Arc::new(TenantIdEnricher),
        EnricherKind::OtelSpan => Arc::new(SpanAndTraceIds),
    }
}

fn static_fields(config: &ValidatedLoggingConfig) -> LogFields {
    config
        .static_fields
        .iter()
        .map(|(key, value)| LogField::new(key.as_str(), value.clone()))
        .collect()
}
