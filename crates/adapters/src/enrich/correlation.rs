//! Request identity enrichers.

use ctxlog_ports::{Enrich, LogField, LogFields};
use ctxlog_shared::RequestContext;

/// Field key for the request correlation id.
pub const KEY_CORRELATION_ID: &str = "correlationId";
/// Field key for the tenant id.
pub const KEY_TENANT_ID: &str = "tenantId";

/// Adds the request correlation id. Always produces exactly one field.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationIdEnricher;

impl Enrich<RequestContext> for CorrelationIdEnricher {
    fn enrich(&self, ctx: &RequestContext) -> LogFields {
        vec![LogField::string(
            KEY_CORRELATION_ID,
            ctx.correlation_id().as_str(),
        )]
    }
}

/// Adds the tenant id when the request carries one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenantIdEnricher;

impl Enrich<RequestContext> for TenantIdEnricher {
    fn enrich(&self, ctx: &RequestContext) -> LogFields {
        ctx.tenant_id()
            .map(|tenant| LogField::string(KEY_TENANT_ID, tenant))
            .into_iter()
            .collect()
    }
}
