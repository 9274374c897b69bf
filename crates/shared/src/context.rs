//! Request-scoped context handed to enrichers.
//!
//! The context logger treats this value as opaque; only enrichers look inside.
//! It carries:
//! - a correlation id (always present)
//! - an optional tenant id
//! - the OpenTelemetry context active for the request (may hold no span)

use crate::{ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A correlation identifier used for logging/telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorrelationId(Arc<str>);

impl CorrelationId {
    /// Parse a correlation identifier from user input.
    ///
    /// The value is trimmed; empty values are rejected.
    pub fn parse(value: impl AsRef<str>) -> Result<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "correlationId must be non-empty",
            ));
        }
        Ok(Self(Arc::<str>::from(trimmed)))
    }

    /// Create a new request id, best-effort unique within this process.
    #[must_use]
    pub fn new_request_id() -> Self {
        let n = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(Arc::<str>::from(format!("req_{n}")))
    }

    /// Borrow the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Request-scoped context passed across boundaries.
#[derive(Debug, Clone)]
pub struct RequestContext {
    correlation_id: CorrelationId,
    tenant_id: Option<Arc<str>>,
    otel: opentelemetry::Context,
}

impl RequestContext {
    /// Create a context for the given correlation id, with no tenant and no span.
    #[must_use]
    pub fn new(correlation_id: CorrelationId) -> Self {
        Self {
            correlation_id,
            tenant_id: None,
            otel: opentelemetry::Context::new(),
        }
    }

    /// Convenience constructor: create a context with an auto-generated `req_*` id.
    #[must_use]
    pub fn new_request() -> Self {
        Self::new(CorrelationId::new_request_id())
    }

    /// Attach a tenant id. Blank values clear the tenant.
    #[must_use]
    pub fn with_tenant_id(mut self, tenant_id: impl AsRef<str>) -> Self {
        let trimmed = tenant_id.as_ref().trim();
        self.tenant_id = (!trimmed.is_empty()).then(|| Arc::<str>::from(trimmed));
        self
    }

    /// Attach the OpenTelemetry context active for this request.
    #[must_use]
    pub fn with_otel_context(mut self, otel: opentelemetry::Context) -> Self {
        self.otel = otel;
        self
    }

    /// Return the correlation id.
    #[must_use]
    pub const fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    /// Return the tenant id, if any.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Return the OpenTelemetry context.
    #[must_use]
    pub const fn otel_context(&self) -> &opentelemetry::Context {
        &self.otel
    }
}
