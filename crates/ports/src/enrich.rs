//! Enrichment function contract.
//!
//! An enricher reads whatever it needs from a request context and returns the
//! fields that should be attached to log records emitted for that request.
//! It may return no fields; it has no error channel.

use crate::logger::LogFields;
use std::sync::Arc;

/// Derives an ordered list of log fields from a context value.
///
/// Closures of shape `Fn(&C) -> LogFields` implement this trait directly:
///
/// ```
/// use ctxlog_ports::{Enrich, LogField, LogFields};
///
/// let enricher = |ctx: &str| -> LogFields { vec![LogField::string("user", ctx)] };
/// assert_eq!(enricher.enrich("ada"), vec![LogField::string("user", "ada")]);
/// ```
pub trait Enrich<C: ?Sized>: Send + Sync {
    /// Return the fields for `ctx`, in the order they should appear.
    fn enrich(&self, ctx: &C) -> LogFields;
}

impl<C, F> Enrich<C> for F
where
    C: ?Sized,
    F: Fn(&C) -> LogFields + Send + Sync,
{
    fn enrich(&self, ctx: &C) -> LogFields {
        self(ctx)
    }
}

/// Shared, type-erased enricher handle.
pub type SharedEnrich<C> = Arc<dyn Enrich<C>>;
