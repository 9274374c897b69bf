use ctxlog_ports::{Enrich, LogFields, LoggerPort, SharedEnrich};
use std::fmt;
use std::sync::Arc;

/// Base logger decorated with an ordered list of enrichers.
///
/// Registration takes `&mut self`, so it can never overlap a [`resolve`]
/// on the same instance. Build the logger at startup, then share it
/// (for example behind an `Arc`) across request handlers. For registration
/// after the logger is shared, use [`SharedContextLogger`].
///
/// [`resolve`]: ContextLogger::resolve
/// [`SharedContextLogger`]: crate::SharedContextLogger
pub struct ContextLogger<C: ?Sized> {
    base: Arc<dyn LoggerPort>,
    enrichers: Vec<SharedEnrich<C>>,
}

impl<C: ?Sized> ContextLogger<C> {
    /// Wrap `base` with no enrichers.
    #[must_use]
    pub fn new(base: Arc<dyn LoggerPort>) -> Self {
        Self {
            base,
            enrichers: Vec::new(),
        }
    }

    /// Wrap `base` with an initial ordered set of enrichers.
    #[must_use]
    pub fn with_enrichers<I>(base: Arc<dyn LoggerPort>, enrichers: I) -> Self
    where
        I: IntoIterator<Item = SharedEnrich<C>>,
    {
        Self {
            base,
            enrichers: enrichers.into_iter().collect(),
        }
    }

    /// The undecorated base logger, for logging outside any request.
    #[must_use]
    pub const fn base_logger(&self) -> &Arc<dyn LoggerPort> {
        &self.base
    }

    /// Append an enricher; its fields follow those of every earlier one.
    pub fn register<E>(&mut self, enricher: E)
    where
        E: Enrich<C> + 'static,
    {
        self.register_shared(Arc::new(enricher));
    }

    /// Append an already shared enricher.
    pub fn register_shared(&mut self, enricher: SharedEnrich<C>) {
        self.enrichers.push(enricher);
        tracing::debug!(
            target: "ctxlog::core",
            enrichers = self.enrichers.len(),
            "enricher registered"
        );
    }

    /// Number of registered enrichers.
    #[must_use]
    pub fn enricher_count(&self) -> usize {
        self.enrichers.len()
    }

    /// Registered enrichers, in registration order.
    #[must_use]
    pub fn enrichers(&self) -> &[SharedEnrich<C>] {
        &self.enrichers
    }

    /// Concatenate the output of every enricher for `ctx`, in registration order.
    #[must_use]
    pub fn fields_for(&self, ctx: &C) -> LogFields {
        collect_fields(&self.enrichers, ctx)
    }

    /// Resolve a logger for `ctx`.
    ///
    /// With no enrichers the base logger itself is returned. Otherwise the
    /// result is a child of the base carrying [`fields_for`]`(ctx)`; the base
    /// is left untouched. When every enricher comes back empty the base is
    /// returned as well, since a child without fields logs identically.
    ///
    /// [`fields_for`]: ContextLogger::fields_for
    #[must_use]
    pub fn resolve(&self, ctx: &C) -> Arc<dyn LoggerPort> {
        resolve_with(&self.base, &self.enrichers, ctx)
    }
}

pub(crate) fn collect_fields<C: ?Sized>(enrichers: &[SharedEnrich<C>], ctx: &C) -> LogFields {
    enrichers
        .iter()
        .flat_map(|enricher| enricher.enrich(ctx))
        .collect()
}

pub(crate) fn resolve_with<C: ?Sized>(
    base: &Arc<dyn LoggerPort>,
    enrichers: &[SharedEnrich<C>],
    ctx: &C,
) -> Arc<dyn LoggerPort> {
    if enrichers.is_empty() {
        return Arc::clone(base);
    }

    let fields = collect_fields(enrichers, ctx);
    if fields.is_empty() {
        return Arc::clone(base);
    }

    Arc::from(base.child(fields))
}

impl<C: ?Sized> Clone for ContextLogger<C> {
    fn clone(&self) -> Self {
        Self {
            base: Arc::clone(&self.base),
            enrichers: self.enrichers.clone(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for ContextLogger<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ContextLogger")
            .field("enrichers", &self.enrichers.len())
            .finish_non_exhaustive()
    }
}
