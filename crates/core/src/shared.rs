use crate::context_logger::{ContextLogger, collect_fields, resolve_with};
use ctxlog_ports::{Enrich, LogFields, LoggerPort, SharedEnrich};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Context logger whose enricher list can grow while it is shared.
///
/// The list is an immutable snapshot replaced wholesale on registration.
/// Each [`resolve`] clones one snapshot under a brief read lock and runs the
/// enrichers outside it, so it sees either all or none of a concurrent
/// registration, never a partial list.
///
/// [`resolve`]: SharedContextLogger::resolve
pub struct SharedContextLogger<C: ?Sized> {
    base: Arc<dyn LoggerPort>,
    enrichers: RwLock<Arc<Vec<SharedEnrich<C>>>>,
}

impl<C: ?Sized> SharedContextLogger<C> {
    /// Wrap `base` with no enrichers.
    #[must_use]
    pub fn new(base: Arc<dyn LoggerPort>) -> Self {
        Self::with_enrichers(base, Vec::new())
    }

    /// Wrap `base` with an initial ordered set of enrichers.
    #[must_use]
    pub fn with_enrichers<I>(base: Arc<dyn LoggerPort>, enrichers: I) -> Self
    where
        I: IntoIterator<Item = SharedEnrich<C>>,
    {
        Self {
            base,
            enrichers: RwLock::new(Arc::new(enrichers.into_iter().collect())),
        }
    }

    /// The undecorated base logger.
    #[must_use]
    pub const fn base_logger(&self) -> &Arc<dyn LoggerPort> {
        &self.base
    }

    /// Append an enricher. Safe to call while other threads resolve.
    pub fn register<E>(&self, enricher: E)
    where
        E: Enrich<C> + 'static,
    {
        self.register_shared(Arc::new(enricher));
    }

    /// Append an already shared enricher.
    pub fn register_shared(&self, enricher: SharedEnrich<C>) {
        let count = {
            let mut current = self.enrichers.write();
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(enricher);
            let count = next.len();
            *current = Arc::new(next);
            count
        };
        tracing::debug!(target: "ctxlog::core", enrichers = count, "enricher registered");
    }

    /// Number of registered enrichers in the current snapshot.
    #[must_use]
    pub fn enricher_count(&self) -> usize {
        self.enrichers.read().len()
    }

    /// Concatenated fields for `ctx` from the current snapshot.
    #[must_use]
    pub fn fields_for(&self, ctx: &C) -> LogFields {
        collect_fields(&self.current(), ctx)
    }

    /// Resolve a logger for `ctx`; same rules as [`ContextLogger::resolve`].
    #[must_use]
    pub fn resolve(&self, ctx: &C) -> Arc<dyn LoggerPort> {
        resolve_with(&self.base, &self.current(), ctx)
    }

    /// Freeze the current snapshot into a plain [`ContextLogger`].
    #[must_use]
    pub fn snapshot(&self) -> ContextLogger<C> {
        let enrichers = self.current();
        ContextLogger::with_enrichers(Arc::clone(&self.base), enrichers.iter().cloned())
    }

    fn current(&self) -> Arc<Vec<SharedEnrich<C>>> {
        Arc::clone(&self.enrichers.read())
    }
}

impl<C: ?Sized> From<ContextLogger<C>> for SharedContextLogger<C> {
    fn from(logger: ContextLogger<C>) -> Self {
        Self::with_enrichers(
            Arc::clone(logger.base_logger()),
            logger.enrichers().iter().cloned(),
        )
    }
}

impl<C: ?Sized> fmt::Debug for SharedContextLogger<C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SharedContextLogger")
            .field("enrichers", &self.enricher_count())
            .finish_non_exhaustive()
    }
}
