//! # ctxlog-ports
//!
//! Port traits for the ctxlog hexagonal architecture.
//!
//! Two contracts live here:
//! - [`LoggerPort`]: the base structured logger the context logger decorates
//! - [`Enrich`]: an enrichment function deriving log fields from a context
//!
//! This crate has no workspace dependencies; the context type is a generic
//! parameter so ports never learn its shape.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod enrich;
pub mod logger;

pub use enrich::*;
pub use logger::*;
