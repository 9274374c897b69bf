//! # ctxlog-core
//!
//! The context logger: a decorator that holds a base [`LoggerPort`] and an
//! ordered list of [`Enrich`] functions, and resolves a logger carrying the
//! enrichment fields for a given request context.
//!
//! - [`ContextLogger`] - registration through `&mut self`; configure at
//!   startup, then share immutably for concurrent resolution
//! - [`SharedContextLogger`] - copy-on-write enricher list; registration is
//!   safe while other threads resolve
//!
//! ```
//! use ctxlog_core::ContextLogger;
//! use ctxlog_ports::{LogField, LoggerPort};
//! use ctxlog_testkit::RecordingLogger;
//! use std::sync::Arc;
//!
//! struct Request {
//!     user: String,
//! }
//!
//! let sink = RecordingLogger::new();
//! let mut logger = ContextLogger::<Request>::new(Arc::new(sink.clone()));
//! logger.register(|req: &Request| vec![LogField::string("user", req.user.as_str())]);
//!
//! let req = Request { user: "ada".into() };
//! logger.resolve(&req).info("testing", None);
//!
//! assert_eq!(sink.lines(), vec!["INFO\ttesting\t{\"user\":\"ada\"}".to_string()]);
//! ```
//!
//! [`LoggerPort`]: ctxlog_ports::LoggerPort
//! [`Enrich`]: ctxlog_ports::Enrich

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod context_logger;
mod shared;

pub use context_logger::ContextLogger;
pub use shared::SharedContextLogger;

/// Returns the core crate version.
#[must_use]
pub const fn core_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
