//! # ctxlog-infra
//!
//! Composition root: turns a validated logging config into a request-scoped
//! [`ContextLogger`](ctxlog_core::ContextLogger) and installs the global
//! `tracing` subscriber.
//! This crate depends on `core`, `adapters`, `config`, `ports`, and `shared`.

/// Config loading helpers used by CLI surfaces.
pub mod config_check;
/// Environment validation helpers used by CLI surfaces.
pub mod env_check;
/// Context logger composition.
pub mod logging;
/// Global subscriber installation.
pub mod subscriber;

pub use config_check::{
    load_effective_config, load_effective_config_json, load_effective_config_toml,
};
pub use env_check::{InfraError, InfraResult, validate_env_parsing};
pub use logging::{build_context_logger, build_context_logger_with_base, enricher_for};
pub use subscriber::{build_env_filter, init_tracing};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
