//! # ctxlog-testkit
//!
//! Test doubles and fixtures.
//! This crate depends on `ports` and `shared`.

pub mod errors;
pub mod fixtures;
pub mod in_memory;

pub use fixtures::{fixture_path, fixtures_dir, read_fixture};
pub use in_memory::{LogRecord, NoopLogger, RecordingLogger, StaticFields, static_field};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
