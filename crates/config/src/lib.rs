//! # ctxlog-config
//!
//! Logging configuration schema, validation, env overrides, and loading.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file + overrides).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, EnricherKind, LogFormat, LogLevelConfig,
    LoggingConfig, StaticFieldMap, ValidatedLoggingConfig, logging_config_schema, parse_logging_config_json,
    parse_logging_config_toml,
};

pub use env::{
    ENV_LOG_ENRICHERS, ENV_LOG_FILTER, ENV_LOG_FILTER_ALIAS, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
    EnvParseError, LoggingEnv, apply_env_overrides,
};
pub use load::{
    load_logging_config_from_path, load_logging_config_from_sources, load_logging_config_std_env,
    to_pretty_json, to_pretty_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
