//! Error envelope fixtures for the codes the config and infra layers report.

use ctxlog_shared::{ErrorCode, ErrorEnvelope};

/// Codes surfaced while loading config and installing the subscriber.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::new("config", "invalid_json"),
        ErrorCode::new("config", "invalid_toml"),
        ErrorCode::new("config", "unsupported_format"),
        ErrorCode::new("config", "config_file_not_found"),
        ErrorCode::new("infra", "invalid_filter"),
        ErrorCode::new("infra", "tracing_init"),
    ]
}

/// A config document that failed to parse.
pub fn invalid_config_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("config", "invalid_json"),
        "invalid config JSON",
    )
    .with_metadata("source", "config")
}

/// A config file that does not exist.
pub fn missing_config_file_error(path: &str) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("config", "config_file_not_found"),
        "failed to read config file",
    )
    .with_metadata("path", path)
}

/// A second subscriber installation.
pub fn tracing_init_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("infra", "tracing_init"),
        "failed to install tracing subscriber",
    )
}
