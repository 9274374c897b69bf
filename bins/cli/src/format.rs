//! Output format helpers for CLI commands.

use clap::ValueEnum;
use ctxlog_shared::{ErrorEnvelope, REDACTED, is_secret_key};

/// Serialization choices for `config show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty JSON.
    #[default]
    Json,
    /// Pretty TOML.
    Toml,
}

/// Render an error envelope as `key: value` lines, redacting secret metadata.
pub fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code.to_string());
    out.push('\n');
    out.push_str("message: ");
    out.push_str(&error.message);
    out.push('\n');
    out.push_str("kind: ");
    out.push_str(&error.kind.to_string());
    out.push('\n');

    if !error.metadata.is_empty() {
        out.push_str("meta:\n");
        for (key, value) in &error.metadata {
            out.push_str("  ");
            out.push_str(key);
            out.push_str(": ");
            out.push_str(if is_secret_key(key) { REDACTED } else { value.as_str() });
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxlog_shared::ErrorCode;

    #[test]
    fn error_text_redacts_sensitive_meta_keys() {
        let error = ErrorEnvelope::expected(ErrorCode::new("config", "invalid_env_enum"), "bad env")
            .with_metadata("apiKey", "secret-value")
            .with_metadata("env_var", "CTXLOG_LOG_LEVEL");

        let text = format_error_text(&error);
        assert!(text.starts_with("status: error\ncode: config:invalid_env_enum\n"));
        assert!(text.contains("  apiKey: [REDACTED]\n"));
        assert!(text.contains("  env_var: CTXLOG_LOG_LEVEL\n"));
        assert!(!text.contains("secret-value"));
    }

    #[test]
    fn error_text_omits_empty_meta() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "nope");
        assert!(!format_error_text(&error).contains("meta:"));
    }
}
