//! Logging configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Enricher order and static field order are significant and kept as written.

use ctxlog_shared::{ErrorCode, ErrorEnvelope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Static fields in document order.
pub type StaticFieldMap = Map<String, Value>;

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Minimum level passed to the subscriber filter.
    pub level: LogLevelConfig,
    /// Output format of the subscriber.
    pub format: LogFormat,
    /// Enrichers applied to every resolved logger, in order.
    pub enrichers: Vec<EnricherKind>,
    /// Fields attached once to the base logger, in the order written.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub static_fields: StaticFieldMap,
    /// Extra `EnvFilter` directives (e.g. `hyper=warn,ctxlog=debug`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            level: LogLevelConfig::default(),
            format: LogFormat::default(),
            enrichers: vec![EnricherKind::CorrelationId],
            static_fields: StaticFieldMap::new(),
            filter: None,
        }
    }
}

impl LoggingConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedLoggingConfig, ConfigSchemaError> {
        self.validate_version()?;
        self.normalize_filter()?;
        self.validate_enrichers()?;
        self.validate_static_fields()?;
        Ok(ValidatedLoggingConfig { raw: self })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }

    fn normalize_filter(&mut self) -> Result<(), ConfigSchemaError> {
        if let Some(filter) = self.filter.take() {
            let trimmed = filter.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::BlankFilter);
            }
            self.filter = Some(trimmed.to_owned());
        }
        Ok(())
    }

    fn validate_enrichers(&self) -> Result<(), ConfigSchemaError> {
        for (index, enricher) in self.enrichers.iter().enumerate() {
            if self.enrichers.iter().take(index).any(|seen| seen == enricher) {
                return Err(ConfigSchemaError::DuplicateEnricher {
                    enricher: enricher.as_str(),
                });
            }
        }
        Ok(())
    }

    fn validate_static_fields(&self) -> Result<(), ConfigSchemaError> {
        if self.static_fields.keys().any(|key| key.trim().is_empty()) {
            return Err(ConfigSchemaError::EmptyStaticFieldKey);
        }
        Ok(())
    }
}

/// Validated config wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLoggingConfig {
    raw: LoggingConfig,
}

impl ValidatedLoggingConfig {
    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggingConfig {
        self.raw
    }
}

impl AsRef<LoggingConfig> for ValidatedLoggingConfig {
    fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedLoggingConfig {
    type Target = LoggingConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Configured minimum level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevelConfig {
    /// Trace.
    Trace,
    /// Debug.
    Debug,
    /// Info.
    #[default]
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

impl LogLevelConfig {
    /// Lowercase name, usable as an `EnvFilter` directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Parse a level name (case-insensitive).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevelConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Subscriber output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Single-line human readable output.
    Compact,
    /// Multi-line human readable output.
    Pretty,
}

impl LogFormat {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        }
    }

    /// Parse a format name (case-insensitive).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Built-in enricher selectable from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum EnricherKind {
    /// `correlationId` field from the request context.
    CorrelationId,
    /// `tenantId` field, when the request has a tenant.
    TenantId,
    /// `SpanId` and `TraceId` from the active OpenTelemetry span.
    OtelSpan,
}

impl EnricherKind {
    /// Config name of the enricher.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CorrelationId => "correlationId",
            Self::TenantId => "tenantId",
            Self::OtelSpan => "otelSpan",
        }
    }

    /// Parse a config name (exact match).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "correlationId" => Some(Self::CorrelationId),
            "tenantId" => Some(Self::TenantId),
            "otelSpan" => Some(Self::OtelSpan),
            _ => None,
        }
    }
}

/// Config schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    #[error("unsupported config version: {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// An enricher is listed more than once.
    #[error("enrichers contains a duplicate entry: {enricher}")]
    DuplicateEnricher {
        /// Config name of the repeated enricher.
        enricher: &'static str,
    },
    /// A static field has an empty key.
    #[error("staticFields keys must be non-empty")]
    EmptyStaticFieldKey,
    /// The filter is set but blank.
    #[error("filter must be non-empty when set")]
    BlankFilter,
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::DuplicateEnricher { .. } => ErrorCode::new("config", "duplicate_enricher"),
            Self::EmptyStaticFieldKey => ErrorCode::new("config", "invalid_static_field"),
            Self::BlankFilter => ErrorCode::new("config", "invalid_filter"),
        }
    }
}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::DuplicateEnricher { enricher } => {
                envelope.with_metadata("enricher", enricher)
            },
            ConfigSchemaError::EmptyStaticFieldKey => envelope.with_metadata("field", "staticFields"),
            ConfigSchemaError::BlankFilter => envelope.with_metadata("field", "filter"),
        }
    }
}

/// Parse a logging config from a JSON string, applying validation and normalization.
pub fn parse_logging_config_json(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a logging config from a TOML string, applying validation and normalization.
pub fn parse_logging_config_toml(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// JSON Schema for [`LoggingConfig`].
#[must_use]
pub fn logging_config_schema() -> schemars::Schema {
    schemars::schema_for!(LoggingConfig)
}
