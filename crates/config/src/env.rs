//! Environment variable parsing and env-to-config merging.
//!
//! This module keeps env parsing:
//! - strict (invalid values fail fast)
//! - order preserving (the enricher CSV keeps its order)
//! - safe (secret values are redacted in error metadata)

use crate::schema::{EnricherKind, LogFormat, LogLevelConfig, LoggingConfig, ValidatedLoggingConfig};
use ctxlog_shared::{ErrorCode, ErrorEnvelope, REDACTED, is_secret_key};
use std::collections::BTreeMap;

/// Env var: minimum log level.
pub const ENV_LOG_LEVEL: &str = "CTXLOG_LOG_LEVEL";
/// Env var: output format (`json` | `compact` | `pretty`).
pub const ENV_LOG_FORMAT: &str = "CTXLOG_LOG_FORMAT";
/// Env var: enrichers as CSV, in application order.
pub const ENV_LOG_ENRICHERS: &str = "CTXLOG_LOG_ENRICHERS";
/// Env var: extra `EnvFilter` directives.
pub const ENV_LOG_FILTER: &str = "CTXLOG_LOG_FILTER";
/// Env var: extra `EnvFilter` directives (alias).
pub const ENV_LOG_FILTER_ALIAS: &str = "RUST_LOG";

const ENRICHERS_CSV_MAX: usize = 16;

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingEnv {
    /// Level override.
    pub level: Option<LogLevelConfig>,
    /// Format override.
    pub format: Option<LogFormat>,
    /// Enricher list override (replaces the configured list).
    pub enrichers: Option<Vec<EnricherKind>>,
    /// Filter override.
    pub filter: Option<Box<str>>,
}

impl LoggingEnv {
    /// Parse overrides from a name/value map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let level = parse_optional_enum(map, ENV_LOG_LEVEL, LogLevelConfig::parse)?;
        let format = parse_optional_enum(map, ENV_LOG_FORMAT, LogFormat::parse)?;
        let enrichers = parse_optional_enrichers(map, ENV_LOG_ENRICHERS)?;
        let filter =
            parse_optional_trimmed_string_any(map, &[ENV_LOG_FILTER, ENV_LOG_FILTER_ALIAS])?;

        Ok(Self {
            level,
            format,
            enrichers,
            filter,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [
            ENV_LOG_LEVEL,
            ENV_LOG_FORMAT,
            ENV_LOG_ENRICHERS,
            ENV_LOG_FILTER,
            ENV_LOG_FILTER_ALIAS,
        ] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_owned(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.format.is_none()
            && self.enrichers.is_none()
            && self.filter.is_none()
    }
}

/// Apply env overrides on top of `base`, then validate and normalize.
pub fn apply_env_overrides(
    base: LoggingConfig,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(level) = env.level {
        config.level = level;
    }
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(enrichers) = &env.enrichers {
        config.enrichers.clone_from(enrichers);
    }
    if let Some(filter) = &env.filter {
        config.filter = Some(filter.to_string());
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Env parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// CSV list exceeds a safety limit.
    #[error("{var} is too large ({len} items, max {max})")]
    CsvTooLarge {
        /// Env var name.
        var: &'static str,
        /// Number of parsed items.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// CSV contained an unknown enricher name.
    #[error("{var} contains unknown enricher: {entry}")]
    InvalidEnricherEntry {
        /// Env var name.
        var: &'static str,
        /// Invalid entry.
        entry: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::CsvTooLarge { .. } | Self::InvalidEnricherEntry { .. } => {
                ErrorCode::new("config", "invalid_env_csv")
            },
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", redact_value(var, &value)),
            EnvParseError::CsvTooLarge { var, len, max } => envelope
                .with_metadata("env_var", var)
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
            EnvParseError::InvalidEnricherEntry { var, entry } => envelope
                .with_metadata("env_var", var)
                .with_metadata("entry", redact_value(var, &entry)),
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_trimmed_string_any(
    map: &BTreeMap<String, String>,
    vars: &[&'static str],
) -> Result<Option<Box<str>>, EnvParseError> {
    for var in vars {
        if map.contains_key(*var) {
            return parse_optional_trimmed_string(map, var);
        }
    }
    Ok(None)
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };
    parse(&raw).map(Some).ok_or_else(|| EnvParseError::InvalidEnum {
        var,
        value: raw.into_string(),
    })
}

fn parse_optional_enrichers(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Vec<EnricherKind>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let entries = parse_csv(raw);
    if entries.len() > ENRICHERS_CSV_MAX {
        return Err(EnvParseError::CsvTooLarge {
            var,
            len: entries.len(),
            max: ENRICHERS_CSV_MAX,
        });
    }

    entries
        .into_iter()
        .map(|entry| {
            EnricherKind::parse(&entry).ok_or(EnvParseError::InvalidEnricherEntry { var, entry })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn redact_value(var: &str, value: &str) -> String {
    if is_secret_key(var) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[test]
    fn empty_map_sets_nothing() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_map(&BTreeMap::new())?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn parses_every_override() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_map(&env_map(&[
            (ENV_LOG_LEVEL, " DEBUG "),
            (ENV_LOG_FORMAT, "pretty"),
            (ENV_LOG_ENRICHERS, "otelSpan, correlationId,,tenantId"),
            (ENV_LOG_FILTER, "ctxlog=trace"),
        ]))?;

        assert_eq!(env.level, Some(LogLevelConfig::Debug));
        assert_eq!(env.format, Some(LogFormat::Pretty));
        assert_eq!(
            env.enrichers,
            Some(vec![
                EnricherKind::OtelSpan,
                EnricherKind::CorrelationId,
                EnricherKind::TenantId,
            ])
        );
        assert_eq!(env.filter.as_deref(), Some("ctxlog=trace"));
        Ok(())
    }

    #[test]
    fn primary_filter_var_wins_over_alias() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_map(&env_map(&[
            (ENV_LOG_FILTER_ALIAS, "warn"),
            (ENV_LOG_FILTER, "debug"),
        ]))?;
        assert_eq!(env.filter.as_deref(), Some("debug"));

        let env = LoggingEnv::from_map(&env_map(&[(ENV_LOG_FILTER_ALIAS, "warn")]))?;
        assert_eq!(env.filter.as_deref(), Some("warn"));
        Ok(())
    }

    #[test]
    fn empty_enricher_csv_clears_the_list() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv::from_map(&env_map(&[(ENV_LOG_ENRICHERS, " , ")]))?;
        assert_eq!(env.enrichers, Some(Vec::new()));

        let config = apply_env_overrides(LoggingConfig::default(), &env)?;
        assert!(config.enrichers.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_values_map_to_error_codes() {
        let error = LoggingEnv::from_map(&env_map(&[(ENV_LOG_LEVEL, "loud")]))
            .err()
            .map(ErrorEnvelope::from);
        assert_eq!(
            error.as_ref().map(|error| error.code.clone()),
            Some(ErrorCode::new("config", "invalid_env_enum"))
        );
        assert_eq!(
            error.and_then(|error| error.metadata.get("value").cloned()),
            Some("loud".to_string())
        );

        let error = LoggingEnv::from_map(&env_map(&[(ENV_LOG_FORMAT, "  ")])).err();
        assert_eq!(
            error,
            Some(EnvParseError::EmptyValue {
                var: ENV_LOG_FORMAT
            })
        );

        let error = LoggingEnv::from_map(&env_map(&[(ENV_LOG_ENRICHERS, "correlationId,userId")]))
            .err()
            .map(ErrorEnvelope::from);
        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "invalid_env_csv"))
        );
    }

    #[test]
    fn oversized_csv_is_rejected() {
        let csv = vec!["correlationId"; ENRICHERS_CSV_MAX + 1].join(",");
        let error = LoggingEnv::from_map(&env_map(&[(ENV_LOG_ENRICHERS, csv.as_str())])).err();
        assert!(matches!(error, Some(EnvParseError::CsvTooLarge { .. })));
    }

    #[test]
    fn env_wins_and_result_is_validated() -> Result<(), Box<dyn Error>> {
        let env = LoggingEnv {
            level: Some(LogLevelConfig::Error),
            enrichers: Some(vec![EnricherKind::TenantId, EnricherKind::TenantId]),
            ..LoggingEnv::default()
        };
        let error = apply_env_overrides(LoggingConfig::default(), &env).err();
        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "duplicate_enricher"))
        );

        let env = LoggingEnv {
            level: Some(LogLevelConfig::Error),
            ..LoggingEnv::default()
        };
        let config = apply_env_overrides(LoggingConfig::default(), &env)?;
        assert_eq!(config.level, LogLevelConfig::Error);
        Ok(())
    }

    #[test]
    fn secret_looking_vars_are_redacted() {
        assert_eq!(redact_value("SERVICE_TOKEN", "abc"), REDACTED);
        assert_eq!(redact_value(ENV_LOG_LEVEL, "abc"), "abc");
    }
}
