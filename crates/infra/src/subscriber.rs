//! `tracing-subscriber` installation for binaries.

use crate::InfraResult;
use ctxlog_adapters::FlattenedJsonFormat;
use ctxlog_config::{LogFormat, ValidatedLoggingConfig};
use ctxlog_shared::{ErrorCode, ErrorEnvelope};
use tracing_subscriber::EnvFilter;

/// Filter built from the configured level plus any extra directives.
pub fn build_env_filter(config: &ValidatedLoggingConfig) -> InfraResult<EnvFilter> {
    let mut directives = config.level.as_str().to_owned();
    if let Some(extra) = config.filter.as_deref() {
        directives.push(',');
        directives.push_str(extra);
    }

    EnvFilter::try_new(&directives).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("infra", "invalid_filter"),
            format!("invalid log filter: {error}"),
        )
        .with_metadata("filter", directives.clone())
    })
}

/// Install the global `fmt` subscriber writing to stderr.
///
/// The `json` format writes log fields as a structured `fields` object
/// (see [`FlattenedJsonFormat`]); `compact` and `pretty` use the stock formats.
///
/// Fails with `infra:tracing_init` when a global subscriber is already set.
pub fn init_tracing(config: &ValidatedLoggingConfig) -> InfraResult<()> {
    let filter = build_env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.event_format(FlattenedJsonFormat::new()).try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };

    installed.map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("infra", "tracing_init"),
            format!("failed to install tracing subscriber: {error}"),
        )
    })
}
