//! Emit command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use clap::ValueEnum;
use ctxlog_config::ValidatedLoggingConfig;
use ctxlog_infra::build_context_logger_with_base;
use ctxlog_ports::{LogEvent, LogField, LogFields, LogLevel, LogValue, LoggerPort};
use ctxlog_shared::{CorrelationId, RequestContext};
use opentelemetry::trace::{TraceContextExt, Tracer, TracerProvider as _};
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::sync::Arc;

/// Level accepted by `ctxlog emit --level`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LevelArg> for LogLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Debug => Self::Debug,
            LevelArg::Info => Self::Info,
            LevelArg::Warn => Self::Warn,
            LevelArg::Error => Self::Error,
        }
    }
}

/// Parsed `emit` arguments.
#[derive(Debug, Clone, Copy)]
pub struct EmitInput<'a> {
    pub message: &'a str,
    pub level: LevelArg,
    pub correlation_id: Option<&'a str>,
    pub tenant_id: Option<&'a str>,
    pub fields: &'a [String],
}

/// Resolve a logger for a fresh request context and emit one event.
pub fn run_emit(
    config: &ValidatedLoggingConfig,
    input: &EmitInput<'_>,
    base: Arc<dyn LoggerPort>,
) -> Result<CliOutput, CliError> {
    let fields = parse_fields(input.fields)?;
    let ctx = request_context(input)?;

    let logger = build_context_logger_with_base(config, base);
    let event = LogEvent {
        fields: (!fields.is_empty()).then_some(fields),
        ..LogEvent::new(input.level.into(), input.message)
    };
    logger.resolve(&ctx).log(event);

    Ok(CliOutput {
        stdout: format!(
            "status: ok\ncorrelationId: {}\n",
            ctx.correlation_id().as_str()
        ),
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn request_context(input: &EmitInput<'_>) -> Result<RequestContext, CliError> {
    let correlation_id = match input.correlation_id {
        Some(raw) => {
            CorrelationId::parse(raw).map_err(|error| CliError::InvalidInput(error.message))?
        },
        None => CorrelationId::new_request_id(),
    };

    let mut ctx = RequestContext::new(correlation_id).with_otel_context(request_span_context());
    if let Some(tenant_id) = input.tenant_id {
        ctx = ctx.with_tenant_id(tenant_id);
    }
    Ok(ctx)
}

/// Context holding a recording span for the emitted request.
///
/// The provider has no exporter; the span only supplies ids to the
/// `otelSpan` enricher and ends when the request context is dropped.
fn request_span_context() -> opentelemetry::Context {
    let provider = SdkTracerProvider::builder().build();
    let span = provider.tracer("ctxlog-cli").start("emit");
    opentelemetry::Context::current().with_span(span)
}

fn parse_fields(entries: &[String]) -> Result<LogFields, CliError> {
    entries.iter().map(|entry| parse_field(entry)).collect()
}

/// `key=value`; the value is taken as JSON when it parses, else as a string.
fn parse_field(entry: &str) -> Result<LogField, CliError> {
    let Some((key, raw)) = entry.split_once('=') else {
        return Err(CliError::InvalidInput(format!(
            "field must be key=value: {entry}"
        )));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "field key must be non-empty: {entry}"
        )));
    }

    let value = serde_json::from_str::<LogValue>(raw)
        .unwrap_or_else(|_| LogValue::String(raw.to_owned()));
    Ok(LogField::new(key, value))
}
