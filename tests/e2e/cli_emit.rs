//! `ctxlog emit` end-to-end: config + env -> subscriber -> one JSON line on stderr.

use std::io;
use std::process::{Command, Output};

const LOGGING_ENV: [&str; 5] = [
    "CTXLOG_LOG_LEVEL",
    "CTXLOG_LOG_FORMAT",
    "CTXLOG_LOG_ENRICHERS",
    "CTXLOG_LOG_FILTER",
    "RUST_LOG",
];

fn ctxlog(args: &[&str], env: &[(&str, &str)]) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ctxlog"));
    for name in LOGGING_ENV {
        command.env_remove(name);
    }
    command.args(args).envs(env.iter().copied()).output()
}

fn json_lines(bytes: &[u8]) -> io::Result<Vec<serde_json::Value>> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(io::Error::other))
        .collect()
}

#[test]
fn emit_writes_enriched_json_line() -> io::Result<()> {
    let output = ctxlog(
        &[
            "emit",
            "--message",
            "order placed",
            "--level",
            "warn",
            "--correlation-id",
            "req-77",
            "--tenant-id",
            "acme",
            "--field",
            "items=3",
        ],
        &[("CTXLOG_LOG_ENRICHERS", "correlationId,tenantId")],
    )?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "status: ok\ncorrelationId: req-77\n"
    );

    let lines = json_lines(&output.stderr)?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], serde_json::json!("WARN"));
    assert_eq!(lines[0]["target"], serde_json::json!("ctxlog"));
    assert_eq!(lines[0]["message"], serde_json::json!("order placed"));
    assert_eq!(
        lines[0].pointer("/fields/correlationId"),
        Some(&serde_json::json!("req-77"))
    );
    assert_eq!(lines[0].pointer("/fields/items"), Some(&serde_json::json!(3)));

    let rendered = serde_json::to_string(&lines[0]["fields"]).map_err(io::Error::other)?;
    assert_eq!(
        rendered,
        "{\"correlationId\":\"req-77\",\"tenantId\":\"acme\",\"items\":3}"
    );
    Ok(())
}

#[test]
fn otel_span_enricher_adds_span_and_trace_ids() -> io::Result<()> {
    let output = ctxlog(
        &["emit", "--message", "traced", "--correlation-id", "req-78"],
        &[("CTXLOG_LOG_ENRICHERS", "correlationId,otelSpan")],
    )?;
    assert!(output.status.success());

    let lines = json_lines(&output.stderr)?;
    assert_eq!(lines.len(), 1);
    let keys: Vec<&str> = lines[0]["fields"]
        .as_object()
        .map(|fields| fields.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(keys, vec!["correlationId", "SpanId", "TraceId"]);

    let span_id = lines[0].pointer("/fields/SpanId").and_then(serde_json::Value::as_str);
    let trace_id = lines[0].pointer("/fields/TraceId").and_then(serde_json::Value::as_str);
    assert_eq!(span_id.map(str::len), Some(16));
    assert_eq!(trace_id.map(str::len), Some(32));
    Ok(())
}

#[test]
fn level_filter_drops_lower_events() -> io::Result<()> {
    let output = ctxlog(
        &["emit", "--message", "chatty", "--level", "debug"],
        &[("CTXLOG_LOG_LEVEL", "info")],
    )?;
    assert!(output.status.success());
    assert!(json_lines(&output.stderr)?.is_empty());
    Ok(())
}

#[test]
fn invalid_env_is_reported_with_exit_code_two() -> io::Result<()> {
    let output = ctxlog(
        &["emit", "--message", "x"],
        &[("CTXLOG_LOG_ENRICHERS", "correlationId,hostname")],
    )?;
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("status: error"));
    assert!(stdout.contains("code: config:invalid_env_csv"));
    Ok(())
}

#[test]
fn malformed_field_is_invalid_input() -> io::Result<()> {
    let output = ctxlog(&["emit", "--message", "x", "--field", "novalue"], &[])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid input"));
    Ok(())
}
