//! `ctxlog config` end-to-end tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(relative: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn ctxlog(args: &[&str], config: Option<&Path>) -> io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ctxlog"));
    for name in [
        "CTXLOG_LOG_LEVEL",
        "CTXLOG_LOG_FORMAT",
        "CTXLOG_LOG_ENRICHERS",
        "CTXLOG_LOG_FILTER",
        "RUST_LOG",
    ] {
        command.env_remove(name);
    }
    command.args(args);
    if let Some(path) = config {
        command.arg("--config").arg(path);
    }
    command.output()
}

#[test]
fn show_prints_effective_config_as_json() -> io::Result<()> {
    let path = fixture_path("config/logging.valid.json");
    let output = ctxlog(&["config", "show"], Some(&path))?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value["level"], serde_json::json!("debug"));
    assert_eq!(
        value["enrichers"],
        serde_json::json!(["correlationId", "tenantId", "otelSpan"])
    );
    assert_eq!(value["filter"], serde_json::json!("ctxlog=trace"));
    Ok(())
}

#[test]
fn show_prints_toml_on_request() -> io::Result<()> {
    let output = ctxlog(&["config", "show", "--output", "toml"], None)?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("version = 1"));
    assert!(stdout.contains("level = \"info\""));
    Ok(())
}

#[test]
fn check_reports_invalid_config() -> io::Result<()> {
    let valid = ctxlog(&["config", "check"], Some(&fixture_path("config/logging.valid.toml")))?;
    assert!(valid.status.success());

    let invalid = ctxlog(
        &["config", "check"],
        Some(&fixture_path("config/logging.duplicate-enricher.toml")),
    )?;
    assert_eq!(invalid.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&invalid.stdout);
    assert!(stdout.contains("code: config:duplicate_enricher"));
    assert!(stdout.contains("enricher: tenantId"));
    Ok(())
}

#[test]
fn check_missing_file_exits_with_io_code() -> io::Result<()> {
    let output = ctxlog(
        &["config", "check"],
        Some(&fixture_path("config/not-there.toml")),
    )?;
    assert_eq!(output.status.code(), Some(3));
    Ok(())
}

#[test]
fn schema_is_valid_json() -> io::Result<()> {
    let output = ctxlog(&["config", "schema"], None)?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert!(value.get("properties").is_some());
    Ok(())
}
