//! Config command handlers.

use super::error_output;
use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputFormat;
use ctxlog_config::logging_config_schema;
use ctxlog_infra::{load_effective_config_json, load_effective_config_toml};
use std::collections::BTreeMap;
use std::path::Path;

/// Print the effective config (defaults, file, env) as JSON or TOML.
pub fn run_config_show(
    env: &BTreeMap<String, String>,
    path: Option<&Path>,
    format: OutputFormat,
) -> Result<CliOutput, CliError> {
    let rendered = match format {
        OutputFormat::Json => load_effective_config_json(env, path, None),
        OutputFormat::Toml => load_effective_config_toml(env, path, None),
    };

    Ok(match rendered {
        Ok(stdout) => CliOutput {
            stdout,
            stderr: String::new(),
            exit_code: ExitCode::Ok,
        },
        Err(error) => error_output(&error),
    })
}

/// Validate the effective config without printing it.
pub fn run_config_check(
    env: &BTreeMap<String, String>,
    path: Option<&Path>,
) -> Result<CliOutput, CliError> {
    if let Err(error) = load_effective_config_json(env, path, None) {
        return Ok(error_output(&error));
    }

    let stdout = path.map_or_else(
        || "status: ok\nconfig: ok\n".to_string(),
        |path| format!("status: ok\nconfig: ok\npath: {}\n", path.to_string_lossy()),
    );
    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

/// Print the JSON Schema of the config file.
pub fn run_config_schema() -> Result<CliOutput, CliError> {
    let mut stdout = serde_json::to_string_pretty(&logging_config_schema())?;
    stdout.push('\n');
    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
