//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{
    EmitInput, LevelArg, error_output, run_config_check, run_config_schema, run_config_show,
    run_emit,
};
use ctxlog_adapters::TracingLogger;
use ctxlog_infra::{init_tracing, load_effective_config};
use error::{CliError, ExitCode};
use format::OutputFormat;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ENV_PREFIX: &str = "CTXLOG_";
const ENV_FILTER_ALIAS: &str = "RUST_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "ctxlog",
    version,
    about = "Context-enriched structured logging",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emit one log line through a logger resolved for a fresh request.
    Emit {
        /// Log message.
        #[arg(long)]
        message: String,
        /// Log level.
        #[arg(long, value_enum, default_value_t = LevelArg::Info)]
        level: LevelArg,
        /// Correlation id for the request (generated when omitted).
        #[arg(long)]
        correlation_id: Option<String>,
        /// Tenant id for the request.
        #[arg(long)]
        tenant_id: Option<String>,
        /// Per-call field as `key=value`; JSON values are kept typed. Repeatable.
        #[arg(long = "field")]
        fields: Vec<String>,
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective config.
    Show {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
    /// Validate the effective config.
    Check {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the config JSON Schema.
    Schema,
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands) -> Result<CliOutput, CliError> {
    let env = collect_logging_env();
    match command {
        Commands::Emit {
            message,
            level,
            correlation_id,
            tenant_id,
            fields,
            config,
        } => emit(
            &env,
            config.as_deref(),
            &EmitInput {
                message,
                level: *level,
                correlation_id: correlation_id.as_deref(),
                tenant_id: tenant_id.as_deref(),
                fields,
            },
        ),
        Commands::Config { command } => match command {
            ConfigCommands::Show { config, output } => {
                run_config_show(&env, config.as_deref(), *output)
            },
            ConfigCommands::Check { config } => run_config_check(&env, config.as_deref()),
            ConfigCommands::Schema => run_config_schema(),
        },
    }
}

fn emit(
    env: &BTreeMap<String, String>,
    path: Option<&Path>,
    input: &EmitInput<'_>,
) -> Result<CliOutput, CliError> {
    let config = match load_effective_config(env, path, None) {
        Ok(config) => config,
        Err(error) => return Ok(error_output(&error)),
    };
    if let Err(error) = init_tracing(&config) {
        return Ok(error_output(&error));
    }

    run_emit(&config, input, Arc::new(TracingLogger::new()))
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

fn collect_logging_env() -> BTreeMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX) || key == ENV_FILTER_ALIAS)
        .collect()
}
