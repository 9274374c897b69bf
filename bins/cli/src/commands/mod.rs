//! CLI command handlers.

pub mod config;
pub mod emit;

pub use config::{run_config_check, run_config_schema, run_config_show};
pub use emit::{EmitInput, LevelArg, run_emit};

use crate::CliOutput;
use crate::error::ExitCode;
use crate::format::format_error_text;
use ctxlog_shared::ErrorEnvelope;

/// Report a boundary failure on stdout with the matching exit code.
pub(crate) fn error_output(error: &ErrorEnvelope) -> CliOutput {
    CliOutput {
        stdout: format_error_text(error),
        stderr: String::new(),
        exit_code: ExitCode::for_envelope(error),
    }
}
