//! Config command handlers.

use crate::error::{CliError, ExitCode};
use crate::{CliOutput, load_config};
use cms_admin_config::to_pretty_json;
use std::path::Path;

/// Run `config show`. The config is printed as JSON in every output mode.
pub fn run_config_show(config_path: Option<&Path>) -> Result<CliOutput, CliError> {
    let config = load_config(config_path)?;
    Ok(CliOutput {
        stdout: to_pretty_json(&config)?,
        exit_code: ExitCode::Ok,
    })
}
