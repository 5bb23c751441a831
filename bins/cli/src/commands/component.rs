//! Component command handlers.

use crate::error::CliError;
use crate::format::OutputMode;
use crate::{
    CliOutput, cli_logger, format_ok_output, format_validation_output, load_config, read_payload,
};
use cms_admin_validation::{
    ComponentValidationDeps, validate_component_input, validate_update_component_input,
};
use std::path::Path;

/// Run `component create`.
pub fn run_component_create(
    mode: OutputMode,
    config_path: Option<&Path>,
    input: &Path,
) -> Result<CliOutput, CliError> {
    let payload = read_payload(input)?;
    let deps = component_deps(config_path)?;
    match validate_component_input(&deps, &payload) {
        Ok(request) => format_ok_output(mode, "component.create", &request),
        Err(error) => format_validation_output(mode, "component.create", &error),
    }
}

/// Run `component update`. Empty attribute defaults on persisted entries are
/// stripped before validation.
pub fn run_component_update(
    mode: OutputMode,
    config_path: Option<&Path>,
    input: &Path,
) -> Result<CliOutput, CliError> {
    let payload = read_payload(input)?;
    let deps = component_deps(config_path)?;
    match validate_update_component_input(&deps, payload) {
        Ok(request) => format_ok_output(mode, "component.update", &request),
        Err(error) => format_validation_output(mode, "component.update", &error),
    }
}

fn component_deps(config_path: Option<&Path>) -> Result<ComponentValidationDeps, CliError> {
    let config = load_config(config_path)?;
    Ok(ComponentValidationDeps::from_config(&config).with_logger(cli_logger()))
}
