//! Role command handlers.

use crate::error::CliError;
use crate::format::OutputMode;
use crate::{
    CliOutput, block_on, cli_logger, format_ok_output, format_validation_output, load_config,
    read_payload,
};
use cms_admin_adapters::InMemoryRoleRegistry;
use cms_admin_validation::{
    RoleValidationDeps, validate_role_create_input, validate_role_delete_input,
    validate_roles_delete_input,
};
use std::path::Path;
use std::sync::Arc;

/// Run `role create`.
pub fn run_role_create(mode: OutputMode, input: &Path) -> Result<CliOutput, CliError> {
    let payload = read_payload(input)?;
    match validate_role_create_input(&payload) {
        Ok(role) => format_ok_output(mode, "role.create", &role),
        Err(error) => format_validation_output(mode, "role.create", &error),
    }
}

/// Run `role delete`.
pub fn run_role_delete(
    mode: OutputMode,
    config_path: Option<&Path>,
    input: &Path,
    roles_path: &Path,
) -> Result<CliOutput, CliError> {
    let payload = read_payload(input)?;
    let deps = role_deps(config_path, roles_path)?;
    match block_on(validate_role_delete_input(&deps, &payload))? {
        Ok(id) => format_ok_output(mode, "role.delete", &id),
        Err(error) => format_validation_output(mode, "role.delete", &error),
    }
}

/// Run `role delete-many`.
pub fn run_roles_delete(
    mode: OutputMode,
    config_path: Option<&Path>,
    input: &Path,
    roles_path: &Path,
) -> Result<CliOutput, CliError> {
    let payload = read_payload(input)?;
    let deps = role_deps(config_path, roles_path)?;
    match block_on(validate_roles_delete_input(&deps, &payload))? {
        Ok(request) => format_ok_output(mode, "role.deleteMany", &request),
        Err(error) => format_validation_output(mode, "role.deleteMany", &error),
    }
}

fn role_deps(
    config_path: Option<&Path>,
    roles_path: &Path,
) -> Result<RoleValidationDeps, CliError> {
    let config = load_config(config_path)?;
    let registry = InMemoryRoleRegistry::from_path(roles_path)?;
    tracing::debug!(roles = registry.len(), sso = config.features.sso, "role registry loaded");

    Ok(RoleValidationDeps {
        roles: Arc::new(registry),
        features: config.features,
        logger: Some(cli_logger()),
    })
}
