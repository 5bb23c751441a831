//! Schema command handler.

use crate::error::{CliError, ExitCode};
use crate::{CliOutput, SchemaKind};
use cms_admin_domain::{
    component_request_schema, role_create_input_schema, roles_delete_input_schema,
};

/// Run `schema <kind>`.
pub fn run_schema(kind: SchemaKind) -> Result<CliOutput, CliError> {
    let schema = match kind {
        SchemaKind::RoleCreate => role_create_input_schema(),
        SchemaKind::RolesDelete => roles_delete_input_schema(),
        SchemaKind::Component => component_request_schema(),
    };
    let mut stdout = serde_json::to_string_pretty(&schema)?;
    stdout.push('\n');

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}
