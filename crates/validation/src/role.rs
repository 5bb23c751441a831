//! Admin role create/delete validation.

use crate::value::{
    expect_object, min_items_message, min_length_message, optional_string, reject_unknown_keys,
    required_message, type_message,
};
use cms_admin_config::FeatureFlags;
use cms_admin_domain::{RoleCreateInput, RoleId, RolesDeleteInput};
use cms_admin_ports::{LogFields, LoggerPort, RoleDeletionPort};
use cms_admin_shared::{ErrorEnvelope, ErrorKind, FieldPath, Issues, Validated, ValidationError};
use serde_json::Value;
use std::sync::Arc;

const ROLE_CREATE_KEYS: &[&str] = &["name", "description"];
const ROLES_DELETE_KEYS: &[&str] = &["ids"];

/// Dependencies required by the role deletion validators.
#[derive(Clone)]
pub struct RoleValidationDeps {
    /// Role service answering deletability questions.
    pub roles: Arc<dyn RoleDeletionPort>,
    /// Enabled enterprise features.
    pub features: FeatureFlags,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

/// Validate a role creation payload `{name, description?}`.
pub fn validate_role_create_input(
    data: &Value,
) -> Result<Validated<RoleCreateInput>, ValidationError> {
    let mut issues = Issues::new();
    let root = FieldPath::root();
    let Some(object) = expect_object(data, &root, &mut issues) else {
        return issues.finish(RoleCreateInput::default()).map(Validated::new);
    };
    reject_unknown_keys(object, ROLE_CREATE_KEYS, &root, &mut issues);

    let name_path = root.key("name");
    let name = match object.get("name") {
        None | Some(Value::Null) => {
            issues.push(&name_path, required_message(&name_path));
            None
        },
        Some(Value::String(name)) if name.is_empty() => {
            issues.push(&name_path, min_length_message(&name_path, 1));
            issues.push(&name_path, required_message(&name_path));
            None
        },
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => {
            issues.push(&name_path, type_message(&name_path, "string"));
            None
        },
    };
    let description = optional_string(object, "description", true, &root, &mut issues)
        .map(ToOwned::to_owned);

    issues
        .finish(RoleCreateInput {
            name: name.unwrap_or_default(),
            description,
        })
        .map(Validated::new)
}

/// Validate a single role id and check that the role may be deleted.
///
/// Collaborator failures are reported at path `id`.
pub async fn validate_role_delete_input(
    deps: &RoleValidationDeps,
    id: &Value,
) -> Result<Validated<RoleId>, ValidationError> {
    let mut issues = Issues::new();
    let id = check_role_id(id, &FieldPath::root(), &mut issues);
    let id = issues.finish(id)?;

    let Some(id) = id else {
        return Err(ValidationError::single(
            &FieldPath::root(),
            required_message(&FieldPath::root()),
        ));
    };
    run_deletion_checks(deps, std::slice::from_ref(&id), &FieldPath::root().key("id")).await?;
    Ok(Validated::new(id))
}

/// Validate a bulk deletion payload `{ids}`; the whole batch is checked in
/// one collaborator call.
///
/// Collaborator failures are reported at path `ids`.
pub async fn validate_roles_delete_input(
    deps: &RoleValidationDeps,
    data: &Value,
) -> Result<Validated<RolesDeleteInput>, ValidationError> {
    let mut issues = Issues::new();
    let root = FieldPath::root();
    let ids_path = root.key("ids");
    let mut ids = Vec::new();

    if let Some(object) = expect_object(data, &root, &mut issues) {
        reject_unknown_keys(object, ROLES_DELETE_KEYS, &root, &mut issues);
        match object.get("ids") {
            None | Some(Value::Null) => issues.push(&ids_path, required_message(&ids_path)),
            Some(Value::Array(items)) if items.is_empty() => {
                issues.push(&ids_path, min_items_message(&ids_path, 1));
            },
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(id) = check_role_id(item, &ids_path.index(index), &mut issues) {
                        ids.push(id);
                    }
                }
            },
            Some(_) => issues.push(&ids_path, type_message(&ids_path, "array")),
        }
    }

    let ids = issues.finish(ids)?;
    run_deletion_checks(deps, &ids, &ids_path).await?;
    Ok(Validated::new(RolesDeleteInput { ids }))
}

fn check_role_id(value: &Value, path: &FieldPath, issues: &mut Issues) -> Option<RoleId> {
    if value.is_null() {
        issues.push(path, required_message(path));
        return None;
    }
    let id = RoleId::from_json(value);
    if id.is_none() {
        issues.push(path, format!("{path} must be a valid ID"));
    }
    id
}

async fn run_deletion_checks(
    deps: &RoleValidationDeps,
    ids: &[RoleId],
    path: &FieldPath,
) -> Result<(), ValidationError> {
    let outcome: Result<(), ErrorEnvelope> = async {
        deps.roles.check_roles_for_deletion(ids).await?;
        if deps.features.is_enabled("sso") {
            deps.roles.sso_check_roles_for_deletion(ids).await?;
        }
        Ok(())
    }
    .await;

    outcome.map_err(|error| {
        if let Some(logger) = deps.logger.as_ref() {
            let fields = Some(log_fields_rejected(ids, &error));
            if error.kind == ErrorKind::Expected {
                logger.warn("admin.role.delete.rejected", "Role deletion rejected", fields);
            } else {
                logger.error(
                    "admin.role.delete.checkFailed",
                    "Role deletion check failed",
                    fields,
                );
            }
        }
        ValidationError::single(path, error.message)
    })
}

fn log_fields_rejected(ids: &[RoleId], error: &ErrorEnvelope) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("ids".into(), Value::from(ids.len()));
    fields.insert("code".into(), Value::from(error.code.to_string()));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_accepts_null_description() -> Result<(), ValidationError> {
        let input = validate_role_create_input(&json!({"name": "Editors", "description": null}))?;
        assert_eq!(input.name, "Editors");
        assert_eq!(input.description, None);
        Ok(())
    }

    #[test]
    fn create_returns_a_validated_input() -> Result<(), Box<dyn std::error::Error>> {
        let validated: Validated<RoleCreateInput> =
            validate_role_create_input(&json!({"name": "Editors", "description": "Team"}))?;
        assert_eq!(
            serde_json::to_value(&validated)?,
            json!({"name": "Editors", "description": "Team"})
        );
        assert_eq!(
            validated.into_inner(),
            RoleCreateInput {
                name: "Editors".to_string(),
                description: Some("Team".to_string()),
            }
        );
        Ok(())
    }

    #[test]
    fn create_reports_empty_name_twice() {
        let error = validate_role_create_input(&json!({"name": "", "description": null})).err();
        assert!(matches!(
            error,
            Some(error) if error.messages_at("name")
                == vec!["name must be at least 1 characters", "name is a required field"]
        ));
    }

    #[test]
    fn create_collects_every_violation() {
        let error = validate_role_create_input(&json!({"description": 3, "code": "x"})).err();
        assert!(matches!(
            error,
            Some(error) if error.len() == 3
                && error.has_issue_at("")
                && error.has_issue_at("name")
                && error.has_issue_at("description")
        ));
    }

    #[test]
    fn create_rejects_non_objects() {
        let error = validate_role_create_input(&json!(["Editors"])).err();
        assert!(matches!(
            error,
            Some(error) if error.messages_at("") == vec!["this must be a `object` type"]
        ));
    }

    #[test]
    fn role_ids_accept_strings_and_integers() {
        let mut issues = Issues::new();
        let root = FieldPath::root();
        assert_eq!(check_role_id(&json!(3), &root, &mut issues), Some(RoleId::Int(3)));
        assert_eq!(
            check_role_id(&json!("abc"), &root, &mut issues),
            Some(RoleId::Str("abc".to_string()))
        );
        assert!(issues.is_empty());

        assert_eq!(check_role_id(&json!(1.5), &root, &mut issues), None);
        assert_eq!(check_role_id(&json!(true), &root, &mut issues), None);
        assert_eq!(check_role_id(&Value::Null, &root, &mut issues), None);
        assert_eq!(issues.len(), 3);
    }
}
