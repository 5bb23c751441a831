//! Role validators against a recording fake of the role service.

use cms_admin_config::FeatureFlags;
use cms_admin_ports::{BoxFuture, LogEvent, LogLevel, LoggerPort, RoleDeletionPort, RoleId};
use cms_admin_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use cms_admin_validation::{
    RoleValidationDeps, validate_role_delete_input, validate_roles_delete_input,
};
use serde_json::json;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Check(Vec<RoleId>),
    SsoCheck(Vec<RoleId>),
}

#[derive(Default)]
struct FakeRoles {
    protected: Vec<RoleId>,
    sso_mapped: Vec<RoleId>,
    unavailable: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeRoles {
    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl RoleDeletionPort for FakeRoles {
    fn check_roles_for_deletion<'a>(&'a self, ids: &'a [RoleId]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.record(Call::Check(ids.to_vec()));
            if self.unavailable {
                return Err(ErrorEnvelope::unexpected(
                    ErrorCode::io(),
                    "role store unavailable",
                    ErrorClass::Retriable,
                ));
            }
            if ids.iter().any(|id| self.protected.contains(id)) {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::invalid_input(),
                    "You cannot delete the super admin role",
                ));
            }
            Ok(())
        })
    }

    fn sso_check_roles_for_deletion<'a>(
        &'a self,
        ids: &'a [RoleId],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.record(Call::SsoCheck(ids.to_vec()));
            if ids.iter().any(|id| self.sso_mapped.contains(id)) {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::invalid_input(),
                    "Some roles are used as default SSO roles",
                ));
            }
            Ok(())
        })
    }
}

#[derive(Default)]
struct RecordingLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl LoggerPort for RecordingLogger {
    fn log(&self, event: LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

fn deps(roles: &Arc<FakeRoles>, features: FeatureFlags) -> RoleValidationDeps {
    RoleValidationDeps {
        roles: roles.clone(),
        features,
        logger: None,
    }
}

#[tokio::test]
async fn bulk_delete_batches_ids_in_one_call() -> std::result::Result<(), Box<dyn Error>> {
    let roles = Arc::new(FakeRoles::default());
    let input =
        validate_roles_delete_input(&deps(&roles, FeatureFlags::default()), &json!({"ids": [1, "2"]}))
            .await?;

    let expected = vec![RoleId::Int(1), RoleId::Str("2".to_string())];
    assert_eq!(input.ids, expected);
    assert_eq!(roles.calls(), vec![Call::Check(expected)]);
    Ok(())
}

#[tokio::test]
async fn protected_role_is_reported_at_ids() {
    let roles = Arc::new(FakeRoles {
        protected: vec![RoleId::Int(2)],
        ..FakeRoles::default()
    });
    let error =
        validate_roles_delete_input(&deps(&roles, FeatureFlags::default()), &json!({"ids": [1, 2]}))
            .await
            .err();

    assert!(matches!(
        error,
        Some(error) if error.messages_at("ids") == vec!["You cannot delete the super admin role"]
            && error.len() == 1
    ));
}

#[tokio::test]
async fn empty_ids_fail_before_any_collaborator_call() {
    let roles = Arc::new(FakeRoles::default());
    let error =
        validate_roles_delete_input(&deps(&roles, FeatureFlags::with_sso()), &json!({"ids": []}))
            .await
            .err();

    assert!(matches!(
        error,
        Some(error) if error.messages_at("ids") == vec!["ids field must have at least 1 items"]
    ));
    assert!(roles.calls().is_empty());
}

#[tokio::test]
async fn malformed_ids_are_all_reported() {
    let roles = Arc::new(FakeRoles::default());
    let error = validate_roles_delete_input(
        &deps(&roles, FeatureFlags::default()),
        &json!({"ids": [1, null, 2.5, {"id": 3}], "force": true}),
    )
    .await
    .err();

    assert!(matches!(
        error,
        Some(error)
            if error.messages_at("ids[1]") == vec!["ids[1] is a required field"]
                && error.messages_at("ids[2]") == vec!["ids[2] must be a valid ID"]
                && error.has_issue_at("ids[3]")
                && error.messages_at("") == vec!["this field has unspecified keys: force"]
    ));
    assert!(roles.calls().is_empty());
}

#[tokio::test]
async fn sso_check_runs_only_when_enabled() -> std::result::Result<(), Box<dyn Error>> {
    let roles = Arc::new(FakeRoles {
        sso_mapped: vec![RoleId::Int(7)],
        ..FakeRoles::default()
    });

    validate_roles_delete_input(&deps(&roles, FeatureFlags::default()), &json!({"ids": [7]}))
        .await?;
    assert_eq!(roles.calls(), vec![Call::Check(vec![RoleId::Int(7)])]);

    let error =
        validate_roles_delete_input(&deps(&roles, FeatureFlags::with_sso()), &json!({"ids": [7]}))
            .await
            .err();
    assert!(matches!(
        error,
        Some(error) if error.messages_at("ids") == vec!["Some roles are used as default SSO roles"]
    ));
    assert_eq!(
        roles.calls().last(),
        Some(&Call::SsoCheck(vec![RoleId::Int(7)]))
    );
    Ok(())
}

#[tokio::test]
async fn single_delete_reports_at_id() -> std::result::Result<(), Box<dyn Error>> {
    let roles = Arc::new(FakeRoles {
        protected: vec![RoleId::Int(1)],
        ..FakeRoles::default()
    });
    let deps = deps(&roles, FeatureFlags::with_sso());

    assert_eq!(
        validate_role_delete_input(&deps, &json!(4)).await?.into_inner(),
        RoleId::Int(4)
    );
    assert_eq!(
        roles.calls(),
        vec![
            Call::Check(vec![RoleId::Int(4)]),
            Call::SsoCheck(vec![RoleId::Int(4)])
        ]
    );

    let error = validate_role_delete_input(&deps, &json!(1)).await.err();
    assert!(matches!(
        error,
        Some(error) if error.messages_at("id") == vec!["You cannot delete the super admin role"]
    ));
    Ok(())
}

#[tokio::test]
async fn single_delete_rejects_invalid_ids_without_calls() {
    let roles = Arc::new(FakeRoles::default());
    let deps = deps(&roles, FeatureFlags::default());

    let missing = validate_role_delete_input(&deps, &json!(null)).await.err();
    assert!(matches!(
        missing,
        Some(error) if error.messages_at("") == vec!["this is a required field"]
    ));
    let invalid = validate_role_delete_input(&deps, &json!([1])).await.err();
    assert!(matches!(
        invalid,
        Some(error) if error.messages_at("") == vec!["this must be a valid ID"]
    ));
    assert!(roles.calls().is_empty());
}

#[tokio::test]
async fn negative_ids_are_not_valid_ids() {
    let roles = Arc::new(FakeRoles::default());
    let deps = deps(&roles, FeatureFlags::with_sso());

    let single = validate_role_delete_input(&deps, &json!(-5)).await.err();
    assert!(matches!(
        single,
        Some(error) if error.messages_at("") == vec!["this must be a valid ID"]
    ));
    let bulk = validate_roles_delete_input(&deps, &json!({"ids": [3, -1]})).await.err();
    assert!(matches!(
        bulk,
        Some(error) if error.messages_at("ids[1]") == vec!["ids[1] must be a valid ID"]
            && error.len() == 1
    ));
    assert!(roles.calls().is_empty());
}

#[tokio::test]
async fn collaborator_faults_become_field_errors_and_are_logged() {
    let roles = Arc::new(FakeRoles {
        unavailable: true,
        ..FakeRoles::default()
    });
    let logger = Arc::new(RecordingLogger::default());
    let deps = RoleValidationDeps {
        roles: roles.clone(),
        features: FeatureFlags::with_sso(),
        logger: Some(logger.clone() as Arc<dyn LoggerPort>),
    };

    let error = validate_roles_delete_input(&deps, &json!({"ids": [1]})).await.err();
    assert!(matches!(
        error,
        Some(error) if error.messages_at("ids") == vec!["role store unavailable"]
    ));
    assert_eq!(roles.calls(), vec![Call::Check(vec![RoleId::Int(1)])]);

    let events = logger.events.lock().map(|events| events.clone()).unwrap_or_default();
    assert!(matches!(
        events.as_slice(),
        [event] if &*event.event == "admin.role.delete.checkFailed" && event.level == LogLevel::Error
    ));
}
