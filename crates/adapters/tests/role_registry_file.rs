//! Loading the in-memory role registry from disk.

use cms_admin_adapters::InMemoryRoleRegistry;
use cms_admin_ports::{RoleDeletionPort, RoleId};
use cms_admin_shared::ErrorCode;
use std::error::Error;
use std::fs;

#[tokio::test]
async fn loads_roles_from_a_json_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("roles.json");
    fs::write(
        &path,
        r#"[{"id": 1, "code": "strapi-super-admin"}, {"id": 5, "code": "translators"}]"#,
    )?;

    let registry = InMemoryRoleRegistry::from_path(&path)?;
    assert_eq!(registry.len(), 2);
    registry.check_roles_for_deletion(&[RoleId::Int(5)]).await?;
    assert!(registry.check_roles_for_deletion(&[RoleId::Int(1)]).await.is_err());
    Ok(())
}

#[test]
fn missing_file_keeps_the_path() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("absent.json");

    let error = InMemoryRoleRegistry::from_path(&path).err();
    assert!(matches!(
        error,
        Some(error) if error.code == ErrorCode::not_found() && error.metadata.contains_key("path")
    ));
    Ok(())
}
