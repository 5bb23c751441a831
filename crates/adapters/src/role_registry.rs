//! In-memory role deletability checks backed by a fixed role list.

use cms_admin_ports::{BoxFuture, RoleDeletionPort, RoleId};
use cms_admin_shared::{ErrorCode, ErrorEnvelope, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Role code of the built-in super administrator.
pub const SUPER_ADMIN_CODE: &str = "strapi-super-admin";

/// One role known to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleRecord {
    /// Role id.
    pub id: RoleId,
    /// Stable role code.
    pub code: String,
    /// Non-deletable role (the super admin role is always protected).
    #[serde(default)]
    pub protected: bool,
    /// Used as the default role for SSO-provisioned users.
    #[serde(default)]
    pub sso_mapped: bool,
    /// Number of admin users holding the role.
    #[serde(default)]
    pub users_count: u64,
}

impl RoleRecord {
    fn is_protected(&self) -> bool {
        self.protected || self.code == SUPER_ADMIN_CODE
    }
}

/// `RoleDeletionPort` answering from a static list of roles.
///
/// Ids are matched by their string form, so `1` and `"1"` name the same role.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleRegistry {
    roles: BTreeMap<String, RoleRecord>,
}

impl InMemoryRoleRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(records: Vec<RoleRecord>) -> Result<Self> {
        let mut roles = BTreeMap::new();
        for record in records {
            let key = record.id.to_string();
            if roles.contains_key(&key) {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::new("roles", "duplicate_id"),
                    format!("role id {key} is listed more than once"),
                )
                .with_metadata("id", key));
            }
            roles.insert(key, record);
        }
        Ok(Self { roles })
    }

    /// Parse a JSON array of [`RoleRecord`]s.
    pub fn from_json(input: &str) -> Result<Self> {
        let records: Vec<RoleRecord> = serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("roles", "invalid_json"),
                format!("invalid roles JSON: {error}"),
            )
        })?;
        Self::new(records)
    }

    /// Read a JSON role list from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path).map_err(|error| {
            ErrorEnvelope::from(error).with_metadata("path", path.to_string_lossy().to_string())
        })?;
        Self::from_json(&input)
    }

    /// Number of known roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true when no role is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    fn lookup(&self, id: &RoleId) -> Result<&RoleRecord> {
        let key = id.to_string();
        self.roles.get(&key).ok_or_else(|| {
            ErrorEnvelope::expected(ErrorCode::not_found(), format!("Role {key} does not exist"))
                .with_metadata("id", key)
        })
    }

    fn check(&self, ids: &[RoleId]) -> Result<()> {
        let records = ids
            .iter()
            .map(|id| self.lookup(id))
            .collect::<Result<Vec<_>>>()?;

        if records.iter().any(|record| record.is_protected()) {
            return Err(ErrorEnvelope::expected(
                ErrorCode::new("roles", "protected"),
                "You cannot delete the super admin role",
            ));
        }
        if records.iter().any(|record| record.users_count > 0) {
            return Err(ErrorEnvelope::expected(
                ErrorCode::new("roles", "in_use"),
                "Some roles are still assigned to some users",
            ));
        }
        Ok(())
    }

    fn sso_check(&self, ids: &[RoleId]) -> Result<()> {
        for id in ids {
            if self.lookup(id)?.sso_mapped {
                return Err(ErrorEnvelope::expected(
                    ErrorCode::new("roles", "sso_default_role"),
                    "This role is used as the default SSO role. Make sure to change this configuration before deleting the role",
                )
                .with_metadata("id", id.to_string()));
            }
        }
        Ok(())
    }
}

impl RoleDeletionPort for InMemoryRoleRegistry {
    fn check_roles_for_deletion<'a>(&'a self, ids: &'a [RoleId]) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.check(ids) })
    }

    fn sso_check_roles_for_deletion<'a>(
        &'a self,
        ids: &'a [RoleId],
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.sso_check(ids) })
    }
}
