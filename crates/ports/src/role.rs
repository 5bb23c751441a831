//! Role deletability boundary contract.

use crate::BoxFuture;
use cms_admin_domain::RoleId;
use cms_admin_shared::Result;

/// Read-only checks run by the role service before roles are deleted.
///
/// Both methods receive the whole batch: a bulk request is one call, and the
/// order in which individual ids are inspected is up to the implementation.
/// An `Err` carries the reason shown to the caller (its `message`).
pub trait RoleDeletionPort: Send + Sync {
    /// Fail if any role is missing or must not be deleted (e.g. the super admin).
    fn check_roles_for_deletion<'a>(&'a self, ids: &'a [RoleId]) -> BoxFuture<'a, Result<()>>;

    /// Fail if any role is still bound to a single-sign-on provider mapping.
    ///
    /// Only consulted when the `sso` feature is enabled.
    fn sso_check_roles_for_deletion<'a>(
        &'a self,
        ids: &'a [RoleId],
    ) -> BoxFuture<'a, Result<()>>;
}
