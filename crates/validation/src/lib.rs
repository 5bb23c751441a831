//! # cms-admin-validation
//!
//! Request validators for the CMS admin backend.
//!
//! Validators walk the raw JSON payload, collect every violation into a
//! [`ValidationError`], and only then decode the payload into its typed
//! domain value. Role deletion additionally consults a
//! [`RoleDeletionPort`](cms_admin_ports::RoleDeletionPort).

/// Attribute-schema builder.
pub mod attributes;
/// Component create/update validators.
pub mod component;
/// Icon, category and attribute naming rules.
pub mod naming;
/// Role create/delete validators.
pub mod role;
/// Payload normalization run before validation.
pub mod transform;
mod value;

pub use attributes::AttributeSchema;
pub use cms_admin_shared::ValidationError;
pub use component::{
    ComponentValidationDeps, UID_OR_TMP_UID_MESSAGE, VALID_RELATIONS, component_attribute_schema,
    valid_types, validate_component_input, validate_update_component_input,
};
pub use naming::{
    AllowlistNamingRules, DefaultNamingRules, NamingRules, RESERVED_ATTRIBUTE_NAMES,
    naming_rules_from_config,
};
pub use role::{
    RoleValidationDeps, validate_role_create_input, validate_role_delete_input,
    validate_roles_delete_input,
};
pub use transform::{EMPTY_DEFAULT, remove_empty_defaults};

/// Returns the validation crate version.
#[must_use]
pub const fn validation_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
