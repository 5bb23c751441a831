//! # cms-admin-domain
//!
//! Typed values for the admin panel's role and content-type-builder requests.
//!
//! Validators in `cms-admin-validation` walk raw JSON and, once a payload is
//! accepted, decode it into the types defined here:
//!
//! - **Roles** - `RoleId`, `RoleCreateInput`, `RolesDeleteInput`
//! - **Components** - `AttributeType`, `RelationKind`, `ComponentDefinition`, `ComponentRequest`
//! - **Numbers** - `integral` for JSON numbers without a fractional part
//!
//! ## Dependency Rules
//!
//! - No workspace dependencies
//! - Pure data with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod component;
pub mod number;
pub mod role;

pub use component::{
    Attribute, AttributeType, ComponentDefinition, ComponentRequest, DEFAULT_TYPES, ModelType,
    RelationKind, component_request_schema,
};
pub use number::integral;
pub use role::{
    RoleCreateInput, RoleId, RolesDeleteInput, role_create_input_schema,
    roles_delete_input_schema,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
