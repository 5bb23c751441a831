//! # cms-admin-shared
//!
//! Shared result types, error envelope, and validation issue types for the
//! cms-admin-validation workspace.
//!
//! This crate provides foundational types that are used across all other crates:
//!
//! - Error envelope and `Result` alias for infrastructure faults
//! - `ValidationError` / `FieldIssue` for collect-all request validation
//! - `Validated<T>` proof wrapper for values that passed validation
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **One validation taxonomy** - every rejected input ends up as a `ValidationError`
//! 3. **Serde-compatible** - All public types support serialization

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod invariants;
pub mod result;
pub mod validation;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use invariants::Validated;
pub use result::Result;
pub use validation::{FieldIssue, FieldPath, Issues, ValidationError};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
