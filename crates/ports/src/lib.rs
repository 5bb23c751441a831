//! # cms-admin-ports
//!
//! Capabilities the validators depend on, expressed as traits so the request
//! layer can inject real services and tests can inject fakes.
//! This crate depends only on `domain` and `shared`.

use std::future::Future;
use std::pin::Pin;

/// Boxed future used by port traits.
///
/// Boundary traits stay object-safe (`Arc<dyn Port>`), so async methods return
/// boxed futures.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod logger;
pub mod role;

pub use logger::*;
pub use role::*;

// Re-export domain types used in port signatures, so adapter crates
// can implement ports without directly depending on `cms-admin-domain`.
pub use cms_admin_domain::RoleId;
