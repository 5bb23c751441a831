//! # cms-admin-adapters
//!
//! Adapter implementations for ports (logging, role deletability).
//! This crate depends on `ports` and `shared`.

/// `LoggerPort` over `tracing`.
pub mod logger;
/// `RoleDeletionPort` over a static role list.
pub mod role_registry;

pub use logger::TracingLogger;
pub use role_registry::{InMemoryRoleRegistry, RoleRecord, SUPER_ADMIN_CODE};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]" || line == "[dev-dependencies]";
                continue;
            }
            if in_deps && line.starts_with("cms-admin-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_stay_outside_the_validators() {
        for dep in workspace_deps() {
            assert!(
                dep == "cms-admin-ports" || dep == "cms-admin-shared",
                "unexpected dependency found: {dep}"
            );
        }
        assert!(!adapters_crate_version().is_empty());
    }
}
