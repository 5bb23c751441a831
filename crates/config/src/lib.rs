//! # cms-admin-config
//!
//! Configuration for the request validators: which enterprise features are
//! enabled and how naming rules are tuned.
//! This crate depends on `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_EE_FEATURES, ENV_FEATURES_SSO, ENV_NAMING_ICON_ALLOWLIST, EnvParseError, ValidationEnv,
    apply_env_overrides,
};
pub use load::{
    load_validation_config_from_path, load_validation_config_from_sources,
    load_validation_config_std_env, to_pretty_json,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, FeatureFlags, NamingConfig,
    ValidatedValidationConfig, ValidationConfig,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
