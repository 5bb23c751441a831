//! Validator configuration schema.

use cms_admin_shared::{ErrorCode, ErrorEnvelope, Validated};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Current config schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const MAX_ICON_ALLOWLIST: usize = 5_000;

/// Enterprise feature switches consulted by validators.
///
/// Passed into validators at construction time instead of being read from
/// process-global state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FeatureFlags {
    /// Single-sign-on: adds provider-mapping checks to role deletion.
    pub sso: bool,
}

impl FeatureFlags {
    /// Feature flags with SSO turned on.
    #[must_use]
    pub const fn with_sso() -> Self {
        Self { sso: true }
    }

    /// Look a feature up by its wire name (`"sso"`). Unknown names are disabled.
    #[must_use]
    pub fn is_enabled(&self, feature: &str) -> bool {
        match feature {
            "sso" => self.sso,
            _ => false,
        }
    }
}

/// Naming-rule tuning for the content-type builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct NamingConfig {
    /// When set, component icons must be one of these names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_allowlist: Option<Vec<String>>,
}

/// Root validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ValidationConfig {
    /// Schema version.
    pub version: u32,
    /// Enabled enterprise features.
    pub features: FeatureFlags,
    /// Naming rules.
    pub naming: NamingConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            features: FeatureFlags::default(),
            naming: NamingConfig::default(),
        }
    }
}

/// Validated configuration proof.
pub type ValidatedValidationConfig = Validated<ValidationConfig>;

impl ValidationConfig {
    /// Check version and naming constraints, trimming allowlist entries.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedValidationConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                expected: CURRENT_CONFIG_VERSION,
            });
        }

        if let Some(allowlist) = self.naming.icon_allowlist.take() {
            if allowlist.len() > MAX_ICON_ALLOWLIST {
                return Err(ConfigSchemaError::IconAllowlistTooLarge {
                    len: allowlist.len(),
                    max: MAX_ICON_ALLOWLIST,
                });
            }
            let mut seen = BTreeSet::new();
            let mut normalized = Vec::with_capacity(allowlist.len());
            for entry in allowlist {
                let trimmed = entry.trim();
                if trimmed.is_empty() {
                    return Err(ConfigSchemaError::EmptyIconAllowlistEntry);
                }
                if seen.insert(trimmed.to_owned()) {
                    normalized.push(trimmed.to_owned());
                }
            }
            self.naming.icon_allowlist = Some(normalized);
        }

        Ok(Validated::new(self))
    }
}

/// Config schema violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// `version` is not supported.
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
    /// `naming.iconAllowlist` contains a blank entry.
    EmptyIconAllowlistEntry,
    /// `naming.iconAllowlist` exceeds a safety limit.
    IconAllowlistTooLarge {
        /// Number of entries provided.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => write!(
                formatter,
                "unsupported config version {found} (expected {expected})"
            ),
            Self::EmptyIconAllowlistEntry => {
                formatter.write_str("naming.iconAllowlist entries must be non-empty")
            },
            Self::IconAllowlistTooLarge { len, max } => write!(
                formatter,
                "naming.iconAllowlist is too large ({len} entries, max {max})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let message = error.to_string();
        match error {
            ConfigSchemaError::UnsupportedVersion { found, .. } => {
                Self::expected(ErrorCode::new("config", "unsupported_version"), message)
                    .with_metadata("version", found.to_string())
            },
            ConfigSchemaError::EmptyIconAllowlistEntry => {
                Self::expected(ErrorCode::new("config", "invalid_field"), message)
                    .with_metadata("field", "naming.iconAllowlist")
            },
            ConfigSchemaError::IconAllowlistTooLarge { len, max } => {
                Self::expected(ErrorCode::new("config", "invalid_field"), message)
                    .with_metadata("field", "naming.iconAllowlist")
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string())
            },
        }
    }
}
