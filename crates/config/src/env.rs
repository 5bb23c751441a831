//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: invalid values fail fast instead of being ignored.

use crate::schema::{ValidatedValidationConfig, ValidationConfig};
use cms_admin_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: enable the single-sign-on feature.
pub const ENV_FEATURES_SSO: &str = "CMS_FEATURES_SSO";
/// Env var: comma-separated list of enabled enterprise features.
pub const ENV_EE_FEATURES: &str = "CMS_EE_FEATURES";
/// Env var: comma-separated icon allowlist.
pub const ENV_NAMING_ICON_ALLOWLIST: &str = "CMS_NAMING_ICON_ALLOWLIST";

const KNOWN_FEATURES: &[&str] = &["sso"];
const MAX_CSV_ITEMS: usize = 5_000;

/// Parsed env overrides. `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationEnv {
    /// SSO override (explicit switch wins over the feature list).
    pub features_sso: Option<bool>,
    /// Enterprise features listed in `CMS_EE_FEATURES`.
    pub ee_features: Option<Vec<String>>,
    /// Icon allowlist override.
    pub naming_icon_allowlist: Option<Vec<String>>,
}

impl ValidationEnv {
    /// Parse overrides from an explicit map (tests, embedding hosts).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let features_sso = parse_optional_bool(map, ENV_FEATURES_SSO)?;
        let ee_features = parse_optional_features(map, ENV_EE_FEATURES)?;
        let naming_icon_allowlist = parse_optional_csv(map, ENV_NAMING_ICON_ALLOWLIST)?;

        Ok(Self {
            features_sso,
            ee_features,
            naming_icon_allowlist,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [ENV_FEATURES_SSO, ENV_EE_FEATURES, ENV_NAMING_ICON_ALLOWLIST] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Whether any override is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.features_sso.is_none()
            && self.ee_features.is_none()
            && self.naming_icon_allowlist.is_none()
    }
}

/// Apply env overrides on top of `base` and validate the result.
pub fn apply_env_overrides(
    base: ValidationConfig,
    env: &ValidationEnv,
) -> Result<ValidatedValidationConfig, ErrorEnvelope> {
    let mut config = base;

    if let Some(features) = env.ee_features.as_ref() {
        config.features.sso = features.iter().any(|feature| feature == "sso");
    }
    if let Some(sso) = env.features_sso {
        config.features.sso = sso;
    }
    if let Some(allowlist) = env.naming_icon_allowlist.as_ref() {
        config.naming.icon_allowlist = Some(allowlist.clone());
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// Variable is set but blank.
    EmptyValue {
        /// Variable name.
        var: &'static str,
    },
    /// Variable is not a recognised boolean.
    InvalidBool {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// Feature list names an unknown feature.
    UnknownFeature {
        /// Variable name.
        var: &'static str,
        /// Offending entry.
        entry: String,
    },
    /// CSV list exceeds a safety limit.
    CsvTooLarge {
        /// Variable name.
        var: &'static str,
        /// Number of entries.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::UnknownFeature { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::CsvTooLarge { .. } => ErrorCode::new("config", "invalid_env_csv"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, value } => {
                write!(formatter, "{var} must be a boolean (got {value:?})")
            },
            Self::UnknownFeature { var, entry } => write!(
                formatter,
                "{var} contains unknown feature {entry:?} (known: {})",
                KNOWN_FEATURES.join(", ")
            ),
            Self::CsvTooLarge { var, len, max } => {
                write!(formatter, "{var} has too many entries ({len}, max {max})")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => {
                envelope = envelope.with_metadata("env_var", var);
            },
            EnvParseError::InvalidBool { var, value } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value);
            },
            EnvParseError::UnknownFeature { var, entry } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("entry", entry);
            },
            EnvParseError::CsvTooLarge { var, len, max } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string());
            },
        }

        envelope
    }
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_csv(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Vec<String>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let items = parse_csv(raw);
    if items.len() > MAX_CSV_ITEMS {
        return Err(EnvParseError::CsvTooLarge {
            var,
            len: items.len(),
            max: MAX_CSV_ITEMS,
        });
    }
    Ok(Some(items))
}

fn parse_optional_features(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Vec<String>>, EnvParseError> {
    let Some(items) = parse_optional_csv(map, var)? else {
        return Ok(None);
    };

    let mut features = Vec::with_capacity(items.len());
    for item in items {
        let normalized = item.to_ascii_lowercase();
        if !KNOWN_FEATURES.contains(&normalized.as_str()) {
            return Err(EnvParseError::UnknownFeature { var, entry: item });
        }
        if !features.contains(&normalized) {
            features.push(normalized);
        }
    }
    Ok(Some(features))
}

fn parse_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_no_overrides() -> Result<(), EnvParseError> {
        let env = ValidationEnv::from_map(&BTreeMap::new())?;
        assert!(env.is_empty());
        Ok(())
    }

    #[test]
    fn parses_bool_spellings() -> Result<(), EnvParseError> {
        for (raw, expected) in [("true", true), ("YES", true), ("0", false), ("off", false)] {
            let env = ValidationEnv::from_map(&env_map(&[(ENV_FEATURES_SSO, raw)]))?;
            assert_eq!(env.features_sso, Some(expected), "value {raw}");
        }
        Ok(())
    }

    #[test]
    fn rejects_invalid_bool() {
        let result = ValidationEnv::from_map(&env_map(&[(ENV_FEATURES_SSO, "maybe")]));
        assert!(matches!(
            result,
            Err(EnvParseError::InvalidBool { var: ENV_FEATURES_SSO, .. })
        ));
    }

    #[test]
    fn rejects_blank_bool() {
        let result = ValidationEnv::from_map(&env_map(&[(ENV_FEATURES_SSO, "  ")]));
        assert_eq!(result, Err(EnvParseError::EmptyValue { var: ENV_FEATURES_SSO }));
    }

    #[test]
    fn feature_list_is_normalized() -> Result<(), EnvParseError> {
        let env = ValidationEnv::from_map(&env_map(&[(ENV_EE_FEATURES, " SSO, sso ,")]))?;
        assert_eq!(env.ee_features, Some(vec!["sso".to_string()]));
        Ok(())
    }

    #[test]
    fn unknown_feature_maps_to_envelope() {
        let error = ValidationEnv::from_map(&env_map(&[(ENV_EE_FEATURES, "sso,telepathy")]))
            .err()
            .map(ErrorEnvelope::from);
        assert!(matches!(
            error,
            Some(envelope)
                if envelope.code == ErrorCode::new("config", "invalid_env_enum")
                    && envelope.metadata.get("entry").map(String::as_str) == Some("telepathy")
        ));
    }

    #[test]
    fn explicit_switch_wins_over_feature_list() -> Result<(), ErrorEnvelope> {
        let env = ValidationEnv::from_map(&env_map(&[
            (ENV_EE_FEATURES, "sso"),
            (ENV_FEATURES_SSO, "false"),
        ]))?;
        let config = apply_env_overrides(ValidationConfig::default(), &env)?;
        assert!(!config.features.sso);
        Ok(())
    }

    #[test]
    fn allowlist_override_replaces_file_value() -> Result<(), ErrorEnvelope> {
        let mut base = ValidationConfig::default();
        base.naming.icon_allowlist = Some(vec!["cube".into()]);

        let env = ValidationEnv::from_map(&env_map(&[(ENV_NAMING_ICON_ALLOWLIST, "star, book")]))?;
        let config = apply_env_overrides(base, &env)?;
        assert_eq!(
            config.naming.icon_allowlist,
            Some(vec!["star".to_string(), "book".to_string()])
        );
        Ok(())
    }
}
