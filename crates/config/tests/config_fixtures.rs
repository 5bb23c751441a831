//! Integration tests for loading validator config files from disk.

use cms_admin_config::{
    ENV_EE_FEATURES, ValidationEnv, load_validation_config_from_path,
};
use cms_admin_shared::ErrorCode;
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;

#[test]
fn loads_json_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("validation.json");
    fs::write(
        &path,
        r#"{"version":1,"features":{"sso":true},"naming":{"iconAllowlist":["star"]}}"#,
    )?;

    let config = load_validation_config_from_path(Some(&path), &ValidationEnv::default())?;
    assert!(config.features.sso);
    assert_eq!(config.naming.icon_allowlist, Some(vec!["star".to_string()]));
    Ok(())
}

#[test]
fn loads_toml_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("validation.toml");
    fs::write(
        &path,
        "version = 1\n\n[features]\nsso = true\n\n[naming]\niconAllowlist = [\"cube\", \"book\"]\n",
    )?;

    let config = load_validation_config_from_path(Some(&path), &ValidationEnv::default())?;
    assert!(config.features.sso);
    assert_eq!(
        config.naming.icon_allowlist,
        Some(vec!["cube".to_string(), "book".to_string()])
    );
    Ok(())
}

#[test]
fn env_feature_list_enables_sso_over_file() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("validation.json");
    fs::write(&path, r#"{"features":{"sso":false}}"#)?;

    let mut map = BTreeMap::new();
    map.insert(ENV_EE_FEATURES.to_string(), "sso".to_string());
    let env = ValidationEnv::from_map(&map)?;

    let config = load_validation_config_from_path(Some(&path), &env)?;
    assert!(config.features.sso);
    Ok(())
}

#[test]
fn missing_file_reports_path() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("absent.json");

    let error = load_validation_config_from_path(Some(&path), &ValidationEnv::default()).err();
    assert!(matches!(
        error,
        Some(envelope)
            if envelope.code == ErrorCode::new("config", "config_file_not_found")
                && envelope.metadata.contains_key("path")
    ));
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("validation.yaml");
    fs::write(&path, "features: {}")?;

    let error = load_validation_config_from_path(Some(&path), &ValidationEnv::default()).err();
    assert!(matches!(
        error,
        Some(envelope) if envelope.code == ErrorCode::new("config", "unsupported_format")
    ));
    Ok(())
}
