//! Naming conventions for icons, categories, attribute keys and table names.

use cms_admin_config::NamingConfig;
use cms_admin_shared::FieldPath;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

const ICON_PATTERN: &str = r"^[A-Za-z0-9][-A-Za-z0-9]*$";
const CATEGORY_PATTERN: &str = r"^[A-Za-z][-_0-9A-Za-z]*$";
const ATTRIBUTE_NAME_PATTERN: &str = r"^[A-Za-z][_0-9A-Za-z]*$";
const ENUM_VALUE_PATTERN: &str = r"^[_A-Za-z][_0-9A-Za-z]*$";

static ICON_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(ICON_PATTERN).ok());
static CATEGORY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(CATEGORY_PATTERN).ok());
static ATTRIBUTE_NAME_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(ATTRIBUTE_NAME_PATTERN).ok());
static ENUM_VALUE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(ENUM_VALUE_PATTERN).ok());

/// Attribute keys the storage layer manages itself.
pub const RESERVED_ATTRIBUTE_NAMES: &[&str] = &[
    "id",
    "created_at",
    "updated_at",
    "created_by",
    "updated_by",
    "published_at",
    "__component",
    "__contentType",
];

fn matches(pattern: &LazyLock<Option<Regex>>, value: &str) -> bool {
    pattern.as_ref().is_some_and(|regex| regex.is_match(value))
}

fn regex_message(path: &FieldPath, pattern: &str) -> String {
    format!("{path} must match the following regex: /{pattern}/")
}

/// Pluggable icon and category predicates used by the component validator.
///
/// The empty string satisfies both predicates; emptiness is reported by the
/// `required` rule instead.
pub trait NamingRules: Send + Sync {
    /// Whether `icon` names a usable icon.
    fn is_valid_icon(&self, icon: &str) -> bool;

    /// Whether `category` is a usable category name.
    fn is_valid_category_name(&self, category: &str) -> bool;

    /// Message recorded when [`NamingRules::is_valid_icon`] fails.
    fn icon_message(&self, path: &FieldPath) -> String {
        format!(
            "{path} is not a valid icon name. Make sure your icon name starts with an alphanumeric character and only includes alphanumeric characters or dashes."
        )
    }

    /// Message recorded when [`NamingRules::is_valid_category_name`] fails.
    fn category_message(&self, path: &FieldPath) -> String {
        regex_message(path, CATEGORY_PATTERN)
    }
}

/// Slug-style rules for icons and categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNamingRules;

impl NamingRules for DefaultNamingRules {
    fn is_valid_icon(&self, icon: &str) -> bool {
        icon.is_empty() || matches(&ICON_RE, icon)
    }

    fn is_valid_category_name(&self, category: &str) -> bool {
        category.is_empty() || matches(&CATEGORY_RE, category)
    }
}

/// Icons restricted to an explicit set; categories follow the default rule.
#[derive(Debug, Clone, Default)]
pub struct AllowlistNamingRules {
    icons: BTreeSet<String>,
}

impl AllowlistNamingRules {
    /// Accept only the given icon names.
    pub fn new<I, S>(icons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            icons: icons.into_iter().map(Into::into).collect(),
        }
    }
}

impl NamingRules for AllowlistNamingRules {
    fn is_valid_icon(&self, icon: &str) -> bool {
        icon.is_empty() || self.icons.contains(icon)
    }

    fn is_valid_category_name(&self, category: &str) -> bool {
        DefaultNamingRules.is_valid_category_name(category)
    }

    fn icon_message(&self, path: &FieldPath) -> String {
        let icons: Vec<&str> = self.icons.iter().map(String::as_str).collect();
        format!(
            "{path} must be one of the following values: {}",
            icons.join(", ")
        )
    }
}

/// Pick the naming rules described by `config`.
#[must_use]
pub fn naming_rules_from_config(config: &NamingConfig) -> Arc<dyn NamingRules> {
    match config.icon_allowlist.as_ref() {
        Some(icons) => Arc::new(AllowlistNamingRules::new(icons.iter().cloned())),
        None => Arc::new(DefaultNamingRules),
    }
}

/// Attribute keys: a letter followed by letters, digits or underscores.
#[must_use]
pub fn is_valid_attribute_name(name: &str) -> bool {
    matches(&ATTRIBUTE_NAME_RE, name)
}

pub(crate) fn attribute_name_message(path: &FieldPath) -> String {
    regex_message(path, ATTRIBUTE_NAME_PATTERN)
}

/// Enumeration values: an underscore or letter followed by word characters.
#[must_use]
pub fn is_valid_enum_value(value: &str) -> bool {
    matches(&ENUM_VALUE_RE, value)
}

pub(crate) fn enum_value_message(path: &FieldPath) -> String {
    regex_message(path, ENUM_VALUE_PATTERN)
}

/// Table names share the category rule; empty means "derive from the name".
#[must_use]
pub fn is_valid_collection_name(name: &str) -> bool {
    name.is_empty() || matches(&CATEGORY_RE, name)
}

pub(crate) fn collection_name_message(path: &FieldPath) -> String {
    regex_message(path, CATEGORY_PATTERN)
}
