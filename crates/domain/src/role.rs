//! Admin role request values.

use crate::number::integral;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a persisted role: the store accepts either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RoleId {
    /// Numeric primary key.
    Int(i64),
    /// String key (e.g. document stores).
    Str(String),
}

impl RoleId {
    /// Interpret a JSON value as a role identifier.
    ///
    /// Strings and non-negative integral numbers are accepted; anything else
    /// is `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(raw) => Some(Self::Str(raw.clone())),
            serde_json::Value::Number(number) => integral(number)
                .filter(|id| *id >= 0)
                .map(Self::Int),
            _ => None,
        }
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Str(value) => formatter.write_str(value),
        }
    }
}

impl From<i64> for RoleId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RoleId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

/// Accepted role creation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoleCreateInput {
    /// Display name (non-empty).
    pub name: String,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepted bulk role deletion payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RolesDeleteInput {
    /// Roles to delete, in request order (never empty).
    pub ids: Vec<RoleId>,
}

/// JSON Schema for `RoleCreateInput`.
#[must_use]
pub fn role_create_input_schema() -> Schema {
    schema_for!(RoleCreateInput)
}

/// JSON Schema for `RolesDeleteInput`.
#[must_use]
pub fn roles_delete_input_schema() -> Schema {
    schema_for!(RolesDeleteInput)
}
