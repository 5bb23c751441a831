//! Content-type-builder component values.

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute (field) types known to the content-type builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// Short text.
    String,
    /// Long text.
    Text,
    /// Rich (markdown) text.
    Richtext,
    /// Arbitrary JSON.
    Json,
    /// One of a fixed set of names.
    Enumeration,
    /// Hashed secret.
    Password,
    /// Email address.
    Email,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer (transported as string).
    Biginteger,
    /// Floating point number.
    Float,
    /// Fixed precision number.
    Decimal,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    Datetime,
    /// Unix timestamp.
    Timestamp,
    /// True/false.
    Boolean,
    /// Upload reference.
    Media,
    /// Slug derived from another field.
    Uid,
    /// Embedded component.
    Component,
    /// Link to another model.
    Relation,
}

/// Types every model may declare (components add `component`).
pub const DEFAULT_TYPES: &[AttributeType] = &[
    AttributeType::String,
    AttributeType::Text,
    AttributeType::Richtext,
    AttributeType::Json,
    AttributeType::Enumeration,
    AttributeType::Password,
    AttributeType::Email,
    AttributeType::Integer,
    AttributeType::Biginteger,
    AttributeType::Float,
    AttributeType::Decimal,
    AttributeType::Date,
    AttributeType::Time,
    AttributeType::Datetime,
    AttributeType::Timestamp,
    AttributeType::Boolean,
    AttributeType::Media,
    AttributeType::Uid,
];

const ALL_TYPES: &[AttributeType] = &[
    AttributeType::String,
    AttributeType::Text,
    AttributeType::Richtext,
    AttributeType::Json,
    AttributeType::Enumeration,
    AttributeType::Password,
    AttributeType::Email,
    AttributeType::Integer,
    AttributeType::Biginteger,
    AttributeType::Float,
    AttributeType::Decimal,
    AttributeType::Date,
    AttributeType::Time,
    AttributeType::Datetime,
    AttributeType::Timestamp,
    AttributeType::Boolean,
    AttributeType::Media,
    AttributeType::Uid,
    AttributeType::Component,
    AttributeType::Relation,
];

impl AttributeType {
    /// Wire name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Richtext => "richtext",
            Self::Json => "json",
            Self::Enumeration => "enumeration",
            Self::Password => "password",
            Self::Email => "email",
            Self::Integer => "integer",
            Self::Biginteger => "biginteger",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Media => "media",
            Self::Uid => "uid",
            Self::Component => "component",
            Self::Relation => "relation",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        ALL_TYPES.iter().copied().find(|kind| kind.as_str() == raw)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Relation cardinalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    /// `oneToOne`
    OneToOne,
    /// `oneToMany`
    OneToMany,
    /// `manyToOne`
    ManyToOne,
    /// `manyToMany`
    ManyToMany,
    /// `oneWay`
    OneWay,
    /// `manyWay`
    ManyWay,
}

const ALL_RELATIONS: &[RelationKind] = &[
    RelationKind::OneToOne,
    RelationKind::OneToMany,
    RelationKind::ManyToOne,
    RelationKind::ManyToMany,
    RelationKind::OneWay,
    RelationKind::ManyWay,
];

impl RelationKind {
    /// Wire name of the relation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "oneToOne",
            Self::OneToMany => "oneToMany",
            Self::ManyToOne => "manyToOne",
            Self::ManyToMany => "manyToMany",
            Self::OneWay => "oneWay",
            Self::ManyWay => "manyWay",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        ALL_RELATIONS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == raw)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Kind of model a schema describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    /// Collection or single type.
    ContentType,
    /// Reusable component.
    Component,
}

/// A validated attribute: its type plus the type-specific options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    /// Declared type.
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    /// Remaining keys (`required`, `default`, `minLength`, ...).
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// A validated component definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    /// Display name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Category the component is filed under.
    pub category: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional database connection name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    /// Optional table name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    /// Fields of the component, by name.
    pub attributes: BTreeMap<String, Attribute>,
    /// Permanent identifier of an existing component (nested entries only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Client-side identifier of a component not yet persisted (nested entries only).
    #[serde(default, rename = "tmpUID", skip_serializing_if = "Option::is_none")]
    pub tmp_uid: Option<String>,
}

/// A validated create/update request for the content-type builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentRequest {
    /// Primary component being created or updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentDefinition>,
    /// Nested components created or edited alongside.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<ComponentDefinition>>,
}

/// JSON Schema for `ComponentRequest`.
#[must_use]
pub fn component_request_schema() -> Schema {
    schema_for!(ComponentRequest)
}
