//! Attribute-schema builder shared by model validators.
//!
//! An [`AttributeSchema`] is parameterized by the attribute types and relation
//! kinds a model may declare. Each attribute type has a closed option set.

use crate::naming::{
    RESERVED_ATTRIBUTE_NAMES, attribute_name_message, enum_value_message,
    is_valid_attribute_name, is_valid_enum_value,
};
use crate::value::{
    check_bounds, expect_object, min_items_message, one_of_message,
    optional_bool, optional_non_negative_integer, optional_number, optional_object,
    optional_string, reject_unknown_keys, required_message, type_message,
};
use cms_admin_domain::{AttributeType, ModelType, RelationKind, integral};
use cms_admin_shared::{FieldPath, Issues};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const COMMON_KEYS: &[&str] = &[
    "type",
    "required",
    "unique",
    "private",
    "configurable",
    "pluginOptions",
];
const TEXT_KEYS: &[&str] = &["default", "minLength", "maxLength"];
const REGEX_KEYS: &[&str] = &["regex"];
const UID_KEYS: &[&str] = &["targetField", "options"];
const ENUM_KEYS: &[&str] = &["enum", "default", "enumName"];
const NUMBER_KEYS: &[&str] = &["default", "min", "max"];
const DEFAULT_KEYS: &[&str] = &["default"];
const MEDIA_KEYS: &[&str] = &["multiple", "allowedTypes"];
const COMPONENT_KEYS: &[&str] = &["component", "repeatable", "min", "max"];
const RELATION_KEYS: &[&str] = &[
    "type",
    "relation",
    "target",
    "targetAttribute",
    "private",
    "configurable",
    "pluginOptions",
];

const MEDIA_TYPES: &[&str] = &["images", "videos", "files", "audios"];
const UID_TARGET_TYPES: &[&str] = &["string", "text"];

/// Validator for the `attributes` object of a model definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    types: Vec<AttributeType>,
    relations: Vec<RelationKind>,
    model_type: ModelType,
}

impl AttributeSchema {
    /// Build a schema accepting `types` and relations of the given kinds.
    ///
    /// `type: "relation"` is accepted only when `relations` is non-empty.
    #[must_use]
    pub fn new(types: &[AttributeType], relations: &[RelationKind], model_type: ModelType) -> Self {
        Self {
            types: types.to_vec(),
            relations: relations.to_vec(),
            model_type,
        }
    }

    /// Check an `attributes` value, recording every violation under `path`.
    pub fn validate(&self, attributes: &Value, path: &FieldPath, issues: &mut Issues) {
        let Some(attributes) = expect_object(attributes, path, issues) else {
            return;
        };

        for (name, attribute) in attributes {
            let field = path.key(name);
            if RESERVED_ATTRIBUTE_NAMES.contains(&name.as_str()) {
                issues.push(
                    &field,
                    format!(
                        "{field} is a reserved attribute name (reserved names: {})",
                        RESERVED_ATTRIBUTE_NAMES.join(", ")
                    ),
                );
            } else if !is_valid_attribute_name(name) {
                issues.push(&field, attribute_name_message(&field));
            }
            self.validate_attribute(attribute, attributes, &field, issues);
        }
    }

    fn validate_attribute(
        &self,
        attribute: &Value,
        siblings: &Map<String, Value>,
        path: &FieldPath,
        issues: &mut Issues,
    ) {
        let Some(options) = expect_object(attribute, path, issues) else {
            return;
        };

        let type_path = path.key("type");
        let raw_type = match options.get("type") {
            None | Some(Value::Null) => {
                issues.push(&type_path, required_message(&type_path));
                return;
            },
            Some(Value::String(raw)) => raw.as_str(),
            Some(_) => {
                issues.push(&type_path, type_message(&type_path, "string"));
                return;
            },
        };

        match AttributeType::parse(raw_type) {
            Some(AttributeType::Relation) if !self.relations.is_empty() => {
                self.validate_relation(options, path, issues);
            },
            Some(kind) if kind != AttributeType::Relation && self.types.contains(&kind) => {
                validate_typed(kind, options, siblings, path, issues);
            },
            _ => {
                let mut allowed: Vec<&str> = self
                    .types
                    .iter()
                    .filter(|kind| **kind != AttributeType::Relation)
                    .map(|kind| kind.as_str())
                    .collect();
                if !self.relations.is_empty() {
                    allowed.push(AttributeType::Relation.as_str());
                }
                issues.push(&type_path, one_of_message(&type_path, &allowed));
            },
        }
    }

    fn validate_relation(&self, options: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
        reject_unknown_keys(options, RELATION_KEYS, path, issues);
        optional_bool(options, "private", path, issues);
        optional_bool(options, "configurable", path, issues);
        optional_object(options, "pluginOptions", path, issues);

        let relation_path = path.key("relation");
        match options.get("relation") {
            None | Some(Value::Null) => issues.push(&relation_path, required_message(&relation_path)),
            Some(Value::String(raw)) => {
                let allowed = RelationKind::parse(raw).is_some_and(|kind| self.relations.contains(&kind));
                if !allowed {
                    let names: Vec<&str> = self.relations.iter().map(|kind| kind.as_str()).collect();
                    issues.push(&relation_path, one_of_message(&relation_path, &names));
                }
            },
            Some(_) => issues.push(&relation_path, type_message(&relation_path, "string")),
        }

        let target_path = path.key("target");
        match options.get("target") {
            None | Some(Value::Null) => issues.push(&target_path, required_message(&target_path)),
            Some(Value::String(target)) if target.is_empty() => {
                issues.push(&target_path, required_message(&target_path));
            },
            Some(Value::String(_)) => {},
            Some(_) => issues.push(&target_path, type_message(&target_path, "string")),
        }

        let target_attribute = optional_string(options, "targetAttribute", true, path, issues);
        if self.model_type == ModelType::Component && target_attribute.is_some() {
            let field = path.key("targetAttribute");
            issues.push(&field, format!("{field} must be null for component relations"));
        }
    }
}

fn allowed_keys(groups: &[&[&'static str]]) -> Vec<&'static str> {
    let mut keys = COMMON_KEYS.to_vec();
    for group in groups {
        keys.extend_from_slice(group);
    }
    keys
}

fn validate_typed(
    kind: AttributeType,
    options: &Map<String, Value>,
    siblings: &Map<String, Value>,
    path: &FieldPath,
    issues: &mut Issues,
) {
    for key in ["required", "unique", "private", "configurable"] {
        optional_bool(options, key, path, issues);
    }
    optional_object(options, "pluginOptions", path, issues);

    match kind {
        AttributeType::String | AttributeType::Text => {
            reject_unknown_keys(options, &allowed_keys(&[TEXT_KEYS, REGEX_KEYS]), path, issues);
            validate_text(options, path, issues);
            validate_regex(options, path, issues);
        },
        AttributeType::Uid => {
            reject_unknown_keys(options, &allowed_keys(&[TEXT_KEYS, UID_KEYS]), path, issues);
            validate_text(options, path, issues);
            validate_uid(options, siblings, path, issues);
        },
        AttributeType::Richtext | AttributeType::Password | AttributeType::Email => {
            reject_unknown_keys(options, &allowed_keys(&[TEXT_KEYS]), path, issues);
            validate_text(options, path, issues);
        },
        AttributeType::Enumeration => {
            reject_unknown_keys(options, &allowed_keys(&[ENUM_KEYS]), path, issues);
            validate_enumeration(options, path, issues);
        },
        AttributeType::Integer
        | AttributeType::Biginteger
        | AttributeType::Float
        | AttributeType::Decimal => {
            reject_unknown_keys(options, &allowed_keys(&[NUMBER_KEYS]), path, issues);
            validate_number(kind, options, path, issues);
        },
        AttributeType::Boolean => {
            reject_unknown_keys(options, &allowed_keys(&[DEFAULT_KEYS]), path, issues);
            if options.get("default").is_some_and(|value| !value.is_null()) {
                optional_bool(options, "default", path, issues);
            }
        },
        AttributeType::Date
        | AttributeType::Time
        | AttributeType::Datetime
        | AttributeType::Timestamp => {
            reject_unknown_keys(options, &allowed_keys(&[DEFAULT_KEYS]), path, issues);
            optional_string(options, "default", true, path, issues);
        },
        AttributeType::Json => {
            reject_unknown_keys(options, &allowed_keys(&[DEFAULT_KEYS]), path, issues);
        },
        AttributeType::Media => {
            reject_unknown_keys(options, &allowed_keys(&[MEDIA_KEYS]), path, issues);
            validate_media(options, path, issues);
        },
        AttributeType::Component => {
            reject_unknown_keys(options, &allowed_keys(&[COMPONENT_KEYS]), path, issues);
            validate_component_reference(options, path, issues);
        },
        // Relations are checked by `AttributeSchema::validate_relation`.
        AttributeType::Relation => {},
    }
}

fn validate_text(options: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    optional_string(options, "default", true, path, issues);
    let min = optional_non_negative_integer(options, "minLength", path, issues);
    let max = optional_non_negative_integer(options, "maxLength", path, issues);
    check_bounds(min, max, "minLength", "maxLength", path, issues);
}

fn validate_regex(options: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    let Some(pattern) = optional_string(options, "regex", false, path, issues) else {
        return;
    };
    if Regex::new(pattern).is_err() {
        let field = path.key("regex");
        issues.push(&field, format!("{field} must be a valid regular expression pattern"));
    }
}

fn validate_uid(
    options: &Map<String, Value>,
    siblings: &Map<String, Value>,
    path: &FieldPath,
    issues: &mut Issues,
) {
    optional_object(options, "options", path, issues);
    let Some(target) = optional_string(options, "targetField", true, path, issues) else {
        return;
    };

    let candidates: Vec<&str> = siblings
        .iter()
        .filter(|(_, attribute)| {
            attribute
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|kind| UID_TARGET_TYPES.contains(&kind))
        })
        .map(|(name, _)| name.as_str())
        .collect();
    if !candidates.contains(&target) {
        let field = path.key("targetField");
        issues.push(&field, one_of_message(&field, &candidates));
    }
}

fn validate_enumeration(options: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    optional_string(options, "enumName", false, path, issues);

    let enum_path = path.key("enum");
    let values: Option<Vec<&str>> = match options.get("enum") {
        None | Some(Value::Null) => {
            issues.push(&enum_path, required_message(&enum_path));
            None
        },
        Some(Value::Array(items)) if items.is_empty() => {
            issues.push(&enum_path, min_items_message(&enum_path, 1));
            None
        },
        Some(Value::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let item_path = enum_path.index(index);
                match item {
                    Value::String(value) if is_valid_enum_value(value) => values.push(value.as_str()),
                    Value::String(_) => issues.push(&item_path, enum_value_message(&item_path)),
                    _ => issues.push(&item_path, type_message(&item_path, "string")),
                }
            }

            let mut seen = BTreeSet::new();
            let duplicates: BTreeSet<&str> =
                values.iter().copied().filter(|value| !seen.insert(*value)).collect();
            if !duplicates.is_empty() {
                let duplicates: Vec<&str> = duplicates.into_iter().collect();
                issues.push(
                    &enum_path,
                    format!("{enum_path} has duplicated values: {}", duplicates.join(", ")),
                );
            }
            Some(values)
        },
        Some(_) => {
            issues.push(&enum_path, type_message(&enum_path, "array"));
            None
        },
    };

    let default = optional_string(options, "default", true, path, issues);
    if let (Some(default), Some(values)) = (default, values.as_ref())
        && !values.contains(&default)
    {
        let field = path.key("default");
        issues.push(&field, one_of_message(&field, values));
    }
}

fn validate_number(
    kind: AttributeType,
    options: &Map<String, Value>,
    path: &FieldPath,
    issues: &mut Issues,
) {
    let default_path = path.key("default");
    match (kind, options.get("default")) {
        (_, None | Some(Value::Null)) => {},
        (AttributeType::Biginteger, Some(Value::String(raw))) => {
            let digits = raw.strip_prefix('-').unwrap_or(raw);
            if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
                issues.push(
                    &default_path,
                    format!("{default_path} must be a valid integer string"),
                );
            }
        },
        (AttributeType::Biginteger, Some(_)) => {
            issues.push(&default_path, type_message(&default_path, "string"));
        },
        (AttributeType::Integer, Some(Value::Number(number))) => {
            if integral(number).is_none() {
                issues.push(&default_path, format!("{default_path} must be an integer"));
            }
        },
        (_, Some(Value::Number(_))) => {},
        (_, Some(_)) => issues.push(&default_path, type_message(&default_path, "number")),
    }

    let min = optional_number(options, "min", path, issues);
    let max = optional_number(options, "max", path, issues);
    check_bounds(min, max, "min", "max", path, issues);
}

fn validate_media(options: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    optional_bool(options, "multiple", path, issues);

    let Some(allowed) = options.get("allowedTypes") else {
        return;
    };
    let allowed_path = path.key("allowedTypes");
    match allowed {
        Value::Null => {},
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let item_path = allowed_path.index(index);
                match item {
                    Value::String(kind) if MEDIA_TYPES.contains(&kind.as_str()) => {},
                    Value::String(_) => issues.push(&item_path, one_of_message(&item_path, MEDIA_TYPES)),
                    _ => issues.push(&item_path, type_message(&item_path, "string")),
                }
            }
        },
        _ => issues.push(&allowed_path, type_message(&allowed_path, "array")),
    }
}

fn validate_component_reference(options: &Map<String, Value>, path: &FieldPath, issues: &mut Issues) {
    let component_path = path.key("component");
    match options.get("component") {
        None | Some(Value::Null) => issues.push(&component_path, required_message(&component_path)),
        Some(Value::String(uid)) if uid.is_empty() => {
            issues.push(&component_path, required_message(&component_path));
        },
        Some(Value::String(_)) => {},
        Some(_) => issues.push(&component_path, type_message(&component_path, "string")),
    }

    let repeatable = optional_bool(options, "repeatable", path, issues).unwrap_or(false);
    if repeatable {
        let min = optional_non_negative_integer(options, "min", path, issues);
        let max = optional_non_negative_integer(options, "max", path, issues);
        check_bounds(min, max, "min", "max", path, issues);
    } else {
        for key in ["min", "max"] {
            if options.get(key).is_some_and(|value| !value.is_null()) {
                let field = path.key(key);
                issues.push(&field, format!("{field} is only allowed for repeatable components"));
            }
        }
    }
}
