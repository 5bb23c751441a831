//! Content-type-builder component create/update validation.

use crate::attributes::AttributeSchema;
use crate::naming::{
    DefaultNamingRules, NamingRules, collection_name_message, is_valid_collection_name,
    naming_rules_from_config,
};
use crate::transform::remove_empty_defaults;
use crate::value::{
    expect_object, min_length_message, optional_string, reject_unknown_keys, required_message,
    type_message,
};
use cms_admin_config::ValidationConfig;
use cms_admin_domain::{AttributeType, ComponentRequest, DEFAULT_TYPES, ModelType, RelationKind};
use cms_admin_ports::{LogFields, LoggerPort};
use cms_admin_shared::{FieldPath, Issues, Validated, ValidationError};
use serde_json::Value;
use std::sync::Arc;

/// Relation kinds a component attribute may declare.
pub const VALID_RELATIONS: &[RelationKind] = &[RelationKind::OneToOne, RelationKind::OneToMany];

/// Message for nested entries carrying both or neither identifier.
pub const UID_OR_TMP_UID_MESSAGE: &str = "Component must have a uid or a tmpUID";

const REQUEST_KEYS: &[&str] = &["component", "components"];
const DEFINITION_KEYS: &[&str] = &[
    "name",
    "icon",
    "category",
    "description",
    "connection",
    "collectionName",
    "attributes",
];
const NESTED_IDENTITY_KEYS: &[&str] = &["uid", "tmpUID"];

/// Attribute types a component may declare: the defaults plus `component`.
#[must_use]
pub fn valid_types() -> Vec<AttributeType> {
    let mut types = DEFAULT_TYPES.to_vec();
    types.push(AttributeType::Component);
    types
}

/// Attribute schema used for component definitions.
#[must_use]
pub fn component_attribute_schema() -> AttributeSchema {
    AttributeSchema::new(&valid_types(), VALID_RELATIONS, ModelType::Component)
}

/// Dependencies required by the component validators.
#[derive(Clone)]
pub struct ComponentValidationDeps {
    /// Icon and category predicates.
    pub naming: Arc<dyn NamingRules>,
    /// Attribute-schema builder.
    pub attributes: AttributeSchema,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
}

impl ComponentValidationDeps {
    /// Deps using the given naming rules and the component attribute schema.
    #[must_use]
    pub fn new(naming: Arc<dyn NamingRules>) -> Self {
        Self {
            naming,
            attributes: component_attribute_schema(),
            logger: None,
        }
    }

    /// Deps whose naming rules follow `config.naming`.
    #[must_use]
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self::new(naming_rules_from_config(&config.naming))
    }

    /// Attach a logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn LoggerPort>) -> Self {
        self.logger = Some(logger);
        self
    }
}

impl Default for ComponentValidationDeps {
    fn default() -> Self {
        Self::new(Arc::new(DefaultNamingRules))
    }
}

/// Validate a `{component?, components?}` create payload.
pub fn validate_component_input(
    deps: &ComponentValidationDeps,
    data: &Value,
) -> Result<Validated<ComponentRequest>, ValidationError> {
    let mut issues = Issues::new();
    check_request(deps, data, &mut issues);

    if let Some(error) = issues.into_error() {
        if let Some(logger) = deps.logger.as_ref() {
            logger.debug(
                "contentTypeBuilder.component.rejected",
                "Component payload rejected",
                Some(log_fields_rejected(&error)),
            );
        }
        return Err(error);
    }

    serde_json::from_value(data.clone())
        .map(Validated::new)
        .map_err(|error| ValidationError::single(&FieldPath::root(), error.to_string()))
}

/// Validate an update payload after stripping empty attribute defaults.
///
/// Defaults are stripped from `component` and from every `components` entry
/// that already has a `uid`.
pub fn validate_update_component_input(
    deps: &ComponentValidationDeps,
    mut data: Value,
) -> Result<Validated<ComponentRequest>, ValidationError> {
    let mut removed = 0;
    if let Some(component) = data.get_mut("component") {
        removed += remove_empty_defaults(component);
    }
    if let Some(Value::Array(components)) = data.get_mut("components") {
        for entry in components
            .iter_mut()
            .filter(|entry| entry.as_object().is_some_and(|entry| entry.contains_key("uid")))
        {
            removed += remove_empty_defaults(entry);
        }
    }

    if removed > 0
        && let Some(logger) = deps.logger.as_ref()
    {
        let mut fields = LogFields::new();
        fields.insert("removedDefaults".into(), Value::from(removed));
        logger.debug(
            "contentTypeBuilder.component.normalized",
            "Empty attribute defaults removed",
            Some(fields),
        );
    }

    validate_component_input(deps, &data)
}

fn check_request(deps: &ComponentValidationDeps, data: &Value, issues: &mut Issues) {
    let root = FieldPath::root();
    let Some(request) = expect_object(data, &root, issues) else {
        return;
    };
    reject_unknown_keys(request, REQUEST_KEYS, &root, issues);

    if let Some(component) = request.get("component") {
        check_definition(deps, component, false, &root.key("component"), issues);
    }

    let Some(components) = request.get("components") else {
        return;
    };
    let path = root.key("components");
    let Value::Array(entries) = components else {
        issues.push(&path, type_message(&path, "array"));
        return;
    };
    for (index, entry) in entries.iter().enumerate() {
        let entry_path = path.index(index);
        if entry.is_null() {
            issues.push(&entry_path, required_message(&entry_path));
        } else {
            check_definition(deps, entry, true, &entry_path, issues);
        }
    }
}

fn check_definition(
    deps: &ComponentValidationDeps,
    value: &Value,
    nested: bool,
    path: &FieldPath,
    issues: &mut Issues,
) {
    let Some(definition) = expect_object(value, path, issues) else {
        return;
    };

    if nested {
        let allowed: Vec<&str> = DEFINITION_KEYS
            .iter()
            .chain(NESTED_IDENTITY_KEYS)
            .copied()
            .collect();
        reject_unknown_keys(definition, &allowed, path, issues);
    } else {
        reject_unknown_keys(definition, DEFINITION_KEYS, path, issues);
    }

    let name_path = path.key("name");
    match definition.get("name") {
        None | Some(Value::Null) => issues.push(&name_path, "name.required"),
        Some(Value::String(name)) if name.is_empty() => {
            issues.push(&name_path, min_length_message(&name_path, 1));
            issues.push(&name_path, "name.required");
        },
        Some(Value::String(_)) => {},
        Some(_) => issues.push(&name_path, type_message(&name_path, "string")),
    }

    let naming = deps.naming.as_ref();
    check_named(
        definition.get("icon"),
        &path.key("icon"),
        "icon.required",
        |icon| naming.is_valid_icon(icon),
        |field| naming.icon_message(field),
        issues,
    );
    check_named(
        definition.get("category"),
        &path.key("category"),
        "category.required",
        |category| naming.is_valid_category_name(category),
        |field| naming.category_message(field),
        issues,
    );

    optional_string(definition, "description", false, path, issues);
    optional_string(definition, "connection", false, path, issues);
    if let Some(collection_name) = optional_string(definition, "collectionName", true, path, issues)
        && !is_valid_collection_name(collection_name)
    {
        let field = path.key("collectionName");
        issues.push(&field, collection_name_message(&field));
    }

    let attributes_path = path.key("attributes");
    match definition.get("attributes") {
        None | Some(Value::Null) => issues.push(&attributes_path, required_message(&attributes_path)),
        Some(attributes) => deps.attributes.validate(attributes, &attributes_path, issues),
    }

    if nested {
        optional_string(definition, "uid", false, path, issues);
        optional_string(definition, "tmpUID", false, path, issues);
        if definition.contains_key("uid") == definition.contains_key("tmpUID") {
            issues.push(path, UID_OR_TMP_UID_MESSAGE);
        }
    }
}

/// Nullable string that must pass `is_valid` and be non-empty.
fn check_named(
    value: Option<&Value>,
    path: &FieldPath,
    required: &str,
    is_valid: impl Fn(&str) -> bool,
    invalid_message: impl Fn(&FieldPath) -> String,
    issues: &mut Issues,
) {
    match value {
        None | Some(Value::Null) => issues.push(path, required),
        Some(Value::String(text)) => {
            if !is_valid(text) {
                issues.push(path, invalid_message(path));
            }
            if text.is_empty() {
                issues.push(path, required);
            }
        },
        Some(_) => issues.push(path, type_message(path, "string")),
    }
}

fn log_fields_rejected(error: &ValidationError) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("issues".into(), Value::from(error.len()));
    if let Some(first) = error.issues().first() {
        fields.insert("field".into(), Value::from(first.path.as_str()));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_example_is_accepted() -> Result<(), ValidationError> {
        let deps = ComponentValidationDeps::default();
        let request = validate_component_input(
            &deps,
            &json!({
                "component": {
                    "name": "Header",
                    "icon": "valid-icon",
                    "category": "layout",
                    "attributes": {}
                }
            }),
        )?;

        let component = request.component.as_ref().map(|component| component.name.as_str());
        assert_eq!(component, Some("Header"));
        assert!(request.components.is_none());
        Ok(())
    }

    #[test]
    fn required_fields_use_their_keyed_messages() {
        let deps = ComponentValidationDeps::default();
        let error = validate_component_input(
            &deps,
            &json!({"component": {"name": "", "icon": null, "attributes": {}}}),
        )
        .err();

        assert!(matches!(
            error,
            Some(error)
                if error.messages_at("component.name")
                    == vec!["component.name must be at least 1 characters", "name.required"]
                    && error.messages_at("component.icon") == vec!["icon.required"]
                    && error.messages_at("component.category") == vec!["category.required"]
        ));
    }

    #[test]
    fn primary_component_rejects_identity_keys() {
        let deps = ComponentValidationDeps::default();
        let error = validate_component_input(
            &deps,
            &json!({"component": {
                "name": "Hero", "icon": "star", "category": "layout", "attributes": {}, "uid": "layout.hero"
            }}),
        )
        .err();
        assert!(matches!(
            error,
            Some(error) if error.messages_at("component") == vec!["component field has unspecified keys: uid"]
        ));
    }

    #[test]
    fn valid_types_add_component_only() {
        let types = valid_types();
        assert!(types.contains(&AttributeType::Component));
        assert!(!types.contains(&AttributeType::Relation));
        assert_eq!(types.len(), DEFAULT_TYPES.len() + 1);
    }
}
