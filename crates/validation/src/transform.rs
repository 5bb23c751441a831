//! Pre-validation normalization for component updates.

use serde_json::Value;

/// Default value the admin UI sends for an attribute left blank.
pub const EMPTY_DEFAULT: &str = "";

/// Drop every attribute `default` equal to [`EMPTY_DEFAULT`].
///
/// Walks `definition.attributes`; anything that is not an object is left
/// untouched for the validator to report. Returns the number of removed keys.
pub fn remove_empty_defaults(definition: &mut Value) -> usize {
    let Some(attributes) = definition
        .get_mut("attributes")
        .and_then(Value::as_object_mut)
    else {
        return 0;
    };

    let mut removed = 0;
    for attribute in attributes.values_mut() {
        let Some(options) = attribute.as_object_mut() else {
            continue;
        };
        if options.get("default").and_then(Value::as_str) == Some(EMPTY_DEFAULT) {
            options.remove("default");
            removed += 1;
        }
    }
    removed
}
