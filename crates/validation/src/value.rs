//! Field-level checks over untyped JSON payloads.
//!
//! Every helper records problems on the shared [`Issues`] collector and keeps
//! going, so one walk of a payload reports every violation it contains.

use cms_admin_domain::integral;
use cms_admin_shared::{FieldPath, Issues};
use serde_json::{Map, Value};

pub(crate) fn required_message(path: &FieldPath) -> String {
    format!("{path} is a required field")
}

pub(crate) fn type_message(path: &FieldPath, expected: &str) -> String {
    format!("{path} must be a `{expected}` type")
}

pub(crate) fn min_length_message(path: &FieldPath, min: usize) -> String {
    format!("{path} must be at least {min} characters")
}

pub(crate) fn min_items_message(path: &FieldPath, min: usize) -> String {
    format!("{path} field must have at least {min} items")
}

pub(crate) fn one_of_message(path: &FieldPath, values: &[&str]) -> String {
    format!(
        "{path} must be one of the following values: {}",
        values.join(", ")
    )
}

/// Borrow `value` as an object, recording a type issue otherwise.
pub(crate) fn expect_object<'a>(
    value: &'a Value,
    path: &FieldPath,
    issues: &mut Issues,
) -> Option<&'a Map<String, Value>> {
    if let Value::Object(object) = value {
        Some(object)
    } else {
        issues.push(path, type_message(path, "object"));
        None
    }
}

/// Record one issue listing every key of `object` outside `allowed`.
pub(crate) fn reject_unknown_keys(
    object: &Map<String, Value>,
    allowed: &[&str],
    path: &FieldPath,
    issues: &mut Issues,
) {
    let unknown: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed.contains(key))
        .collect();
    if !unknown.is_empty() {
        issues.push(
            path,
            format!("{path} field has unspecified keys: {}", unknown.join(", ")),
        );
    }
}

/// Optional string member. `null` is accepted only when `nullable`.
pub(crate) fn optional_string<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    nullable: bool,
    path: &FieldPath,
    issues: &mut Issues,
) -> Option<&'a str> {
    match object.get(key)? {
        Value::String(text) => Some(text),
        Value::Null if nullable => None,
        _ => {
            issues.push(&path.key(key), type_message(&path.key(key), "string"));
            None
        },
    }
}

/// Optional boolean member.
pub(crate) fn optional_bool(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    issues: &mut Issues,
) -> Option<bool> {
    match object.get(key)? {
        Value::Bool(flag) => Some(*flag),
        _ => {
            issues.push(&path.key(key), type_message(&path.key(key), "boolean"));
            None
        },
    }
}

/// Optional object member.
pub(crate) fn optional_object<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &FieldPath,
    issues: &mut Issues,
) -> Option<&'a Map<String, Value>> {
    let value = object.get(key)?;
    expect_object(value, &path.key(key), issues)
}

/// Optional numeric member.
pub(crate) fn optional_number(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    issues: &mut Issues,
) -> Option<f64> {
    match object.get(key)? {
        Value::Number(number) => number.as_f64(),
        _ => {
            issues.push(&path.key(key), type_message(&path.key(key), "number"));
            None
        },
    }
}

/// Optional integer member that must be `>= 0`.
pub(crate) fn optional_non_negative_integer(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    issues: &mut Issues,
) -> Option<i64> {
    let field = path.key(key);
    let Value::Number(number) = object.get(key)? else {
        issues.push(&field, type_message(&field, "number"));
        return None;
    };
    let Some(integer) = integral(number) else {
        issues.push(&field, format!("{field} must be an integer"));
        return None;
    };
    if integer < 0 {
        issues.push(&field, format!("{field} must be greater than or equal to 0"));
        return None;
    }
    Some(integer)
}

/// Record `<max> must be greater or equal to <min>` when both bounds are set.
pub(crate) fn check_bounds<T: PartialOrd>(
    min: Option<T>,
    max: Option<T>,
    min_key: &str,
    max_key: &str,
    path: &FieldPath,
    issues: &mut Issues,
) {
    if let (Some(min), Some(max)) = (min, max)
        && max < min
    {
        let field = path.key(max_key);
        issues.push(&field, format!("{field} must be greater or equal to {min_key}"));
    }
}
