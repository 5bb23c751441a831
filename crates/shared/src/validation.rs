//! Field-scoped validation issues with collect-all semantics.
//!
//! Validators never stop at the first problem: each rule pushes onto an
//! [`Issues`] collector and the request is accepted only when the collector is
//! still empty at the end.

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Dotted/indexed path of a field inside a request payload
/// (`components[1].attributes.title.type`).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// Path of the payload itself.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Path of an object member.
    #[must_use]
    pub fn key(&self, key: &str) -> Self {
        if self.0.is_empty() {
            Self(key.to_owned())
        } else {
            Self(format!("{}.{key}", self.0))
        }
    }

    /// Path of an array element.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{index}]", self.0))
    }

    /// Returns true for the payload root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw path string (empty for the root).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Renders the path the way it appears in messages; the root reads as `this`.
impl fmt::Display for FieldPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            formatter.write_str("this")
        } else {
            formatter.write_str(&self.0)
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Field that failed validation.
    pub path: FieldPath,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.path, self.message)
    }
}

/// Complete report for a rejected request. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", summarize(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    match issues {
        [single] => single.message.clone(),
        many => format!("{} errors occurred", many.len()),
    }
}

impl ValidationError {
    /// Build a report holding one issue.
    pub fn single(path: &FieldPath, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                path: path.clone(),
                message: message.into(),
            }],
        }
    }

    /// Issues in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if any issue targets `path`.
    #[must_use]
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path.as_str() == path)
    }

    /// Messages recorded for `path`.
    #[must_use]
    pub fn messages_at(&self, path: &str) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.path.as_str() == path)
            .map(|issue| issue.message.as_str())
            .collect()
    }

    /// Group messages by field path (response body shape for HTTP callers).
    #[must_use]
    pub fn to_field_map(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for issue in &self.issues {
            map.entry(issue.path.as_str().to_owned())
                .or_default()
                .push(issue.message.clone());
        }
        map
    }
}

/// Collector used while walking a payload.
#[derive(Debug, Default)]
pub struct Issues {
    issues: Vec<FieldIssue>,
}

impl Issues {
    /// Create an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Record an issue.
    pub fn push(&mut self, path: &FieldPath, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: path.clone(),
            message: message.into(),
        });
    }

    /// Returns true while nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of recorded issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Accept `value` if no issue was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }

    /// Convert into an error if anything was recorded.
    #[must_use]
    pub fn into_error(self) -> Option<ValidationError> {
        if self.issues.is_empty() {
            None
        } else {
            Some(ValidationError {
                issues: self.issues,
            })
        }
    }
}
