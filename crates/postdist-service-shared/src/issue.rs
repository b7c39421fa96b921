//! Structured validation issues and a strict JSON object checker.
//!
//! Issues serialize as `{"code", "path", "message"}` objects (plus `keys` for
//! unrecognized keys) and are returned to the client as a 422 body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message used for empty strings in required fields.
pub const REQUIRED_MESSAGE: &str = "This is required";

/// Category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// A field is missing or has the wrong JSON type.
    InvalidType,
    /// A string is shorter than its minimum length.
    TooSmall,
    /// The object contains keys the schema does not declare.
    UnrecognizedKeys,
}

/// One step of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
            keys: Vec::new(),
        }
    }

    /// A required field is absent.
    pub fn required(path: Vec<PathSegment>) -> Self {
        Self::new(IssueCode::InvalidType, path, "Required")
    }

    /// A value has the wrong JSON type.
    pub fn invalid_type(path: Vec<PathSegment>, expected: &str, received: &Value) -> Self {
        Self::new(
            IssueCode::InvalidType,
            path,
            format!("Expected {}, received {}", expected, json_type(received)),
        )
    }

    /// An object carries keys outside its schema.
    pub fn unrecognized_keys(path: Vec<PathSegment>, keys: Vec<String>) -> Self {
        let listed = keys
            .iter()
            .map(|k| format!("'{}'", k))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            code: IssueCode::UnrecognizedKeys,
            path,
            message: format!("Unrecognized key(s) in object: {}", listed),
            keys,
        }
    }
}

/// Name of a JSON value's type as used in issue messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Strict checker for a top-level JSON object.
///
/// Each `required_*` call declares a key and records any issue for it. Keys
/// present in the object but never declared are reported by [`finish`](Self::finish).
#[derive(Debug)]
pub struct ObjectSchema<'a> {
    fields: &'a Map<String, Value>,
    declared: Vec<&'static str>,
    issues: Vec<ValidationIssue>,
}

impl<'a> ObjectSchema<'a> {
    /// Start checking `raw`, which must be a JSON object.
    pub fn new(raw: &'a Value) -> Result<Self, Vec<ValidationIssue>> {
        match raw {
            Value::Object(fields) => Ok(Self {
                fields,
                declared: Vec::new(),
                issues: Vec::new(),
            }),
            other => Err(vec![ValidationIssue::invalid_type(
                Vec::new(),
                "object",
                other,
            )]),
        }
    }

    /// Declare a required, non-empty string field.
    pub fn required_string(&mut self, key: &'static str) -> Option<String> {
        let fields = self.fields;
        self.declared.push(key);
        match fields.get(key) {
            None => {
                self.issues.push(ValidationIssue::required(vec![key.into()]));
                None
            }
            Some(value) => non_empty_string(value, vec![key.into()], &mut self.issues),
        }
    }

    /// Declare a required array of non-empty strings. An empty array is valid.
    pub fn required_string_list(&mut self, key: &'static str) -> Option<Vec<String>> {
        let fields = self.fields;
        self.declared.push(key);
        match fields.get(key) {
            None => {
                self.issues.push(ValidationIssue::required(vec![key.into()]));
                None
            }
            Some(Value::Array(items)) => {
                let before = self.issues.len();
                let values: Vec<String> = items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| {
                        non_empty_string(item, vec![key.into(), index.into()], &mut self.issues)
                    })
                    .collect();
                (self.issues.len() == before).then_some(values)
            }
            Some(other) => {
                self.issues
                    .push(ValidationIssue::invalid_type(vec![key.into()], "array", other));
                None
            }
        }
    }

    /// Report undeclared keys and return `value` if no issue was recorded.
    pub fn finish<T>(mut self, value: Option<T>) -> Result<T, Vec<ValidationIssue>> {
        let unknown: Vec<String> = self
            .fields
            .keys()
            .filter(|k| !self.declared.iter().any(|d| *d == k.as_str()))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            self.issues
                .push(ValidationIssue::unrecognized_keys(Vec::new(), unknown));
        }

        match value {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => Err(self.issues),
        }
    }
}

fn non_empty_string(
    value: &Value,
    path: Vec<PathSegment>,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => {
            issues.push(ValidationIssue::new(IssueCode::TooSmall, path, REQUIRED_MESSAGE));
            None
        }
        Value::String(s) => Some(s.clone()),
        other => {
            issues.push(ValidationIssue::invalid_type(path, "string", other));
            None
        }
    }
}
