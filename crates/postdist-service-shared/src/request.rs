//! Request types and validation for HTTP endpoints.

use serde_json::Value;

use crate::issue::{ObjectSchema, ValidationIssue};

/// Validation trait for request types.
///
/// Implementations check a raw JSON value against their schema and either
/// build the typed request or return every issue found. Unknown keys are
/// always an issue.
pub trait Validate: Sized {
    fn validate(raw: &Value) -> Result<Self, Vec<ValidationIssue>>;
}

/// Placeholder for a request part that has no schema; accepts anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unchecked;

impl Validate for Unchecked {
    fn validate(_raw: &Value) -> Result<Self, Vec<ValidationIssue>> {
        Ok(Unchecked)
    }
}

/// Request for the distance between two postal codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceRequest {
    /// Postal code the journey starts from.
    pub starting_post_code: String,

    /// Postal code the journey ends at.
    pub destination_post_code: String,
}

impl Validate for DistanceRequest {
    fn validate(raw: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let mut schema = ObjectSchema::new(raw)?;
        let starting = schema.required_string("starting_post_code");
        let destination = schema.required_string("destination_post_code");

        schema.finish(starting.zip(destination).map(
            |(starting_post_code, destination_post_code)| Self {
                starting_post_code,
                destination_post_code,
            },
        ))
    }
}

/// Request for the distance from many starting postal codes to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDistanceRequest {
    /// Shared destination postal code.
    pub destination_post_code: String,

    /// Starting postal codes, answered in this order. May be empty.
    pub starting_post_codes: Vec<String>,
}

impl Validate for BatchDistanceRequest {
    fn validate(raw: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let mut schema = ObjectSchema::new(raw)?;
        let destination = schema.required_string("destination_post_code");
        let starting = schema.required_string_list("starting_post_codes");

        schema.finish(destination.zip(starting).map(
            |(destination_post_code, starting_post_codes)| Self {
                destination_post_code,
                starting_post_codes,
            },
        ))
    }
}
