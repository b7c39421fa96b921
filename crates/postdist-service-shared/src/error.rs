//! Error responses for the HTTP service.
//!
//! Validation failures become 422 responses carrying the issue list. Every
//! other failure is logged with its cause and answered with the same generic
//! 500 body, so callers never see provider details.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use postdist_lib::Error as LibError;

use crate::issue::ValidationIssue;

/// Body message for every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Unable to process request.";

/// JSON body of a generic failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn internal() -> Self {
        Self {
            message: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Any failure a handler or extractor can produce.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed schema checks; answered with 422.
    #[error("request validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// The request could not be read at all (e.g. a body that is not JSON).
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Geocoding or routing failed.
    #[error(transparent)]
    Lookup(#[from] LibError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short failure label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::MalformedRequest(_) => "malformed_request",
            ApiError::Lookup(err) => err.kind(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(issues) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(issues)).into_response()
            }
            other => {
                tracing::error!(error = %other, reason = other.reason(), "unable to process request");
                internal_error_response()
            }
        }
    }
}

/// The generic 500 response.
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::internal()),
    )
        .into_response()
}

/// Panic handler for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "handler panicked");
    internal_error_response()
}
