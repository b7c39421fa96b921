//! Root status handler.
//!
//! `GET /` answers with a fixed message and the current server time so that
//! load balancers and humans can tell the process is up.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Message returned by the root endpoint.
pub const RUNNING_MESSAGE: &str = "Serving running";

/// Root endpoint response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    /// RFC 3339 UTC timestamp taken when the response was built.
    pub date: String,
}

impl ServiceStatus {
    pub fn now() -> Self {
        Self {
            message: RUNNING_MESSAGE.to_string(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Root handler.
///
/// ```text
/// GET /
/// {"message":"Serving running","date":"2026-01-30T10:00:00.000Z"}
/// ```
pub async fn root_status() -> impl IntoResponse {
    (StatusCode::OK, Json(ServiceStatus::now()))
}
