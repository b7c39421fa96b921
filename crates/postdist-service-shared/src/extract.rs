//! Request validation extractor.
//!
//! [`Validated`] applies one schema to each part of a request: the JSON body,
//! the path parameters, and the query string, in that order. Parts without a
//! schema use [`Unchecked`]. The first part that fails stops the extraction and
//! the handler never runs:
//!
//! - schema issues reject with [`ApiError::Validation`] (422 with the issue list);
//! - a body that cannot be read or parsed rejects with
//!   [`ApiError::MalformedRequest`], which goes to the generic 500 responder.
//!
//! A body is parsed only when the request declares a JSON content type and is
//! non-empty; otherwise it is validated as `{}` so missing fields are reported
//! as issues.
//!
//! ```ignore
//! use postdist_service_shared::{DistanceRequest, Validated};
//!
//! async fn handler(Validated { body, .. }: Validated<DistanceRequest>) {
//!     // body is a fully checked DistanceRequest
//! }
//! ```

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::RawPathParamsRejection, FromRequest, FromRequestParts, Query, RawPathParams,
        Request,
    },
    http::{header, HeaderMap},
};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::request::{Unchecked, Validate};

/// Validated request parts, produced by the extractor of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<B = Unchecked, P = Unchecked, Q = Unchecked> {
    pub body: B,
    pub params: P,
    pub query: Q,
}

impl<S, B, P, Q> FromRequest<S> for Validated<B, P, Q>
where
    S: Send + Sync,
    B: Validate + Send,
    P: Validate + Send,
    Q: Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = match RawPathParams::from_request_parts(&mut parts, state).await {
            Ok(params) => params
                .iter()
                .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
                .collect(),
            Err(RawPathParamsRejection::MissingPathParams(_)) => Map::new(),
            Err(rejection) => return Err(ApiError::MalformedRequest(rejection.body_text())),
        };

        let query: Map<String, Value> =
            match Query::<HashMap<String, String>>::try_from_uri(&parts.uri) {
                Ok(Query(pairs)) => pairs
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
                Err(rejection) => return Err(ApiError::MalformedRequest(rejection.body_text())),
            };

        let is_json = has_json_content_type(&parts.headers);
        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|rejection| ApiError::MalformedRequest(rejection.body_text()))?;
        let raw_body = parse_body(is_json, &bytes)?;

        let body = B::validate(&raw_body).map_err(ApiError::Validation)?;
        let params = P::validate(&Value::Object(params)).map_err(ApiError::Validation)?;
        let query = Q::validate(&Value::Object(query)).map_err(ApiError::Validation)?;

        Ok(Self {
            body,
            params,
            query,
        })
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

fn parse_body(is_json: bool, bytes: &[u8]) -> Result<Value, ApiError> {
    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedRequest(e.to_string()))
}
