//! Shared infrastructure for the postal code distance HTTP service.
//!
//! This crate provides the HTTP glue around `postdist-lib`:
//!
//! - [`AppState`]: The injected distance provider shared by all handlers
//! - [`ServiceConfig`]: Environment-driven startup configuration
//! - [`Validated`]: Request extractor applying schemas to body, params and query
//! - [`ApiError`]: 422 issue lists and the generic 500 response
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - [`root_status`]: The `GET /` liveness handler
//!
//! # Architecture
//!
//! Handlers stay thin. All geocoding and routing logic lives in
//! `postdist-lib`; this crate only turns requests into library calls and
//! library results into responses:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Validate body / params / query                           │
//! │  - Call postdist-lib lookups                                │
//! │  - Serialize the result or map the error                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides an in-memory provider for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

pub mod config;
mod error;
mod extract;
pub mod issue;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod state;
mod status;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use error::{handle_panic, internal_error_response, ApiError, ErrorBody, INTERNAL_ERROR_MESSAGE};
pub use extract::Validated;
pub use issue::{IssueCode, ObjectSchema, PathSegment, ValidationIssue};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_batch_size, record_lookup_completed,
    record_lookup_failed, LookupKind, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId, TrackingLayer};
pub use request::{BatchDistanceRequest, DistanceRequest, Unchecked, Validate};
pub use state::{AppState, AppStateError};
pub use status::{root_status, ServiceStatus};
