//! Router and handlers for the postal code distance service.
//!
//! The binary in `main.rs` wires configuration and observability around
//! [`router`]; tests drive the same router with an in-memory provider.

use axum::{Json, Router, extract::State, routing::get};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{info, warn};

use postdist_lib::{BatchDistanceItem, DistanceResult, lookup_batch, lookup_distance};
use postdist_service_shared::{
    ApiError, AppState, BatchDistanceRequest, DistanceRequest, LookupKind, TrackingLayer,
    Validated, handle_panic, metrics_handler, record_batch_size, record_lookup_completed,
    record_lookup_failed, root_status,
};

/// Build the service router.
///
/// Both lookup endpoints read a JSON body on `GET`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_status))
        .route("/distance", get(distance_handler))
        .route("/distance/batch", get(batch_distance_handler))
        .route("/metrics", get(metrics_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TrackingLayer)
        .with_state(state)
}

/// Handle GET /distance requests.
async fn distance_handler(
    State(state): State<AppState>,
    request: Result<Validated<DistanceRequest>, ApiError>,
) -> Result<Json<DistanceResult>, ApiError> {
    let kind = LookupKind::Single;
    let Validated { body, .. } = request.inspect_err(|e| rejected(kind, e))?;

    info!(
        starting = %body.starting_post_code,
        destination = %body.destination_post_code,
        "handling distance request"
    );

    let result = lookup_distance(
        state.provider(),
        &body.starting_post_code,
        &body.destination_post_code,
    )
    .await
    .inspect_err(|e| record_lookup_failed(kind, e.kind()))?;

    record_lookup_completed(kind);
    Ok(Json(result))
}

/// Handle GET /distance/batch requests.
async fn batch_distance_handler(
    State(state): State<AppState>,
    request: Result<Validated<BatchDistanceRequest>, ApiError>,
) -> Result<Json<Vec<BatchDistanceItem>>, ApiError> {
    let kind = LookupKind::Batch;
    let Validated { body, .. } = request.inspect_err(|e| rejected(kind, e))?;

    info!(
        destination = %body.destination_post_code,
        entries = body.starting_post_codes.len(),
        "handling batch distance request"
    );
    record_batch_size(body.starting_post_codes.len());

    let items = lookup_batch(
        state.provider(),
        &body.destination_post_code,
        &body.starting_post_codes,
    )
    .await
    .inspect_err(|e| record_lookup_failed(kind, e.kind()))?;

    record_lookup_completed(kind);
    Ok(Json(items))
}

fn rejected(kind: LookupKind, err: &ApiError) {
    if let ApiError::Validation(issues) = err {
        warn!(issues = issues.len(), "request failed validation");
    }
    record_lookup_failed(kind, err.reason());
}
