//! Postal code driving distance HTTP service.
//!
//! Resolves UK-style postal codes to coordinates and reports the driving
//! duration and distance between them.
//!
//! # Endpoints
//!
//! - `GET /` - Liveness message with the server time
//! - `GET /distance` - Distance between two postal codes (JSON body)
//! - `GET /distance/batch` - Distances from many postal codes to one destination (JSON body)
//! - `GET /metrics` - Prometheus metrics endpoint
//!
//! # Configuration
//!
//! - `MAPBOX_ACCESS_TOKEN` - Provider access token (required)
//! - `MAPBOX_BASE_URL` - Provider base URL (default: https://api.mapbox.com)
//! - `PROVIDER_TIMEOUT_SECS` - Outbound request timeout (default: 30)
//! - `PORT` - HTTP port (default: 3000)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Install the Prometheus recorder (default: true)

use tracing::{error, info};

use postdist_service::router;
use postdist_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("postdist");
    init_logging(&logging_config)?;

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env().inspect_err(|e| {
        error!(error = %e, "invalid configuration");
    })?;

    info!(
        port = config.port,
        base_url = %config.provider.base_url,
        timeout_secs = config.provider.timeout.as_secs(),
        "starting distance service"
    );

    let state = AppState::from_config(&config).inspect_err(|e| {
        error!(error = %e, "failed to build application state");
    })?;

    let app = router(state);

    let addr = config.listen_addr();
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
