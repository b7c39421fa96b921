//! Application state for the HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the distance provider.

use std::sync::Arc;

use postdist_lib::{DistanceProvider, Error as LibError, MapboxClient};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to build the provider client.
    ProviderInit(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProviderInit(e) => write!(f, "failed to initialize distance provider: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ProviderInit(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::ProviderInit(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The provider is injected rather than
/// global so tests can substitute a fake.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use postdist_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let provider = state.provider();
///     // ... resolve postal codes
/// }
///
/// let state = AppState::from_config(&config).unwrap();
/// let app = Router::new()
///     .route("/distance", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    provider: Arc<dyn DistanceProvider>,
}

impl AppState {
    /// Build the production state: a Mapbox client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppStateError> {
        tracing::info!(base_url = %config.provider.base_url, "initializing mapbox client");
        let client = MapboxClient::new(config.provider.clone())?;
        Ok(Self::from_provider(Arc::new(client)))
    }

    /// Create application state around an existing provider.
    ///
    /// This is useful for testing with an in-memory provider.
    pub fn from_provider(provider: Arc<dyn DistanceProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { provider }),
        }
    }

    /// Access the distance provider.
    pub fn provider(&self) -> &dyn DistanceProvider {
        self.inner.provider.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.inner.provider)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postdist_lib::MapboxConfig;

    fn config_with_token(token: &str) -> ServiceConfig {
        ServiceConfig {
            port: 3000,
            provider: MapboxConfig::new(token),
        }
    }

    #[test]
    fn test_app_state_from_config() {
        let state = AppState::from_config(&config_with_token("pk.test")).unwrap();
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("MapboxClient"));
        assert!(!debug.contains("pk.test"));
    }

    #[test]
    fn test_app_state_clone_shares_provider() {
        let state1 = AppState::from_config(&config_with_token("pk.test")).unwrap();
        let state2 = state1.clone();

        assert!(Arc::ptr_eq(&state1.inner, &state2.inner));
    }

    #[test]
    fn test_app_state_rejects_empty_token() {
        let err = AppState::from_config(&config_with_token("")).unwrap_err();
        assert!(err.to_string().contains("failed to initialize distance provider"));
    }
}
