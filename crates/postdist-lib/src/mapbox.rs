//! Mapbox implementation of [`DistanceProvider`].
//!
//! Two endpoints are consumed:
//!
//! - `GET {base}/search/geocode/v6/forward?q={post_code}` for forward geocoding
//! - `GET {base}/directions/v5/mapbox/driving/{lon},{lat};{lon},{lat}` for driving routes
//!
//! Every call carries the account token as the `access_token` query parameter.
//! Only the first feature and the first route are used; an empty list is
//! reported as [`Error::NoCandidates`] or [`Error::NoRoute`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Coordinates, DistanceResult};
use crate::provider::DistanceProvider;

/// Public Mapbox API host.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

const GEOCODE_PATH: &str = "/search/geocode/v6/forward";
const DIRECTIONS_PATH: &str = "/directions/v5/mapbox/driving";
const MAX_ERROR_BODY: usize = 200;

/// Connection settings for [`MapboxClient`].
#[derive(Clone)]
pub struct MapboxConfig {
    /// Scheme and host of the API, without a trailing path.
    pub base_url: String,
    /// Account access token.
    pub access_token: String,
    /// Timeout applied to each outbound request.
    pub timeout: Duration,
}

impl MapboxConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for MapboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the Mapbox geocoding and directions APIs.
///
/// Cheap to share behind an `Arc`; the inner `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct MapboxClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl MapboxClient {
    /// Build a client from configuration.
    ///
    /// Fails if the token is empty or the HTTP client cannot be constructed.
    pub fn new(config: MapboxConfig) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "access token must not be empty".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(operation, path, "calling provider");

        let response = self
            .http
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ProviderStatus {
                operation,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl fmt::Debug for MapboxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DistanceProvider for MapboxClient {
    async fn resolve_coordinates(&self, post_code: &str) -> Result<Coordinates> {
        let parsed: GeocodeResponse = self
            .get_json("geocode", GEOCODE_PATH, &[("q", post_code)])
            .await?;

        let feature = parsed
            .features
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoCandidates {
                post_code: post_code.to_string(),
            })?;

        debug!(post_code, coordinates = %feature.geometry.coordinates, "resolved postal code");
        Ok(feature.geometry.coordinates)
    }

    async fn compute_distance(
        &self,
        start: Coordinates,
        destination: Coordinates,
    ) -> Result<DistanceResult> {
        let path = format!("{DIRECTIONS_PATH}/{start};{destination}");
        let parsed: DirectionsResponse = self
            .get_json(
                "directions",
                &path,
                &[
                    ("geometries", "geojson"),
                    ("language", "en"),
                    ("overview", "full"),
                    ("steps", "true"),
                ],
            )
            .await?;

        let route = parsed
            .routes
            .into_iter()
            .next()
            .ok_or(Error::NoRoute { start, destination })?;

        Ok(DistanceResult::from_route(route.distance, route.duration))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Coordinates,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

/// Only the summary figures are read; geometry and steps are ignored.
#[derive(Debug, Deserialize)]
struct Route {
    distance: f64,
    duration: f64,
}

fn user_agent() -> String {
    format!("postdist-lib/{}", env!("CARGO_PKG_VERSION"))
}

/// Cut `body` to at most `MAX_ERROR_BODY` bytes, backing off to a char boundary.
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }

    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const TOKEN: &str = "test-token";

    fn client_for(server: &MockServer) -> MapboxClient {
        let config = MapboxConfig::new(TOKEN)
            .with_base_url(server.base_url())
            .with_timeout(Duration::from_secs(5));
        MapboxClient::new(config).unwrap()
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = MapboxClient::new(MapboxConfig::new("  ")).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = MapboxConfig::new("sk.secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk.secret"));

        let client = MapboxClient::new(config).unwrap();
        assert!(!format!("{:?}", client).contains("sk.secret"));
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), MAX_ERROR_BODY + 3);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_counts_bytes_not_chars() {
        // 100 three-byte chars; byte 200 falls inside one
        let wide = "\u{20ac}".repeat(100);
        let truncated = truncate_body(&wide);
        assert_eq!(truncated.len(), 198 + 3);
        assert!(truncated.starts_with(&"\u{20ac}".repeat(66)));

        let exact = "y".repeat(MAX_ERROR_BODY);
        assert_eq!(truncate_body(&exact), exact);
    }

    #[tokio::test]
    async fn resolve_takes_first_feature() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search/geocode/v6/forward")
                .query_param("q", "EC1A1BB")
                .query_param("access_token", TOKEN);
            then.status(200).json_body(json!({
                "type": "FeatureCollection",
                "features": [
                    { "geometry": { "coordinates": [-0.0977, 51.5202] } },
                    { "geometry": { "coordinates": [10.0, 20.0] } }
                ]
            }));
        });

        let coords = client_for(&server)
            .resolve_coordinates("EC1A1BB")
            .await
            .unwrap();

        assert_eq!(coords, Coordinates::new(-0.0977, 51.5202));
        mock.assert();
    }

    #[tokio::test]
    async fn resolve_without_features_is_no_candidates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/geocode/v6/forward");
            then.status(200)
                .json_body(json!({ "type": "FeatureCollection", "features": [] }));
        });

        let err = client_for(&server)
            .resolve_coordinates("ZZ99")
            .await
            .unwrap_err();

        match err {
            Error::NoCandidates { post_code } => assert_eq!(post_code, "ZZ99"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_provider_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/geocode/v6/forward");
            then.status(401).body("{\"message\":\"Not Authorized - Invalid Token\"}");
        });

        let err = client_for(&server)
            .resolve_coordinates("EC1A1BB")
            .await
            .unwrap_err();

        match err {
            Error::ProviderStatus {
                operation,
                status,
                body,
            } => {
                assert_eq!(operation, "geocode");
                assert_eq!(status, 401);
                assert!(body.contains("Invalid Token"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/geocode/v6/forward");
            then.status(200)
                .header("content-type", "application/json")
                .body("this is not json");
        });

        let err = client_for(&server)
            .resolve_coordinates("EC1A1BB")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.kind(), "provider");
    }

    #[tokio::test]
    async fn compute_distance_uses_first_route() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/directions/v5/mapbox/driving/-0.1,51.5;-0.2,51.6")
                .query_param("access_token", TOKEN)
                .query_param("geometries", "geojson")
                .query_param("language", "en")
                .query_param("overview", "full")
                .query_param("steps", "true");
            then.status(200).json_body(json!({
                "code": "Ok",
                "routes": [
                    { "distance": 4321.0, "duration": 3661.0, "geometry": {} },
                    { "distance": 1.0, "duration": 1.0 }
                ]
            }));
        });

        let result = client_for(&server)
            .compute_distance(Coordinates::new(-0.1, 51.5), Coordinates::new(-0.2, 51.6))
            .await
            .unwrap();

        assert_eq!(result.distance, "4.32 km");
        assert_eq!(result.duration, "1h 1m");
        mock.assert();
    }

    #[tokio::test]
    async fn compute_distance_without_routes_is_no_route() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/directions/v5/mapbox/driving/-0.1,51.5;-0.2,51.6");
            then.status(200)
                .json_body(json!({ "code": "NoRoute", "routes": [] }));
        });

        let err = client_for(&server)
            .compute_distance(Coordinates::new(-0.1, 51.5), Coordinates::new(-0.2, 51.6))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoRoute { .. }));
    }
}
