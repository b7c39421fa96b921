//! Test utilities for handler testing.
//!
//! This module provides an in-memory [`FakeProvider`] so handlers can be
//! exercised without network access, plus a handful of known postal codes.
//!
//! The fake derives routes from coordinates: every 0.01 degree of longitude
//! plus latitude difference is one kilometer, driven at 10 m/s.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use postdist_lib::{Coordinates, DistanceProvider, DistanceResult, Error, Result};

use crate::state::AppState;

/// Meters per degree used by the fake router.
const METERS_PER_DEGREE: f64 = 100_000.0;

/// Speed used by the fake router, in meters per second.
const METERS_PER_SECOND: f64 = 10.0;

/// Known postal codes registered by [`FakeProvider::with_fixtures`].
pub mod fixture_post_codes {
    /// Destination used by most tests, at the origin.
    pub const DESTINATION: &str = "EC1A 1BB";

    /// 1 km from [`DESTINATION`].
    pub const ONE_KM: &str = "N1 9GU";

    /// 500 m from [`DESTINATION`].
    pub const HALF_KM: &str = "EC2A 4NE";

    /// 100 km from [`DESTINATION`].
    pub const HUNDRED_KM: &str = "CB2 1TN";

    /// Geocodes to nothing.
    pub const UNKNOWN: &str = "ZZ99 9ZZ";
}

/// In-memory [`DistanceProvider`] that counts its calls.
#[derive(Debug, Default)]
pub struct FakeProvider {
    post_codes: HashMap<String, Coordinates>,
    failing: HashSet<String>,
    no_route: bool,
    resolve_calls: AtomicUsize,
    route_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that knows every code in [`fixture_post_codes`] except `UNKNOWN`.
    pub fn with_fixtures() -> Self {
        use fixture_post_codes::*;

        Self::new()
            .with_post_code(DESTINATION, Coordinates::new(0.0, 0.0))
            .with_post_code(ONE_KM, Coordinates::new(0.01, 0.0))
            .with_post_code(HALF_KM, Coordinates::new(0.0, 0.005))
            .with_post_code(HUNDRED_KM, Coordinates::new(0.5, 0.5))
    }

    /// Register a postal code and the coordinates it resolves to.
    pub fn with_post_code(mut self, post_code: &str, coordinates: Coordinates) -> Self {
        self.post_codes.insert(post_code.to_string(), coordinates);
        self
    }

    /// Make geocoding of `post_code` return no candidates.
    pub fn with_no_candidates(mut self, post_code: &str) -> Self {
        self.post_codes.remove(post_code);
        self
    }

    /// Make geocoding of `post_code` fail as if the provider answered 500.
    pub fn with_provider_failure(mut self, post_code: &str) -> Self {
        self.failing.insert(post_code.to_string());
        self
    }

    /// Make every directions call return zero routes.
    pub fn without_routes(mut self) -> Self {
        self.no_route = true;
        self
    }

    /// Number of `resolve_coordinates` calls so far.
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Number of `compute_distance` calls so far.
    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DistanceProvider for FakeProvider {
    async fn resolve_coordinates(&self, post_code: &str) -> Result<Coordinates> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(post_code) {
            return Err(Error::ProviderStatus {
                operation: "geocode",
                status: 500,
                body: "fake provider failure".to_string(),
            });
        }

        self.post_codes
            .get(post_code)
            .copied()
            .ok_or_else(|| Error::NoCandidates {
                post_code: post_code.to_string(),
            })
    }

    async fn compute_distance(
        &self,
        start: Coordinates,
        destination: Coordinates,
    ) -> Result<DistanceResult> {
        self.route_calls.fetch_add(1, Ordering::SeqCst);

        if self.no_route {
            return Err(Error::NoRoute { start, destination });
        }

        let degrees = (start.longitude() - destination.longitude()).abs()
            + (start.latitude() - destination.latitude()).abs();
        let meters = degrees * METERS_PER_DEGREE;
        Ok(DistanceResult::from_route(meters, meters / METERS_PER_SECOND))
    }
}

/// Wrap a provider in application state, keeping a handle for call counts.
pub fn test_state(provider: Arc<FakeProvider>) -> AppState {
    AppState::from_provider(provider)
}
