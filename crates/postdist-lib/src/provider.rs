use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Coordinates, DistanceResult};

/// A geocoding and routing backend.
///
/// Both operations are independent outbound calls; implementations hold no
/// per-request state and never cache results.
#[async_trait]
pub trait DistanceProvider: Send + Sync + Debug {
    /// Forward-geocode a postal code, taking the first candidate returned.
    async fn resolve_coordinates(&self, post_code: &str) -> Result<Coordinates>;

    /// Compute the driving distance and duration between two points.
    async fn compute_distance(
        &self,
        start: Coordinates,
        destination: Coordinates,
    ) -> Result<DistanceResult>;
}
