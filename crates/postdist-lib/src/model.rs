//! Request-scoped domain values shared by the provider adapter and lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{format_distance, format_duration};

/// A `(longitude, latitude)` pair as produced by forward geocoding.
///
/// Serializes as a two-element array, the same shape the provider uses for
/// GeoJSON point geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates(pub f64, pub f64);

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self(longitude, latitude)
    }

    pub fn longitude(&self) -> f64 {
        self.0
    }

    pub fn latitude(&self) -> f64 {
        self.1
    }
}

/// Renders as `lon,lat`, the waypoint syntax of the directions API.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// Human-readable driving duration and distance between two points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub duration: String,
    pub distance: String,
}

impl DistanceResult {
    /// Build a result from the provider's raw route figures.
    ///
    /// `seconds` is rounded to the nearest whole second before formatting.
    pub fn from_route(meters: f64, seconds: f64) -> Self {
        let seconds = if seconds.is_finite() && seconds > 0.0 {
            seconds.round() as u64
        } else {
            0
        };

        Self {
            duration: format_duration(seconds),
            distance: format_distance(meters),
        }
    }
}

/// One entry of a batch lookup, in the same position as its starting postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDistanceItem {
    pub post_code: String,
    pub starting_coordinates: Coordinates,
    pub destination_coordinates: Coordinates,
    pub duration: String,
    pub distance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_serialize_as_array() {
        let coords = Coordinates::new(-0.1416, 51.501);
        let json = serde_json::to_string(&coords).unwrap();
        assert_eq!(json, "[-0.1416,51.501]");

        let parsed: Coordinates = serde_json::from_str("[2.35,48.85]").unwrap();
        assert_eq!(parsed.longitude(), 2.35);
        assert_eq!(parsed.latitude(), 48.85);
    }

    #[test]
    fn coordinates_display_as_waypoint() {
        assert_eq!(Coordinates::new(-0.1, 51.5).to_string(), "-0.1,51.5");
    }

    #[test]
    fn from_route_rounds_seconds() {
        let result = DistanceResult::from_route(1234.0, 3660.6);
        assert_eq!(result.duration, "1h 1m");
        assert_eq!(result.distance, "1.23 km");
    }

    #[test]
    fn from_route_clamps_negative_duration() {
        let result = DistanceResult::from_route(10.0, -5.0);
        assert_eq!(result.duration, "0m");
        assert_eq!(result.distance, "10 m");
    }

    #[test]
    fn batch_item_field_names() {
        let item = BatchDistanceItem {
            post_code: "EC1A 1BB".to_string(),
            starting_coordinates: Coordinates::new(-0.1, 51.5),
            destination_coordinates: Coordinates::new(-0.2, 51.6),
            duration: "12m".to_string(),
            distance: "4.10 km".to_string(),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["post_code"], "EC1A 1BB");
        assert_eq!(value["starting_coordinates"], serde_json::json!([-0.1, 51.5]));
        assert_eq!(value["destination_coordinates"], serde_json::json!([-0.2, 51.6]));
    }
}
