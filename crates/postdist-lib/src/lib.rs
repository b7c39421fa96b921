//! Postal code distance library entry points.
//!
//! This crate resolves postal codes to coordinates, asks a routing provider
//! for the driving distance between them, and formats the result for display.
//! The HTTP service should only depend on the functions exported here instead
//! of talking to the provider directly.

pub mod error;
pub mod format;
pub mod lookup;
pub mod mapbox;
pub mod model;
pub mod provider;

pub use error::{Error, Result};
pub use format::{format_distance, format_duration};
pub use lookup::{lookup_batch, lookup_distance};
pub use mapbox::{MapboxClient, MapboxConfig};
pub use model::{BatchDistanceItem, Coordinates, DistanceResult};
pub use provider::DistanceProvider;
