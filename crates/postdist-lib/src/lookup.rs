//! Single and batch distance lookups on top of a [`DistanceProvider`].
//!
//! A single lookup resolves both postal codes concurrently and then computes
//! the route. A batch lookup resolves the destination once, then runs one
//! resolve-then-compute pipeline per starting postal code, all concurrently.
//! There is no concurrency cap: a batch of `N` entries issues `N + 1`
//! geocoding calls and `N` routing calls.

use futures::future::try_join_all;
use tracing::debug;

use crate::error::Result;
use crate::model::{BatchDistanceItem, Coordinates, DistanceResult};
use crate::provider::DistanceProvider;

/// Look up the driving distance between two postal codes.
pub async fn lookup_distance<P>(
    provider: &P,
    starting_post_code: &str,
    destination_post_code: &str,
) -> Result<DistanceResult>
where
    P: DistanceProvider + ?Sized,
{
    let (start, destination) = futures::try_join!(
        provider.resolve_coordinates(starting_post_code),
        provider.resolve_coordinates(destination_post_code),
    )?;

    provider.compute_distance(start, destination).await
}

/// Look up the distance from every starting postal code to one destination.
///
/// Results are returned in the order of `starting_post_codes`. The first
/// failing entry fails the whole batch.
pub async fn lookup_batch<P>(
    provider: &P,
    destination_post_code: &str,
    starting_post_codes: &[String],
) -> Result<Vec<BatchDistanceItem>>
where
    P: DistanceProvider + ?Sized,
{
    let destination = provider.resolve_coordinates(destination_post_code).await?;
    debug!(
        entries = starting_post_codes.len(),
        destination = %destination,
        "destination resolved, fanning out"
    );

    try_join_all(
        starting_post_codes
            .iter()
            .map(|post_code| batch_entry(provider, post_code, destination)),
    )
    .await
}

async fn batch_entry<P>(
    provider: &P,
    post_code: &str,
    destination: Coordinates,
) -> Result<BatchDistanceItem>
where
    P: DistanceProvider + ?Sized,
{
    let start = provider.resolve_coordinates(post_code).await?;
    let DistanceResult { duration, distance } =
        provider.compute_distance(start, destination).await?;

    Ok(BatchDistanceItem {
        post_code: post_code.to_string(),
        starting_coordinates: start,
        destination_coordinates: destination,
        duration,
        distance,
    })
}
