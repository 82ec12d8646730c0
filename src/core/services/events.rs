//! Conflict-event services: retrieval and grouping.
//!
//! The grouping engine is a pure function over an ordered row sequence. It
//! runs synchronously to completion within the handler task since row counts
//! are bounded (hundreds, not millions) and group-key cardinality is small
//! (tens of regions).
use conflict_gateway_primitives::{ConflictEvent, GroupedByRegion};

use crate::core::error::Error;
use crate::core::Gateway;

/// It loads the whole conflict-event table and groups it by region.
///
/// # Errors
///
/// Will return an [`Error`] if the store cannot be queried.
pub async fn get_events_grouped_by_region(gateway: &Gateway) -> Result<GroupedByRegion, Error> {
    let events = gateway.database.load_conflict_events(gateway.events_table())?;

    Ok(group_by_region(events))
}

/// It partitions an ordered event sequence into buckets keyed by region.
///
/// A single linear pass with a map accumulator. Every event with a region
/// lands in exactly one bucket, keeping its relative order; events without a
/// region are dropped.
#[must_use]
pub fn group_by_region(events: Vec<ConflictEvent>) -> GroupedByRegion {
    let mut grouped = GroupedByRegion::new();

    for event in events {
        let Some(region) = event.region.clone() else {
            continue;
        };

        grouped.entry(region).or_default().push(event);
    }

    grouped
}
