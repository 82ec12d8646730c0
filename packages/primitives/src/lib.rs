//! Primitive types for the conflict gateway.
//!
//! This module contains the basic data structures shared by the conflict
//! gateway packages: the conflict-event record served by the gateway, the
//! region-grouped view of a result set, and the database driver selector.
use std::time::Duration;

pub mod conflict_event;

pub use conflict_event::{ConflictEvent, GroupedByRegion, REGION_COLUMN};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// The database management system used by the gateway to reach the
/// conflict-event store.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Display)]
pub enum DatabaseDriver {
    /// The `SQLite3` database driver.
    Sqlite3,
    /// The `MySQL` database driver.
    MySQL,
}
