//! The conflict-event record and its region-grouped view.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the column used as the grouping key.
pub const REGION_COLUMN: &str = "region";

/// A mapping from region name to the events reported for that region.
///
/// Events with no region are not present in any group. Within a group the
/// events keep the relative order in which the store returned them.
pub type GroupedByRegion = BTreeMap<String, Vec<ConflictEvent>>;

/// One row of the conflict-event table.
///
/// Only the `region` column has a known meaning to the gateway; every other
/// column is carried through untouched as a scalar field, so the record
/// tolerates schema drift in the upstream dataset. The flattened
/// serialization keeps the JSON shape flat:
///
/// ```json
/// { "region": "Middle East", "id": 1, "fatalities": 3 }
/// ```
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct ConflictEvent {
    /// The grouping key. `None` when the stored column is null.
    pub region: Option<String>,

    /// The remaining columns of the row, column name to scalar value.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ConflictEvent {
    #[must_use]
    pub fn new(region: Option<String>, fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { region, fields }
    }

    /// Returns `true` when the event carries a grouping key.
    #[must_use]
    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }
}
