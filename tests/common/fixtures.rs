//! Conflict-event fixtures for the contract tests.
//!
//! Every fixture sets all the columns of the bootstrapped events table so
//! the grouped responses can be compared field by field.
use conflict_gateway_primitives::ConflictEvent;
use serde_json::json;

pub fn event(region: Option<&str>, id: i64) -> ConflictEvent {
    let mut fields = serde_json::Map::new();
    fields.insert("id".to_owned(), json!(id));
    fields.insert("event_date".to_owned(), json!("2025-06-01"));
    fields.insert("country".to_owned(), json!("Testland"));
    fields.insert("event_type".to_owned(), json!("Battles"));
    fields.insert("fatalities".to_owned(), json!(3));

    ConflictEvent::new(region.map(ToString::to_string), fields)
}
