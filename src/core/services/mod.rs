//! The gateway domain services.
//!
//! There is only one context for now:
//!
//! - [`events`]: retrieval of the conflict-event dataset and its grouping
//!   into the region-keyed view served by the API.
pub mod events;
