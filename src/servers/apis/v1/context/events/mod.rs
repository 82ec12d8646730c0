//! Conflict-events context.
//!
//! It exposes the whole conflict-event dataset grouped by region.
//!
//! # Endpoints
//!
//! - [Get the dataset grouped by region](#get-the-dataset-grouped-by-region)
//!
//! # Get the dataset grouped by region
//!
//! `GET /conflitti`
//!
//! Requires an `Authorization: Bearer <token>` header.
//!
//! **Example response** `200`
//!
//! ```json
//! {
//!   "Middle East": [
//!     { "region": "Middle East", "id": 1, "fatalities": 3 }
//!   ],
//!   "Northern Africa": [
//!     { "region": "Northern Africa", "id": 2, "fatalities": 0 }
//!   ]
//! }
//! ```
//!
//! Rows whose `region` column is null are not present in any group.
//!
//! **Example response** `500`
//!
//! ```json
//! { "message": "Internal server error while retrieving the conflict data.", "error_id": "..." }
//! ```
//!
//! The `error_id` is the correlation identifier the original error was
//! logged under.
pub mod handlers;
pub mod responses;
pub mod routes;
