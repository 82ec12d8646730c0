//! The first version of the gateway HTTP API.
//!
//! The API contexts are:
//!
//! - [`context::events`]: the conflict-event dataset, grouped by region.
//! - [`context::health_check`]: the health check endpoint.
pub mod context;
pub mod middlewares;
pub mod responses;
pub mod routes;
