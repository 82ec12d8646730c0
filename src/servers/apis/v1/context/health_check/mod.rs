//! Health-check context.
//!
//! `GET /health_check` returns `200` with the body `{"status":"Ok"}` as soon
//! as the API server is serving. The endpoint is not authenticated; it sits
//! outside the bearer-token middleware so container orchestrators can probe
//! it without credentials.
pub mod handlers;
pub mod resources;
