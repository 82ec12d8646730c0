//! Conflict Gateway. An authenticated HTTP gateway exposing a conflict-event
//! dataset to trusted clients.
//!
//! The gateway verifies the caller identity against an external identity
//! provider, retrieves rows from a relational store through a long-lived
//! connection pool, reshapes them into a region-grouped structure and emits
//! the result as JSON.
//!
//! # Layers
//!
//! - [`servers`]: the network layer. An axum HTTP server with the
//!   authentication middleware in front of every protected route.
//! - [`core`]: the domain layer. The [`Gateway`](core::Gateway) service
//!   container owns the database handle, the identity verifier and the
//!   response cache.
//! - [`bootstrap`] and [`app`]: process setup and the long-running jobs
//!   (API server, cache purge).
//!
//! # Endpoints
//!
//! - `GET /conflitti`: the conflict-event dataset grouped by region.
//!   Requires an `Authorization: Bearer <token>` header.
//! - `GET /health_check`: unauthenticated health check.
//!
//! # Configuration
//!
//! Loaded from `gateway.toml` (or the `CONFLICT_GATEWAY_CONFIG_TOML` env
//! var) with `CONFLICT_GATEWAY_`-prefixed overrides. Refer to the
//! [`conflict-gateway-configuration`](conflict_gateway_configuration)
//! documentation for all the options.
//!
//! The gateway cannot serve any request without the store: a connection
//! failure at startup terminates the process before any route becomes
//! reachable.
pub mod app;
pub mod bootstrap;
pub mod core;
pub mod servers;

use conflict_gateway_clock::clock;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
pub type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
pub type CurrentClock = clock::Stopped;
