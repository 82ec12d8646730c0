//! Setup for the main gateway application.
//!
//! The [`app::setup`](crate::bootstrap::app::setup) builds the application
//! dependencies (configuration, logging, the domain-layer `Gateway`) and the
//! [`jobs`](crate::bootstrap::jobs) module starts the application services.
pub mod app;
pub mod jobs;
pub mod logging;
