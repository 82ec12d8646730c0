//! Conflict gateway application.
//!
//! The application is a container for the long-running jobs started from the
//! global configuration:
//!
//! - The HTTP API serving the conflict-event dataset.
//! - The cache purge job removing expired response-cache entries.
//!
//! The domain layer itself is built before any job starts; see
//! [`bootstrap::app::setup`](crate::bootstrap::app::setup).
use std::sync::Arc;

use conflict_gateway_configuration::Configuration;
use tokio::task::JoinHandle;

use crate::bootstrap::jobs::{cache_purge, gateway_apis};
use crate::core;

/// Starts all the application jobs and returns their handles.
///
/// # Panics
///
/// Will panic if the API bind address in the configuration is invalid or the
/// server cannot be started.
pub async fn start(config: &Configuration, gateway: Arc<core::Gateway>) -> Vec<JoinHandle<()>> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    // Start the HTTP API
    jobs.push(gateway_apis::start_job(&config.api, gateway.clone()).await);

    // Start the runner that removes expired response-cache entries, every interval
    if config.cache.check_period_secs > 0 {
        jobs.push(cache_purge::start_job(&config.cache, &gateway));
    }

    jobs
}
