//! Job that runs a task on intervals to purge the response cache.
//!
//! It removes the expired entries from the in-memory response cache.
//!
//! Expired entries are already unreachable through the cache `get` (passive
//! expiry); the sweep reclaims their memory on a fixed period independent of
//! request traffic.
//!
//! The interval is the `check_period_secs` core configuration option. Refer
//! to [`conflict-gateway-configuration documentation`](https://docs.rs/conflict-gateway-configuration)
//! for more info about that option.
use std::sync::Arc;

use conflict_gateway_configuration::cache::Cache;
use tokio::task::JoinHandle;

use crate::core;

/// It starts a job to remove the expired entries from the response cache.
///
/// The sweep is executed every `check_period_secs`.
#[must_use]
pub fn start_job(config: &Cache, gateway: &Arc<core::Gateway>) -> JoinHandle<()> {
    let weak_gateway = std::sync::Arc::downgrade(gateway);
    let interval = config.check_period_secs;

    tokio::spawn(async move {
        let interval = std::time::Duration::from_secs(interval);
        let mut interval = tokio::time::interval(interval);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Stopping cache purge job..");
                    break;
                }
                _ = interval.tick() => {
                    if let Some(gateway) = weak_gateway.upgrade() {
                        let purged = gateway.purge_expired_cache_entries();
                        tracing::info!("Purged {purged} expired response-cache entries");
                    } else {
                        break;
                    }
                }
            }
        }
    })
}
