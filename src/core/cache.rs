//! The in-memory response cache.
//!
//! A time-bounded key-value store used to avoid recomputing responses for
//! repeated requests. Entries expire a fixed `std_ttl` after insertion,
//! independent of access pattern. Expiry is enforced twice:
//!
//! - passively: a [`get`](ResponseCache::get) on an expired entry reports a
//!   miss and drops the entry;
//! - actively: the [`cache_purge`](crate::bootstrap::jobs::cache_purge) job
//!   sweeps expired entries on a fixed period, independent of traffic.
//!
//! There is no eviction policy beyond the TTL. Concurrent `get`/`insert` on
//! the same key may race, which is benign: values for the same key are
//! idempotent recomputations of the same query.
use std::collections::BTreeMap;
use std::time::Duration;

use conflict_gateway_clock::clock::Time;
use conflict_gateway_primitives::DurationSinceUnixEpoch;
use dashmap::DashMap;

use crate::CurrentClock;

/// A deterministic signature of a request.
///
/// Built from the request's query parameters in an order-stable way: two
/// requests with the same parameters produce the same key regardless of the
/// order the parameters were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// It builds a key from the request's query parameters.
    ///
    /// # Panics
    ///
    /// Will panic if the parameter map cannot be serialized to JSON, which
    /// cannot happen for string pairs.
    #[must_use]
    pub fn from_query_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let ordered: BTreeMap<&str, &str> = params.into_iter().collect();

        Self(serde_json::to_string(&ordered).expect("query params should serialize to JSON"))
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: serde_json::Value,
    expires_at: DurationSinceUnixEpoch,
}

impl CacheEntry {
    fn is_expired(&self, now: DurationSinceUnixEpoch) -> bool {
        now > self.expires_at
    }
}

/// A fixed-TTL response cache, safe under concurrent requests.
pub struct ResponseCache {
    entries: DashMap<CacheKey, CacheEntry>,
    std_ttl: Duration,
}

impl ResponseCache {
    #[must_use]
    pub fn new(std_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            std_ttl,
        }
    }

    /// It returns the cached payload for the key, or `None` when the key is
    /// unknown or its entry has already expired.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let payload = {
            let entry = self.entries.get(key)?;

            if entry.is_expired(CurrentClock::now()) {
                None
            } else {
                Some(entry.payload.clone())
            }
        };

        // Passive expiry: drop the dead entry without waiting for the sweep.
        if payload.is_none() {
            self.entries.remove(key);
        }

        payload
    }

    /// It stores the payload under the key, valid for `std_ttl` from now.
    /// A previous value for the same key is overwritten.
    ///
    /// # Panics
    ///
    /// Will panic if `now + std_ttl` overflows the clock, which will not
    /// happen before the Duration type does (584.9 billion years).
    pub fn insert(&self, key: CacheKey, payload: serde_json::Value) {
        let expires_at = CurrentClock::now_add(&self.std_ttl).expect("cache TTL should not overflow the clock");

        self.entries.insert(key, CacheEntry { payload, expires_at });
    }

    /// It removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = CurrentClock::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now));

        before - self.entries.len()
    }

    /// Number of entries currently stored, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use conflict_gateway_clock::clock::stopped::Stopped as _;
    use conflict_gateway_clock::clock::Stopped;
    use serde_json::json;

    use super::{CacheKey, ResponseCache};

    fn sample_key() -> CacheKey {
        CacheKey::from_query_params([("year", "2025"), ("limit", "100")])
    }

    #[test]
    fn it_should_build_the_same_key_regardless_of_the_parameter_order() {
        let key_1 = CacheKey::from_query_params([("year", "2025"), ("limit", "100")]);
        let key_2 = CacheKey::from_query_params([("limit", "100"), ("year", "2025")]);

        assert_eq!(key_1, key_2);
    }

    #[test]
    fn it_should_build_different_keys_for_different_parameters() {
        let key_1 = CacheKey::from_query_params([("year", "2025")]);
        let key_2 = CacheKey::from_query_params([("year", "2024")]);

        assert_ne!(key_1, key_2);
    }

    #[test]
    fn it_should_return_a_value_that_has_not_expired_yet() {
        Stopped::local_set_to_unix_epoch();

        let cache = ResponseCache::new(Duration::from_secs(600));

        cache.insert(sample_key(), json!({"cached": true}));

        // One second before the TTL elapses.
        Stopped::local_add(&Duration::from_secs(599)).unwrap();

        assert_eq!(cache.get(&sample_key()), Some(json!({"cached": true})));
    }

    #[test]
    fn it_should_report_a_miss_for_an_expired_entry() {
        Stopped::local_set_to_unix_epoch();

        let cache = ResponseCache::new(Duration::from_secs(600));

        cache.insert(sample_key(), json!({"cached": true}));

        // One second after the TTL elapses.
        Stopped::local_add(&Duration::from_secs(601)).unwrap();

        assert_eq!(cache.get(&sample_key()), None);
    }

    #[test]
    fn it_should_drop_an_expired_entry_on_access_without_waiting_for_the_sweep() {
        Stopped::local_set_to_unix_epoch();

        let cache = ResponseCache::new(Duration::from_secs(600));

        cache.insert(sample_key(), json!({"cached": true}));

        Stopped::local_add(&Duration::from_secs(601)).unwrap();

        assert_eq!(cache.get(&sample_key()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn it_should_overwrite_the_previous_value_for_the_same_key() {
        Stopped::local_set_to_unix_epoch();

        let cache = ResponseCache::new(Duration::from_secs(600));

        cache.insert(sample_key(), json!({"version": 1}));
        cache.insert(sample_key(), json!({"version": 2}));

        assert_eq!(cache.get(&sample_key()), Some(json!({"version": 2})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn it_should_sweep_only_the_expired_entries() {
        Stopped::local_set_to_unix_epoch();

        let cache = ResponseCache::new(Duration::from_secs(600));

        cache.insert(CacheKey::from_query_params([("year", "2024")]), json!(1));

        Stopped::local_add(&Duration::from_secs(500)).unwrap();

        cache.insert(CacheKey::from_query_params([("year", "2025")]), json!(2));

        // The first entry is now expired, the second one is not.
        Stopped::local_add(&Duration::from_secs(200)).unwrap();

        let purged = cache.purge_expired();

        assert_eq!(purged, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&CacheKey::from_query_params([("year", "2025")])), Some(json!(2)));
    }
}
