use serde::{Deserialize, Serialize};

/// Configuration for the in-memory response cache.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Cache {
    /// Seconds an entry stays valid after insertion, regardless of access
    /// pattern.
    #[serde(default = "Cache::default_std_ttl_secs")]
    pub std_ttl_secs: u64,

    /// Interval in seconds between runs of the background job that removes
    /// expired entries. `0` disables the sweep (expired entries are still
    /// unreachable through `get`).
    #[serde(default = "Cache::default_check_period_secs")]
    pub check_period_secs: u64,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            std_ttl_secs: Self::default_std_ttl_secs(),
            check_period_secs: Self::default_check_period_secs(),
        }
    }
}

impl Cache {
    fn default_std_ttl_secs() -> u64 {
        600
    }

    fn default_check_period_secs() -> u64 {
        120
    }
}
