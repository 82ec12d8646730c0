use serde::{Deserialize, Serialize};

use crate::TslConfig;

/// Configuration for the HTTP API serving the conflict-event dataset.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Api {
    /// The address the API will bind to.
    /// The format is `ip:port`, for example `0.0.0.0:3000`.
    /// If you want to listen to all interfaces, use `0.0.0.0`. If you want
    /// the OS to choose a random port, use port `0`.
    #[serde(default = "Api::default_bind_address")]
    pub bind_address: String,

    /// TLS config. Only used if the API is served over TLS.
    #[serde(default = "Api::default_tsl_config", skip_serializing_if = "Option::is_none")]
    pub tsl_config: Option<TslConfig>,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            tsl_config: Self::default_tsl_config(),
        }
    }
}

impl Api {
    fn default_bind_address() -> String {
        String::from("0.0.0.0:3000")
    }

    fn default_tsl_config() -> Option<TslConfig> {
        None
    }
}
