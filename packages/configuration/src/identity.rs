use serde::{Deserialize, Serialize};

/// Configuration for the external identity provider that verifies bearer
/// tokens on behalf of the gateway.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Identity {
    /// URL of the provider endpoint that resolves a bearer token into the
    /// account it belongs to.
    #[serde(default = "Identity::default_provider_url")]
    pub provider_url: String,

    /// API key attached to every verification call. The gateway refuses to
    /// start the protected surface without it.
    #[serde(default = "Identity::default_api_key")]
    pub api_key: String,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            provider_url: Self::default_provider_url(),
            api_key: Self::default_api_key(),
        }
    }
}

impl Identity {
    fn default_provider_url() -> String {
        String::from("https://identitytoolkit.googleapis.com/v1/accounts:lookup")
    }

    fn default_api_key() -> String {
        String::new()
    }
}
