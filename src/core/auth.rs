//! Identity verification services and structs.
//!
//! The gateway does not verify credentials itself. Every bearer token is
//! delegated to an external identity provider which either resolves it into
//! the account it belongs to or rejects it. The provider is trusted
//! completely for authentication decisions.
//!
//! The [`IdentityVerifier`] trait is the seam between the gateway and the
//! provider: the production implementation is [`RemoteVerifier`], tests
//! inject a stub.
//!
//! The resulting [`AuthenticatedIdentity`] lives only for the duration of one
//! request. It is attached to the request context by the authentication
//! middleware and never persisted.
use std::panic::Location;
use std::sync::Arc;

use async_trait::async_trait;
use conflict_gateway_located_error::{DynError, LocatedError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The identity resolved from a verified bearer token.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct AuthenticatedIdentity {
    /// Unique subject identifier assigned by the provider.
    pub uid: String,

    /// Additional claims returned by the provider, passed through untouched.
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

/// It extracts the token from an `Authorization` header value.
///
/// It returns `None` when the value does not follow the `Bearer <token>`
/// scheme or the token is empty.
#[must_use]
pub fn parse_bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}

/// A verifier that resolves bearer tokens into identities.
///
/// This is a synchronous gate in front of every protected route: no
/// protected operation runs without a verified identity.
#[async_trait]
pub trait IdentityVerifier: Sync + Send {
    /// It verifies the token with the identity provider.
    ///
    /// # Errors
    ///
    /// Will return an [`enum@Error`] if the token is rejected or the provider
    /// cannot be reached.
    async fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, Error>;
}

/// The production [`IdentityVerifier`]: a thin client for the provider's
/// account-lookup endpoint.
pub struct RemoteVerifier {
    provider_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RemoteVerifier {
    #[must_use]
    pub fn new(provider_url: String, api_key: String) -> Self {
        Self {
            provider_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct LookupRequest<'a> {
    #[serde(rename = "idToken")]
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<ProviderUser>,
}

#[derive(Deserialize)]
struct ProviderUser {
    #[serde(rename = "localId")]
    local_id: String,

    #[serde(flatten)]
    claims: serde_json::Map<String, serde_json::Value>,
}

#[async_trait]
impl IdentityVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, Error> {
        let response = self
            .client
            .post(format!("{}?key={}", self.provider_url, self.api_key))
            .json(&LookupRequest { id_token: token })
            .send()
            .await
            .map_err(|e| Error::ProviderUnreachable {
                source: (Arc::new(e) as DynError).into(),
            })?;

        if !response.status().is_success() {
            debug!("identity provider rejected the token: {}", response.status());
            return Err(Error::TokenNotValid {
                location: Location::caller(),
            });
        }

        let lookup: LookupResponse = response.json().await.map_err(|e| Error::ProviderUnreachable {
            source: (Arc::new(e) as DynError).into(),
        })?;

        match lookup.users.into_iter().next() {
            Some(user) => Ok(AuthenticatedIdentity {
                uid: user.local_id,
                claims: user.claims,
            }),
            None => Err(Error::TokenNotValid {
                location: Location::caller(),
            }),
        }
    }
}

/// Verification error. The reason is logged server-side only; callers see a
/// uniform unauthorized response regardless of the variant.
#[derive(Debug, Error)]
pub enum Error {
    #[error("The request has no Authorization header, {location}")]
    MissingAuthorizationHeader { location: &'static Location<'static> },

    #[error("The Authorization header does not follow the Bearer scheme, {location}")]
    MalformedAuthorizationHeader { location: &'static Location<'static> },

    #[error("The supplied token is not valid, {location}")]
    TokenNotValid { location: &'static Location<'static> },

    #[error("The identity provider could not be reached: {source}")]
    ProviderUnreachable {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}
