//! A stub identity verifier for the contract tests.
//!
//! The production verifier delegates to a remote provider; the tests inject
//! this stub through the `Gateway` constructor instead, so no network access
//! is needed to exercise the authentication gate.
use std::panic::Location;

use async_trait::async_trait;
use conflict_gateway::core::auth::{self, AuthenticatedIdentity, IdentityVerifier};

/// A token the stub accepts by default in the contract tests.
pub const VALID_TOKEN: &str = "YZSl4lMZupRuOpSRC3krIKR5BPB14nrJ";

pub struct StubVerifier {
    valid_token: String,
}

impl StubVerifier {
    pub fn accepting(token: &str) -> Self {
        Self {
            valid_token: token.to_owned(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, auth::Error> {
        if token == self.valid_token {
            Ok(AuthenticatedIdentity {
                uid: "stub-user".to_owned(),
                claims: serde_json::Map::new(),
            })
        } else {
            Err(auth::Error::TokenNotValid {
                location: Location::caller(),
            })
        }
    }
}
