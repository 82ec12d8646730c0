//! The domain layer of the conflict gateway.
//!
//! Its main responsibility is to resolve the conflict-event dataset into the
//! region-grouped view served by the API. It is also a container for the
//! collaborators every request needs: the persistence driver with its
//! connection pool, the identity verifier and the response cache.
//!
//! > **NOTICE**: the `Gateway` is not responsible for handling the network
//! layer. It is used by a higher application service that does; see
//! [`servers::apis`](crate::servers::apis).
//!
//! All collaborators are constructor-injected so tests can swap them (a fake
//! identity verifier, an ephemeral sqlite store) without touching process
//! globals.
pub mod auth;
pub mod cache;
pub mod databases;
pub mod error;
pub mod services;

use std::time::Duration;

use conflict_gateway_configuration::Configuration;

use self::auth::{AuthenticatedIdentity, IdentityVerifier};
use self::cache::ResponseCache;
use self::databases::Database;

/// The domain layer gateway service.
pub struct Gateway {
    /// A database driver implementation: [`Sqlite3`](crate::core::databases::sqlite)
    /// or [`MySQL`](crate::core::databases::mysql)
    pub database: Box<dyn Database>,
    /// The response cache shared by all requests.
    pub cache: ResponseCache,
    verifier: Box<dyn IdentityVerifier>,
    events_table: String,
}

impl Gateway {
    /// `Gateway` constructor.
    ///
    /// It builds the connection pool eagerly. The gateway cannot serve any
    /// request without the store, so a connection failure here is returned to
    /// the caller to abort the bootstrap.
    ///
    /// # Errors
    ///
    /// Will return a `databases::error::Error` if unable to connect to the
    /// database or to bootstrap the events table.
    pub fn new(config: &Configuration, verifier: Box<dyn IdentityVerifier>) -> Result<Gateway, databases::error::Error> {
        let database = databases::driver::build(
            &config.database.driver,
            &config.database.path,
            config.database.pool_size,
            &config.database.events_table,
        )?;

        Ok(Gateway {
            database,
            cache: ResponseCache::new(Duration::from_secs(config.cache.std_ttl_secs)),
            verifier,
            events_table: config.database.events_table.clone(),
        })
    }

    /// The table holding the conflict-event rows.
    #[must_use]
    pub fn events_table(&self) -> &str {
        &self.events_table
    }

    /// It resolves a bearer token into the identity it belongs to, delegating
    /// the verification to the external identity provider.
    ///
    /// # Errors
    ///
    /// Will return an `auth::Error` if the provider rejects the token or
    /// cannot be reached.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, auth::Error> {
        self.verifier.verify(token).await
    }

    /// It removes the expired entries from the response cache and returns how
    /// many were dropped.
    pub fn purge_expired_cache_entries(&self) -> usize {
        self.cache.purge_expired()
    }
}
