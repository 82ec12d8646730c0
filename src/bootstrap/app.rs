//! Program setup.
//!
//! It loads the configuration, initializes logging and builds the domain
//! layer. The gateway deliberately fails fast: it cannot serve any request
//! without the store, so partial startup is not supported. A connection
//! failure here terminates the process before any route becomes reachable.
use std::sync::Arc;

use conflict_gateway_configuration::{Configuration, Info};
use tracing::error;

use crate::bootstrap;
use crate::core::auth::RemoteVerifier;
use crate::core::Gateway;

const DEFAULT_CONFIG_PATH: &str = "./gateway.toml";

/// It loads the application configuration and builds the `Gateway`.
///
/// The configuration is loaded from the default configuration file
/// (`./gateway.toml`) or from the `CONFLICT_GATEWAY_CONFIG_TOML` and
/// `CONFLICT_GATEWAY_CONFIG_TOML_PATH` environment variables.
///
/// # Panics
///
/// Will panic if the configuration cannot be loaded.
#[must_use]
pub fn setup() -> (Arc<Configuration>, Arc<Gateway>) {
    let configuration = Arc::new(initialize_configuration());

    initialize_logging(&configuration);

    if configuration.identity.api_key.is_empty() {
        error!("Missing identity provider api_key: the protected routes cannot verify any credential");
        std::process::exit(1);
    }

    let gateway = match initialize_gateway(&configuration) {
        Ok(gateway) => Arc::new(gateway),
        Err(err) => {
            error!("Error connecting to the conflict-event store: {err}");
            std::process::exit(1);
        }
    };

    (configuration, gateway)
}

fn initialize_configuration() -> Configuration {
    let info = Info::new(DEFAULT_CONFIG_PATH.to_owned()).expect("it should be able to build the configuration info");

    Configuration::load(&info).expect("it should be able to load the configuration")
}

/// It builds the `Gateway` domain service with its production collaborators:
/// the pooled database driver and the remote identity verifier.
///
/// # Errors
///
/// Will return an error if the store is unreachable or the events table
/// cannot be bootstrapped.
pub fn initialize_gateway(configuration: &Arc<Configuration>) -> Result<Gateway, crate::core::databases::error::Error> {
    let verifier = RemoteVerifier::new(
        configuration.identity.provider_url.clone(),
        configuration.identity.api_key.clone(),
    );

    Gateway::new(configuration, Box::new(verifier))
}

fn initialize_logging(configuration: &Arc<Configuration>) {
    bootstrap::logging::setup(configuration);
}
