//! Configuration data structures for the conflict gateway.
//!
//! The configuration is loaded from a [TOML](https://toml.io/en/) file
//! `gateway.toml` in the project root folder or from an environment variable
//! with the same content as the file.
//!
//! Individual values can also be overridden with environment variables
//! prefixed with `CONFLICT_GATEWAY_`. This is useful when running the gateway
//! in a Docker container or environments where you cannot inject a
//! configuration file.
//!
//! When you run the gateway without providing the configuration via a file or
//! env var, the default configuration is used.
//!
//! # Sections
//!
//! Each section in the toml structure is mapped to a data structure:
//!
//! - [`Api`](crate::api::Api): the HTTP API socket and optional TLS material.
//! - [`Database`](crate::database::Database): the conflict-event store.
//! - [`Identity`](crate::identity::Identity): the external identity provider.
//! - [`Cache`](crate::cache::Cache): the response cache policy.
//!
//! # Default configuration
//!
//! The default configuration is:
//!
//! ```toml
//! log_level = "info"
//!
//! [api]
//! bind_address = "0.0.0.0:3000"
//!
//! [database]
//! driver = "Sqlite3"
//! path = "./storage/gateway/lib/database/sqlite3.db"
//! pool_size = 10
//! events_table = "conflict_events"
//!
//! [identity]
//! provider_url = "https://identitytoolkit.googleapis.com/v1/accounts:lookup"
//! api_key = ""
//!
//! [cache]
//! std_ttl_secs = 600
//! check_period_secs = 120
//! ```
pub mod api;
pub mod cache;
pub mod database;
pub mod identity;

use std::env;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use conflict_gateway_located_error::{DynError, LocatedError};

use crate::api::Api;
use crate::cache::Cache;
use crate::database::Database;
use crate::identity::Identity;

/// Default timeout for establishing a connection to the store. Waiting any
/// longer than this for a pooled connection is treated as a failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// Environment variables

/// The whole `gateway.toml` file content. It has priority over the config
/// file. Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "CONFLICT_GATEWAY_CONFIG_TOML";

/// The `gateway.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "CONFLICT_GATEWAY_CONFIG_TOML_PATH";

/// Prefix for the environment variables that override single config values.
const CONFIG_OVERRIDE_PREFIX: &str = "CONFLICT_GATEWAY_";

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable {ENV_VAR_CONFIG_TOML} ...");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to load the configuration from the environment variable.
    /// This error only occurs if there is no configuration file and the
    /// `CONFLICT_GATEWAY_CONFIG_TOML` environment variable is not set.
    #[error("Unable to load from Environmental Variable: {source}")]
    UnableToLoadFromEnvironmentVariable {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    #[error("Unable to load from Config File: {source}")]
    UnableToLoadFromConfigFile {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },

    /// Unable to load the configuration from the configuration file.
    #[error("Failed processing the configuration: {source}")]
    ConfigError {
        source: LocatedError<'static, dyn std::error::Error + Send + Sync>,
    },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            source: (Arc::new(err) as DynError).into(),
        }
    }
}

/// Paths to the TLS certificate and key files for the API server.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct TslConfig {
    /// Path to the SSL certificate file.
    #[serde(default = "TslConfig::default_ssl_cert_path")]
    pub ssl_cert_path: Utf8PathBuf,

    /// Path to the SSL key file.
    #[serde(default = "TslConfig::default_ssl_key_path")]
    pub ssl_key_path: Utf8PathBuf,
}

impl TslConfig {
    fn default_ssl_cert_path() -> Utf8PathBuf {
        Utf8PathBuf::new()
    }

    fn default_ssl_key_path() -> Utf8PathBuf {
        Utf8PathBuf::new()
    }
}

/// Core configuration for the gateway.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Configuration {
    /// Logging level. Possible values are: `off`, `error`, `warn`, `info`,
    /// `debug` and `trace`. Default is `info`.
    #[serde(default = "Configuration::default_log_level")]
    pub log_level: Option<String>,

    /// The HTTP API configuration.
    #[serde(default = "Configuration::default_api")]
    pub api: Api,

    /// The conflict-event store configuration.
    #[serde(default = "Configuration::default_database")]
    pub database: Database,

    /// The external identity provider configuration.
    #[serde(default = "Configuration::default_identity")]
    pub identity: Identity,

    /// The response cache configuration.
    #[serde(default = "Configuration::default_cache")]
    pub cache: Cache,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            api: Self::default_api(),
            database: Self::default_database(),
            identity: Self::default_identity(),
            cache: Self::default_cache(),
        }
    }
}

impl Configuration {
    fn default_log_level() -> Option<String> {
        Some(String::from("info"))
    }

    fn default_api() -> Api {
        Api::default()
    }

    fn default_database() -> Database {
        Database::default()
    }

    fn default_identity() -> Identity {
        Identity::default()
    }

    fn default_cache() -> Cache {
        Cache::default()
    }

    /// Loads the configuration from the `Info` struct.
    ///
    /// Values from the `CONFLICT_GATEWAY_`-prefixed environment variables
    /// take precedence over both the inlined TOML and the config file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration is invalid.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let mut figment = Figment::new().merge(Toml::file(&info.config_toml_path));

        if let Some(ref config_toml) = info.config_toml {
            figment = figment.merge(Toml::string(config_toml));
        }

        let config: Configuration = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX)).extract()?;

        Ok(config)
    }

    /// Loads the configuration from the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `path` does not exist or has a bad configuration.
    pub fn load_from_file(path: &str) -> Result<Configuration, Error> {
        let figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX));

        let config: Configuration = figment.extract()?;

        Ok(config)
    }

    /// Saves the configuration to the configuration file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration cannot be encoded to TOML.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be written into the file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Error> {
        fs::write(path, self.to_toml()).expect("Could not write to file!");
        Ok(())
    }

    /// Encodes the configuration to TOML.
    fn to_toml(&self) -> String {
        toml::to_string(self).expect("Could not encode TOML value")
    }
}

#[cfg(test)]
mod tests {

    use crate::Configuration;

    #[cfg(test)]
    fn default_config_toml() -> String {
        let config = r#"log_level = "info"

                                [api]
                                bind_address = "0.0.0.0:3000"

                                [database]
                                driver = "Sqlite3"
                                path = "./storage/gateway/lib/database/sqlite3.db"
                                pool_size = 10
                                events_table = "conflict_events"

                                [identity]
                                provider_url = "https://identitytoolkit.googleapis.com/v1/accounts:lookup"
                                api_key = ""

                                [cache]
                                std_ttl_secs = 600
                                check_period_secs = 120
        "#
        .lines()
        .map(str::trim_start)
        .collect::<Vec<&str>>()
        .join("\n");
        config
    }

    #[test]
    fn configuration_should_have_default_values() {
        let configuration = Configuration::default();

        let toml = toml::to_string(&configuration).expect("Could not encode TOML value");

        assert_eq!(toml, default_config_toml());
    }

    #[test]
    fn configuration_should_be_saved_in_a_toml_config_file() {
        use std::{env, fs};

        use uuid::Uuid;

        // Build temp config file path
        let temp_directory = env::temp_dir();
        let temp_file = temp_directory.join(format!("test_config_{}.toml", Uuid::new_v4()));

        // Convert to argument type for Configuration::save_to_file
        let config_file_path = temp_file;
        let path = config_file_path.to_string_lossy().to_string();

        let default_configuration = Configuration::default();

        default_configuration
            .save_to_file(&path)
            .expect("Could not save configuration to file");

        let contents = fs::read_to_string(&path).expect("Something went wrong reading the file");

        assert_eq!(contents, default_config_toml());
    }

    #[test]
    fn configuration_should_be_loaded_from_a_toml_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("gateway.toml", &default_config_toml())?;

            let configuration = Configuration::load_from_file("gateway.toml").expect("Could not load configuration from file");

            assert_eq!(configuration, Configuration::default());

            Ok(())
        });
    }

    #[test]
    fn configuration_should_allow_to_overwrite_the_provider_api_key_with_an_env_var() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("gateway.toml", &default_config_toml())?;

            jail.set_env("CONFLICT_GATEWAY_IDENTITY.API_KEY", "NewApiKey");

            let configuration = Configuration::load_from_file("gateway.toml").expect("Could not load configuration from file");

            assert_eq!(configuration.identity.api_key, "NewApiKey".to_owned());

            Ok(())
        });
    }
}
