use std::env;

use conflict_gateway_configuration::Configuration;

/// This configuration is used for testing. It generates random config values
/// so they do not collide if you run more than one gateway at the same time.
///
/// # Panics
///
/// Will panic if it can't convert the temp file path to string
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration {
        log_level: Some("off".to_owned()), // Change to `debug` for tests debugging
        ..Default::default()
    };

    // Ephemeral socket address for the API
    let api_port = 0u16;
    config.api.bind_address = format!("127.0.0.1:{}", &api_port);

    // Ephemeral sqlite database
    let temp_directory = env::temp_dir();
    let random_db_id = crate::random::string(16);
    let temp_file = temp_directory.join(format!("conflicts_{random_db_id}.db"));
    config.database.path = temp_file.to_str().unwrap().to_owned();

    // The provider is never reached in tests; contract tests inject a stub
    // verifier instead.
    config.identity.api_key = "testing".to_owned();

    config
}
