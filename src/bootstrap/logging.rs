//! Setup for the application logging.
//!
//! It redirects the log info to the standard output with the log level
//! defined in the configuration:
//!
//! - `off`
//! - `error`
//! - `warn`
//! - `info`
//! - `debug`
//! - `trace`
use std::str::FromStr;
use std::sync::Once;

use conflict_gateway_configuration::Configuration;
use tracing::info;
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// It redirects the log info to the standard output with the log level
/// defined in the configuration.
pub fn setup(cfg: &Configuration) {
    let tracing_level = cfg
        .log_level
        .as_deref()
        .map_or(LevelFilter::INFO, |level| LevelFilter::from_str(level).unwrap_or(LevelFilter::INFO));

    if tracing_level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_stdout_init(tracing_level);
    });
}

fn tracing_stdout_init(filter: LevelFilter) {
    tracing_subscriber::fmt().with_max_level(filter).with_ansi(true).init();

    info!("Logging initialized");
}
