pub mod auth;
pub mod fixtures;
pub mod logging;
