//! Middlewares for the gateway API.
pub mod auth;
