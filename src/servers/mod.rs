//! Servers. Services that handle the network layer.
pub mod apis;
pub mod signals;
