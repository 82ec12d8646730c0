//! Gateway API job starter.
//!
//! The [`gateway_apis::start_job`](crate::bootstrap::jobs::gateway_apis::start_job)
//! function starts the gateway REST API.
//!
//! The function spawns a new asynchronous task, that task is the "**launcher**".
//! The "**launcher**" starts the actual server and sends a message back
//! to the main application. The main application waits until it receives
//! the message [`Started`](crate::servers::apis::server::Started) from the
//! "**launcher**".
//!
//! Refer to the [configuration documentation](https://docs.rs/conflict-gateway-configuration)
//! for the API configuration options.
use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use conflict_gateway_configuration::api::Api;
use tokio::task::JoinHandle;

use super::make_rust_tls;
use crate::core;
use crate::servers::apis::server::{ApiServer, Launcher};

/// This function starts a new API server with the provided configuration.
///
/// The function starts a new concurrent task that will run the API server.
///
/// # Panics
///
/// It would panic if the bind address is invalid, the TLS material cannot be
/// loaded or the server cannot be started.
pub async fn start_job(config: &Api, gateway: Arc<core::Gateway>) -> JoinHandle<()> {
    let bind_to = config
        .bind_address
        .parse::<SocketAddr>()
        .expect("it should have a valid gateway api bind address");

    let tls = make_rust_tls(&config.tsl_config)
        .await
        .map(|tls| tls.expect("it should have a valid gateway api tls configuration"));

    start_v1(bind_to, tls, gateway.clone()).await
}

async fn start_v1(socket: SocketAddr, tls: Option<RustlsConfig>, gateway: Arc<core::Gateway>) -> JoinHandle<()> {
    let server = ApiServer::new(Launcher::new(socket, tls))
        .start(gateway)
        .await
        .expect("it should be able to start the gateway api");

    tokio::spawn(async move {
        assert!(!server.state.halt_task.is_closed(), "Halt channel should be open");
        server.state.task.await.expect("failed to close service");
    })
}
