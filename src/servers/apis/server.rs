//! Logic to run the HTTP API server.
//!
//! It contains two main structs: `ApiServer` and `Launcher`.
//!
//! The `ApiServer` struct is responsible for:
//!
//! - Starting and stopping the server.
//! - Storing the launcher so a stopped server can be started again.
//!
//! It's a state machine, `Stopped` or `Running`, with a couple of guarantees:
//!
//! - You cannot stop a server that is not running.
//! - You cannot start a server that is already running.
//! - Once started, the bound socket address is known, even when binding to
//!   port 0.
//!
//! The `Launcher` is the piece that knows how to bind the socket and serve
//! the routes with graceful shutdown. The application and the tests both go
//! through it, so they run the exact same server.
use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use derive_more::Constructor;
use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::oneshot::{Receiver, Sender};
use tracing::info;

use super::routes::router;
use crate::core::Gateway;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Error that can occur when starting or stopping the API server.
#[derive(Debug, Error)]
pub enum Error {
    #[error("it was not possible to send the halt signal to the server")]
    FailedToSendStop,

    #[error("the server task could not be joined")]
    FailedToJoinTask,
}

/// This is the message that the "launcher" spawned task sends to the main
/// application process to notify the service was successfully started.
///
/// > **NOTICE**: it does not mean the API server is ready to receive
/// requests. It only means the new server started. It might take some time
/// for the server to be ready to accept requests.
#[derive(Debug)]
pub struct Started {
    pub address: SocketAddr,
}

/// A stopped API server state.
pub struct Stopped {
    launcher: Launcher,
}

/// A running API server state.
pub struct Running {
    /// The address where the server is bound.
    pub binding: SocketAddr,
    pub halt_task: Sender<Halted>,
    pub task: tokio::task::JoinHandle<Launcher>,
}

/// A wrapper for the API server state machine.
pub struct ApiServer<S> {
    pub state: S,
}

impl ApiServer<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It starts the server and returns a running instance.
    ///
    /// # Errors
    ///
    /// It would return an error if the server could not be started.
    ///
    /// # Panics
    ///
    /// It would panic if the launcher task is dropped before sending the
    /// started message.
    pub async fn start(self, gateway: Arc<Gateway>) -> Result<ApiServer<Running>, Error> {
        let (tx_start, rx_start) = tokio::sync::oneshot::channel::<Started>();
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        let launcher = self.state.launcher;

        let task = tokio::spawn(async move {
            let server = launcher.start(gateway, tx_start, rx_halt);

            server.await;

            launcher
        });

        let binding = rx_start.await.expect("it should be able to start the service").address;

        info!(target: "API", "Started on {binding}");

        Ok(ApiServer {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
            },
        })
    }
}

impl ApiServer<Running> {
    /// It stops the server and returns a stopped instance.
    ///
    /// # Errors
    ///
    /// It would return an error if the channel for the task killer signal was closed.
    pub async fn stop(self) -> Result<ApiServer<Stopped>, Error> {
        self.state.halt_task.send(Halted::Normal).map_err(|_| Error::FailedToSendStop)?;

        let launcher = self.state.task.await.map_err(|_| Error::FailedToJoinTask)?;

        Ok(ApiServer {
            state: Stopped { launcher },
        })
    }
}

/// It knows how to bind the socket and serve the routes with graceful
/// shutdown.
#[derive(Constructor, Debug)]
pub struct Launcher {
    pub bind_to: SocketAddr,
    pub tls: Option<RustlsConfig>,
}

impl Launcher {
    /// It starts the server on the given socket and sends the bound address
    /// back through `tx_start`.
    ///
    /// # Panics
    ///
    /// Will panic if unable to bind to the socket address or if the server
    /// crashes while serving.
    fn start(&self, gateway: Arc<Gateway>, tx_start: Sender<Started>, rx_halt: Receiver<Halted>) -> BoxFuture<'static, ()> {
        let socket = std::net::TcpListener::bind(self.bind_to).expect("Could not bind tcp_listener to address.");
        let address = socket.local_addr().expect("Could not get local_addr from tcp_listener.");

        let handle = Handle::new();

        tokio::task::spawn(graceful_shutdown(
            handle.clone(),
            rx_halt,
            format!("Shutting down API server on socket address: {address}"),
        ));

        let tls = self.tls.clone();
        let app = router(gateway);

        let running = Box::pin(async move {
            match tls {
                Some(tls) => axum_server::from_tcp_rustls(socket, tls)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .expect("Axum server crashed."),
                None => axum_server::from_tcp(socket)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .expect("Axum server crashed."),
            }
        });

        tx_start
            .send(Started { address })
            .expect("the API server should not be dropped");

        running
    }
}
