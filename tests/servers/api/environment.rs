use std::net::SocketAddr;
use std::sync::Arc;

use conflict_gateway::bootstrap::jobs::make_rust_tls;
use conflict_gateway::core::auth::IdentityVerifier;
use conflict_gateway::core::Gateway;
use conflict_gateway::servers::apis::server::{ApiServer, Launcher, Running, Stopped};
use conflict_gateway_configuration::Configuration;
use conflict_gateway_primitives::ConflictEvent;
use futures::executor::block_on;

pub struct Environment<S> {
    pub config: Arc<Configuration>,
    pub gateway: Arc<Gateway>,
    pub server: ApiServer<S>,
}

impl<S> Environment<S> {
    /// Add a conflict event to the store
    pub fn add_conflict_event(&self, event: &ConflictEvent) {
        self.gateway
            .database
            .add_conflict_event(self.gateway.events_table(), event)
            .expect("it should be able to seed the store");
    }

    /// Drop the events table to simulate an unreachable dataset.
    pub fn break_the_store(&self) {
        self.gateway
            .database
            .drop_database_tables(self.gateway.events_table())
            .expect("it should be able to drop the events table");
    }
}

impl Environment<Stopped> {
    pub fn new(configuration: &Arc<Configuration>, verifier: Box<dyn IdentityVerifier>) -> Self {
        let gateway = Arc::new(Gateway::new(configuration, verifier).expect("it should build the gateway"));

        let bind_to = configuration
            .api
            .bind_address
            .parse::<SocketAddr>()
            .expect("it should have a valid api bind address");

        let tls = block_on(make_rust_tls(&configuration.api.tsl_config)).map(|tls| tls.expect("tls config failed"));

        let server = ApiServer::new(Launcher::new(bind_to, tls));

        Self {
            config: configuration.clone(),
            gateway,
            server,
        }
    }

    pub async fn start(self) -> Environment<Running> {
        let gateway = self.gateway.clone();

        Environment {
            config: self.config,
            gateway: self.gateway,
            server: self.server.start(gateway).await.unwrap(),
        }
    }
}

impl Environment<Running> {
    pub async fn new(configuration: &Arc<Configuration>, verifier: Box<dyn IdentityVerifier>) -> Self {
        Environment::<Stopped>::new(configuration, verifier).start().await
    }

    pub async fn stop(self) -> Environment<Stopped> {
        Environment {
            config: self.config,
            gateway: self.gateway,
            server: self.server.stop().await.unwrap(),
        }
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.server.state.binding
    }
}
