use conflict_gateway::servers::apis::server::Running;

pub mod client;
pub mod environment;
pub mod v1;

pub type Started = environment::Environment<Running>;
