use conflict_gateway::{app, bootstrap};
use tracing::info;

#[tokio::main]
async fn main() {
    let (config, gateway) = bootstrap::app::setup();

    let jobs = app::start(&config, gateway).await;

    // handle the signals
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Conflict gateway shutting down..");

            // Await for all jobs to shutdown
            futures::future::join_all(jobs).await;
            info!("Conflict gateway successfully shutdown.");
        }
    }
}
