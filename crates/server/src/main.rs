use std::{error::Error, sync::Arc};

use pendulum_engine::SimulationController;
use pendulum_server::{ServerConfig, routes};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = ServerConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let controller = Arc::new(SimulationController::spawn(config.engine)?);
    info!(
        environment = ?config.environment,
        static_dir = %config.static_dir.display(),
        "simulation running"
    );

    let (addr, server) = warp::serve(routes(Arc::clone(&controller), config.static_dir))
        .try_bind_with_graceful_shutdown(config.addr, async {
            // An error here means the signal handler could not be installed;
            // the server then runs until killed.
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })?;
    info!("pendulum server listening on http://{addr}");

    server.await;

    info!("shutting down");
    controller.stop();
    Ok(())
}
