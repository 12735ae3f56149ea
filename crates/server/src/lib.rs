//! Serves a live double pendulum over HTTP.
//!
//! The server provides:
//! - `GET /coords` returning the latest bob positions and masses
//! - `POST /update` installing a model built from JSON parameter overrides
//! - `POST /restart` installing a default model
//! - `GET /status` returning the lifecycle state of the current run
//! - Static file serving for the canvas renderer
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use pendulum_engine::SimulationController;
//! use pendulum_server::{ServerConfig, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let controller = Arc::new(SimulationController::spawn(config.engine)?);
//!     warp::serve(routes(controller, config.static_dir)).run(config.addr).await;
//!     Ok(())
//! }
//! ```

mod config;
mod handlers;

use std::{path::PathBuf, sync::Arc};

use pendulum_engine::SimulationController;
use warp::{Filter, Rejection, Reply};

pub use config::{ConfigError, Environment, ServerConfig};

/// Largest `/update` body accepted, in bytes.
const MAX_UPDATE_BODY: u64 = 4 * 1024;

/// The JSON API on its own, without static files or rejection handling.
pub fn api(
    controller: Arc<SimulationController>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let coords = warp::path("coords")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_controller(Arc::clone(&controller)))
        .map(handlers::coords);

    let update = warp::path("update")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_UPDATE_BODY))
        .and(warp::body::json())
        .and(with_controller(Arc::clone(&controller)))
        .and_then(handlers::update);

    let restart = warp::path("restart")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_controller(Arc::clone(&controller)))
        .and_then(handlers::restart);

    let status = warp::path("status")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_controller(controller))
        .and_then(handlers::status);

    coords.or(update).or(restart).or(status)
}

/// Every route the server exposes, with rejections rendered as JSON errors.
pub fn routes(
    controller: Arc<SimulationController>,
    static_dir: PathBuf,
) -> impl Filter<Extract = (impl Reply,), Error = std::convert::Infallible> + Clone {
    api(controller)
        .or(warp::fs::dir(static_dir))
        .recover(handlers::rejection)
        .with(warp::trace::request())
}

fn with_controller(
    controller: Arc<SimulationController>,
) -> impl Filter<Extract = (Arc<SimulationController>,), Error = std::convert::Infallible> + Clone
{
    warp::any().map(move || Arc::clone(&controller))
}
