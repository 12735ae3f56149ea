use std::io;

use pendulum_physics::{EngineFault, ValidationError};
use thiserror::Error;

/// Errors returned by [`SimulationController`] operations.
///
/// [`SimulationController`]: crate::SimulationController
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("rejected parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error("the simulation is already running")]
    AlreadyRunning,

    #[error("the current run faulted and must be replaced: {0}")]
    Faulted(EngineFault),

    #[error("no model is installed; restart or reconfigure first")]
    NoModel,

    #[error("failed to spawn the driver thread")]
    Spawn(#[source] io::Error),
}
