//! Background execution and lifecycle control for a double pendulum.
//!
//! A [`SimulationController`] owns one [`PendulumModel`] at a time and steps it
//! on a dedicated thread at a fixed wall-clock cadence. Readers get immutable
//! [`Frame`]s, so they never observe a half-applied step, and replacing the
//! model always stops and joins the previous thread first.
//!
//! [`PendulumModel`]: pendulum_physics::PendulumModel

mod config;
mod controller;
mod driver;
mod error;
mod frame;

pub use config::{ConfigError, EngineConfig};
pub use controller::{SimulationController, Status};
pub use error::ControllerError;
pub use frame::Frame;
