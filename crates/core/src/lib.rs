//! Core traits shared by the pendulum solvers and physics crates.
//!
//! - [`Model`]: a deterministic callable mapping a typed input to a typed output
//! - [`SecondOrder`]: a state made of positions and velocities that can be
//!   kicked by an acceleration and drifted by its own velocity

mod model;
mod step;

pub use model::Model;
pub use step::{AccelerationOf, SecondOrder};
