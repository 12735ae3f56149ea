//! Fixed-step integrators for transient simulations.
//!
//! # Solvers
//!
//! - [`semi_implicit_euler`]: kick velocities, then drift positions

pub mod semi_implicit_euler;
