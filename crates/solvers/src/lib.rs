//! Time integrators for models built on [`pendulum_core`].
//!
//! # Modules
//!
//! - [`transient`]: fixed-step integrators for [`SecondOrder`] states
//!
//! [`SecondOrder`]: pendulum_core::SecondOrder

pub mod transient;
