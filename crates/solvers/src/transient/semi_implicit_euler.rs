//! Semi-implicit (symplectic) Euler solver for second-order states.
//!
//! Each step evaluates the model at the current state to get an acceleration,
//! kicks the velocities with it, then drifts the positions using the *updated*
//! velocities:
//!
//! ```text
//! v_{n+1} = v_n + a(x_n, v_n) * dt
//! x_{n+1} = x_n + v_{n+1} * dt
//! ```
//!
//! Unlike forward Euler this keeps the energy of oscillatory systems bounded,
//! which is what a long-running pendulum needs.
//!
//! # Example
//!
//! ```ignore
//! use pendulum_solvers::transient::semi_implicit_euler;
//!
//! let mut state = initial;
//! for _ in 0..sub_steps {
//!     state = semi_implicit_euler::advance(&equations, &state, dt)?;
//! }
//! ```

use pendulum_core::{AccelerationOf, Model, SecondOrder};

/// Advances `state` by a single kick-then-drift step of size `dt`.
///
/// # Errors
///
/// Returns the model's error if the acceleration cannot be computed.
pub fn advance<M, S, D>(model: &M, state: &S, dt: D) -> Result<S, M::Error>
where
    M: Model<Input = S, Output = AccelerationOf<S, D>>,
    S: SecondOrder<D>,
    D: Clone,
{
    let acceleration = model.call(state)?;
    Ok(state.kick(&acceleration, dt.clone()).drift(dt))
}
