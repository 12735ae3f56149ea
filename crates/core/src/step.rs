/// A state made of generalized positions and their velocities.
///
/// Second-order systems such as pendulums are advanced in two stages: a
/// `kick` that applies an acceleration to the velocities, and a `drift` that
/// moves the positions by the velocities the state currently holds. Solvers
/// choose the order of the two stages; kicking first gives semi-implicit Euler.
///
/// `Delta` is the independent variable, usually a time step in seconds.
pub trait SecondOrder<Delta> {
    /// The second derivative of the positions with respect to `Delta`.
    type Acceleration;

    /// Returns the state with velocities advanced by `acceleration * delta`.
    #[must_use]
    fn kick(&self, acceleration: &Self::Acceleration, delta: Delta) -> Self;

    /// Returns the state with positions advanced by `velocity * delta`.
    #[must_use]
    fn drift(&self, delta: Delta) -> Self;
}

/// Type alias for the acceleration of a `SecondOrder` type.
pub type AccelerationOf<T, Delta> = <T as SecondOrder<Delta>>::Acceleration;
