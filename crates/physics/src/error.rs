use thiserror::Error;

use crate::{KinematicState, Parameter};

/// Rejection of caller-supplied parameters or settings.
///
/// Validation happens before anything is replaced, so a running simulation is
/// never affected by a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("{parameter} must be strictly positive, got {value}")]
    NotPositive { parameter: Parameter, value: f64 },

    #[error("{parameter} must be finite, got {value}")]
    NotFinite { parameter: Parameter, value: f64 },

    /// Each value is fine on its own but a quantity derived from them is not
    /// representable.
    #[error("parameters out of range: {quantity} overflows")]
    OutOfRange { quantity: &'static str },

    #[error("sub-steps per tick must be at least 1")]
    ZeroSubSteps,
}

/// A failed integration step.
///
/// Faults are fatal to the run that produced them: the state is left at the
/// last value that stepped cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineFault {
    #[error("degenerate equations of motion: den1 = {den1}, den2 = {den2}")]
    DegenerateDenominator { den1: f64, den2: f64 },

    #[error("integration produced a non-finite state: {state:?}")]
    NonFinite { state: KinematicState },
}
