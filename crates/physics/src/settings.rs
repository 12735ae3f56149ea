use crate::{
    ValidationError,
    params::{Parameter, positive},
};

/// How a model advances per external tick.
///
/// Each tick runs `sub_steps` integration steps of size `dt`, so the simulated
/// time per tick is `dt * sub_steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationSettings {
    dt: f64,
    sub_steps: u32,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            dt: 0.01,
            sub_steps: 3,
        }
    }
}

impl IntegrationSettings {
    /// Creates validated integration settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not finite and positive, if `sub_steps`
    /// is zero, or if a whole tick overflows.
    pub fn new(dt: f64, sub_steps: u32) -> Result<Self, ValidationError> {
        let dt = positive(Parameter::TimeStep, dt)?;
        if sub_steps == 0 {
            return Err(ValidationError::ZeroSubSteps);
        }
        if !(dt * f64::from(sub_steps)).is_finite() {
            return Err(ValidationError::OutOfRange {
                quantity: "tick duration",
            });
        }
        Ok(Self { dt, sub_steps })
    }

    /// Returns the physics time step in seconds.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the number of integration steps per tick.
    #[must_use]
    pub fn sub_steps(&self) -> u32 {
        self.sub_steps
    }

    /// Returns the simulated time covered by one tick.
    #[must_use]
    pub fn tick_duration(&self) -> f64 {
        self.dt * f64::from(self.sub_steps)
    }
}
