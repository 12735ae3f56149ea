use std::f64::consts::FRAC_PI_2;

use pendulum_core::SecondOrder;

/// Angles and angular velocities of both rods.
///
/// Angles are in radians from the downward vertical and are not wrapped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KinematicState {
    pub theta_1: f64,
    pub theta_2: f64,
    pub omega_1: f64,
    pub omega_2: f64,
}

/// Angular accelerations of both rods, in rad/s².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularAcceleration {
    pub alpha_1: f64,
    pub alpha_2: f64,
}

impl Default for KinematicState {
    /// Both rods horizontal and at rest.
    fn default() -> Self {
        Self {
            theta_1: FRAC_PI_2,
            theta_2: FRAC_PI_2,
            omega_1: 0.0,
            omega_2: 0.0,
        }
    }
}

impl KinematicState {
    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.theta_1.is_finite()
            && self.theta_2.is_finite()
            && self.omega_1.is_finite()
            && self.omega_2.is_finite()
    }
}

impl SecondOrder<f64> for KinematicState {
    type Acceleration = AngularAcceleration;

    fn kick(&self, acceleration: &AngularAcceleration, dt: f64) -> Self {
        Self {
            omega_1: self.omega_1 + acceleration.alpha_1 * dt,
            omega_2: self.omega_2 + acceleration.alpha_2 * dt,
            ..*self
        }
    }

    fn drift(&self, dt: f64) -> Self {
        Self {
            theta_1: self.theta_1 + self.omega_1 * dt,
            theta_2: self.theta_2 + self.omega_2 * dt,
            ..*self
        }
    }
}
