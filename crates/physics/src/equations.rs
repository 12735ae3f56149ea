use pendulum_core::Model;

use crate::{AngularAcceleration, EngineFault, KinematicState, PhysicalParameters};

/// `den1` smaller than this fraction of `(m1+m2)·L1` is treated as degenerate.
///
/// The ratio is `1 - m2/(m1+m2)·cos²(δ)`, which is unitless and never below
/// `m1/(m1+m2)`, so only an inner bob vanishingly light next to the outer one
/// trips it.
const MIN_RELATIVE_DENOMINATOR: f64 = 1e-12;

/// Lagrangian equations of motion of the double pendulum.
///
/// Calling the model with a [`KinematicState`] returns the angular
/// accelerations of both rods:
///
/// ```text
/// δ    = θ2 - θ1
/// den1 = (m1+m2)·L1 - m2·L1·cos²(δ)
/// den2 = (L2/L1)·den1
///
/// a1 = [ m2·L1·ω1²·sin(δ)·cos(δ) + m2·g·sin(θ2)·cos(δ)
///      + m2·L2·ω2²·sin(δ) - (m1+m2)·g·sin(θ1) ] / den1
///
/// a2 = [ -m2·L2·ω2²·sin(δ)·cos(δ) + (m1+m2)·g·sin(θ1)·cos(δ)
///      - (m1+m2)·L1·ω1²·sin(δ) - (m1+m2)·g·sin(θ2) ] / den2
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquationsOfMotion {
    params: PhysicalParameters,
}

impl EquationsOfMotion {
    #[must_use]
    pub fn new(params: PhysicalParameters) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn parameters(&self) -> &PhysicalParameters {
        &self.params
    }
}

impl Model for EquationsOfMotion {
    type Input = KinematicState;
    type Output = AngularAcceleration;
    type Error = EngineFault;

    fn call(&self, state: &KinematicState) -> Result<AngularAcceleration, EngineFault> {
        let KinematicState {
            theta_1,
            theta_2,
            omega_1,
            omega_2,
        } = *state;

        let l1 = self.params.rod_length_1();
        let l2 = self.params.rod_length_2();
        let m1 = self.params.bob_mass_1();
        let m2 = self.params.bob_mass_2();
        let g = self.params.gravity();
        let total_mass = m1 + m2;

        let delta = theta_2 - theta_1;
        let sin_delta = delta.sin();
        let cos_delta = delta.cos();

        let den1 = total_mass * l1 - m2 * l1 * cos_delta * cos_delta;
        let den2 = (l2 / l1) * den1;

        let relative = den1 / (total_mass * l1);
        // Written to also reject NaN.
        if !(relative.abs() >= MIN_RELATIVE_DENOMINATOR && den2.is_normal()) {
            return Err(EngineFault::DegenerateDenominator { den1, den2 });
        }

        let alpha_1 = (m2 * l1 * omega_1 * omega_1 * sin_delta * cos_delta
            + m2 * g * theta_2.sin() * cos_delta
            + m2 * l2 * omega_2 * omega_2 * sin_delta
            - total_mass * g * theta_1.sin())
            / den1;

        let alpha_2 = (-m2 * l2 * omega_2 * omega_2 * sin_delta * cos_delta
            + total_mass * g * theta_1.sin() * cos_delta
            - total_mass * l1 * omega_1 * omega_1 * sin_delta
            - total_mass * g * theta_2.sin())
            / den2;

        if !(alpha_1.is_finite() && alpha_2.is_finite()) {
            return Err(EngineFault::NonFinite { state: *state });
        }

        Ok(AngularAcceleration { alpha_1, alpha_2 })
    }
}
