use crate::{KinematicState, PhysicalParameters};

/// Kinetic and potential energy of the pendulum.
///
/// Potential energy is zero at the pivot height and negative below it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MechanicalEnergy {
    pub kinetic: f64,
    pub potential: f64,
}

impl MechanicalEnergy {
    #[must_use]
    pub fn compute(params: &PhysicalParameters, state: &KinematicState) -> Self {
        let l1 = params.rod_length_1();
        let l2 = params.rod_length_2();
        let m1 = params.bob_mass_1();
        let m2 = params.bob_mass_2();
        let g = params.gravity();

        let KinematicState {
            theta_1,
            theta_2,
            omega_1,
            omega_2,
        } = *state;

        let kinetic = 0.5 * m1 * l1 * l1 * omega_1 * omega_1
            + 0.5
                * m2
                * (l1 * l1 * omega_1 * omega_1
                    + l2 * l2 * omega_2 * omega_2
                    + 2.0 * l1 * l2 * omega_1 * omega_2 * (theta_1 - theta_2).cos());

        let potential = -(m1 + m2) * g * l1 * theta_1.cos() - m2 * g * l2 * theta_2.cos();

        Self { kinetic, potential }
    }

    /// Returns the total mechanical energy.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }

    /// Returns the potential energy released by dropping both bobs from pivot
    /// height to hanging straight down.
    ///
    /// Useful as a yardstick for energy drift, since the total energy itself
    /// can be zero.
    #[must_use]
    pub fn scale(params: &PhysicalParameters) -> f64 {
        let g = params.gravity();
        (params.bob_mass_1() + params.bob_mass_2()) * g * params.rod_length_1()
            + params.bob_mass_2() * g * params.rod_length_2()
    }
}
