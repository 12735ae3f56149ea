use crate::{KinematicState, PhysicalParameters};

/// Joint positions in the renderer's frame, with masses echoed for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DerivedCoordinates {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub mass1: f64,
    pub mass2: f64,
}

impl DerivedCoordinates {
    /// Computes joint positions for `state` under `params`.
    ///
    /// The frame has `y` growing downward, so a hanging rod has positive `y`
    /// relative to the pivot.
    #[must_use]
    pub fn compute(params: &PhysicalParameters, state: &KinematicState) -> Self {
        let (origin_x, origin_y) = params.origin();
        let l1 = params.rod_length_1();
        let l2 = params.rod_length_2();

        let x1 = origin_x + l1 * state.theta_1.sin();
        let y1 = origin_y + l1 * state.theta_1.cos();
        let x2 = x1 + l2 * state.theta_2.sin();
        let y2 = y1 + l2 * state.theta_2.cos();

        Self {
            x1,
            y1,
            x2,
            y2,
            mass1: params.bob_mass_1(),
            mass2: params.bob_mass_2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn hanging_straight_down() {
        let params = PhysicalParameters::default();
        let state = KinematicState {
            theta_1: 0.0,
            theta_2: 0.0,
            omega_1: 0.0,
            omega_2: 0.0,
        };

        let coords = DerivedCoordinates::compute(&params, &state);

        assert_relative_eq!(coords.x1, 300.0);
        assert_relative_eq!(coords.y1, 450.0);
        assert_relative_eq!(coords.x2, 300.0);
        assert_relative_eq!(coords.y2, 600.0);
    }

    #[test]
    fn default_state_is_horizontal() {
        let params = PhysicalParameters::default();

        let coords = DerivedCoordinates::compute(&params, &KinematicState::default());

        assert_relative_eq!(coords.x1, 450.0);
        assert_relative_eq!(coords.y1, 300.0, epsilon = 1e-9);
        assert_relative_eq!(coords.x2, 600.0);
        assert_relative_eq!(coords.y2, 300.0, epsilon = 1e-9);
        assert_eq!(coords.mass1, 10.0);
        assert_eq!(coords.mass2, 10.0);
    }
}
