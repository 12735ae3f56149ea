use std::f64::consts::FRAC_PI_2;

use pendulum_physics::{
    DerivedCoordinates, IntegrationSettings, KinematicState, MechanicalEnergy, PendulumModel,
    PhysicalParameters,
};

fn heavy_inner_bob() -> PhysicalParameters {
    PhysicalParameters::new([120.0, 120.0], [50.0, 10.0], 9.81).expect("valid parameters")
}

fn trajectory(model: &mut PendulumModel, ticks: usize) -> Vec<KinematicState> {
    (0..ticks)
        .map(|_| {
            model.step().expect("should step");
            *model.state()
        })
        .collect()
}

#[test]
fn repeated_runs_are_bit_identical() {
    let settings = IntegrationSettings::new(0.02, 4).expect("valid settings");

    let mut first = PendulumModel::new(heavy_inner_bob(), settings);
    let mut second = PendulumModel::new(heavy_inner_bob(), settings);

    let a = trajectory(&mut first, 500);
    let b = trajectory(&mut second, 500);

    for (left, right) in a.iter().zip(&b) {
        assert_eq!(left.theta_1.to_bits(), right.theta_1.to_bits());
        assert_eq!(left.theta_2.to_bits(), right.theta_2.to_bits());
        assert_eq!(left.omega_1.to_bits(), right.omega_1.to_bits());
        assert_eq!(left.omega_2.to_bits(), right.omega_2.to_bits());
    }
}

#[test]
fn energy_does_not_diverge() {
    let params = heavy_inner_bob();
    let mut model = PendulumModel::new(params, IntegrationSettings::default());
    let initial = model.energy().total();
    let scale = MechanicalEnergy::scale(&params);

    let mut max_drift: f64 = 0.0;
    for _ in 0..1000 {
        model.advance(0.06).expect("should advance");
        max_drift = max_drift.max((model.energy().total() - initial).abs());
    }

    // Sign or grouping mistakes in the equations of motion push this past the
    // full scale within a few hundred steps.
    assert!(
        max_drift < 0.1 * scale,
        "energy drifted by {max_drift} against a scale of {scale}"
    );
}

#[test]
fn coordinates_follow_the_state_exactly() {
    let params = PhysicalParameters::new([90.0, 60.0], [3.0, 7.0], 9.81)
        .and_then(|p| p.with_origin(250.0, 125.0))
        .expect("valid parameters");
    let mut model = PendulumModel::new(params, IntegrationSettings::default());

    for _ in 0..200 {
        model.step().expect("should step");

        let state = model.state();
        let coords = model.coordinates();

        let x1 = 250.0 + 90.0 * state.theta_1.sin();
        let y1 = 125.0 + 90.0 * state.theta_1.cos();
        assert_eq!(coords.x1, x1);
        assert_eq!(coords.y1, y1);
        assert_eq!(coords.x2, x1 + 60.0 * state.theta_2.sin());
        assert_eq!(coords.y2, y1 + 60.0 * state.theta_2.cos());
        assert_eq!(coords.mass1, 3.0);
        assert_eq!(coords.mass2, 7.0);
    }
}

#[test]
fn fresh_model_starts_horizontal_at_rest() {
    let model = PendulumModel::default();

    assert_eq!(
        *model.state(),
        KinematicState {
            theta_1: FRAC_PI_2,
            theta_2: FRAC_PI_2,
            omega_1: 0.0,
            omega_2: 0.0,
        }
    );
    assert_eq!(
        model.coordinates(),
        DerivedCoordinates::compute(&PhysicalParameters::default(), &KinematicState::default())
    );
    assert_eq!(model.elapsed(), 0.0);
}

#[test]
fn long_default_run_stays_finite() {
    let mut model = PendulumModel::default();

    for _ in 0..10_000 {
        model.step().expect("should step");
    }

    assert!(model.state().is_finite());
}
