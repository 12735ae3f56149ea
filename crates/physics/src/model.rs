use pendulum_solvers::transient::semi_implicit_euler;

use crate::{
    DerivedCoordinates, EngineFault, EquationsOfMotion, IntegrationSettings, KinematicState,
    MechanicalEnergy, PhysicalParameters,
};

/// A double pendulum: parameters, current state and how to advance it.
///
/// The model is a plain value with no interior mutability. Whoever owns it
/// steps it; everyone else reads copies of what it publishes.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumModel {
    equations: EquationsOfMotion,
    state: KinematicState,
    settings: IntegrationSettings,
    elapsed: f64,
}

impl PendulumModel {
    /// Creates a model at the default kinematic state (both rods horizontal,
    /// at rest).
    #[must_use]
    pub fn new(params: PhysicalParameters, settings: IntegrationSettings) -> Self {
        Self {
            equations: EquationsOfMotion::new(params),
            state: KinematicState::default(),
            settings,
            elapsed: 0.0,
        }
    }

    /// Returns the model with its kinematic state replaced.
    #[must_use]
    pub fn with_state(self, state: KinematicState) -> Self {
        Self { state, ..self }
    }

    #[must_use]
    pub fn parameters(&self) -> &PhysicalParameters {
        self.equations.parameters()
    }

    #[must_use]
    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &IntegrationSettings {
        &self.settings
    }

    /// Returns the simulated time in seconds since construction.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advances the model by one tick of `sub_steps` integration steps.
    ///
    /// A tick either completes or leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineFault`] if any sub-step hits a degenerate
    /// configuration or produces a non-finite value.
    pub fn step(&mut self) -> Result<(), EngineFault> {
        let dt = self.settings.dt();
        let mut next = self.state;
        for _ in 0..self.settings.sub_steps() {
            next = self.sub_step(&next, dt)?;
        }
        self.state = next;
        self.elapsed += self.settings.tick_duration();
        Ok(())
    }

    /// Advances the model by a single integration step of size `dt`.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineFault`] under the same conditions as [`step`].
    ///
    /// [`step`]: Self::step
    pub fn advance(&mut self, dt: f64) -> Result<(), EngineFault> {
        self.state = self.sub_step(&self.state, dt)?;
        self.elapsed += dt;
        Ok(())
    }

    /// Returns joint coordinates for the current state.
    #[must_use]
    pub fn coordinates(&self) -> DerivedCoordinates {
        DerivedCoordinates::compute(self.parameters(), &self.state)
    }

    /// Returns the mechanical energy of the current state.
    #[must_use]
    pub fn energy(&self) -> MechanicalEnergy {
        MechanicalEnergy::compute(self.parameters(), &self.state)
    }

    fn sub_step(&self, state: &KinematicState, dt: f64) -> Result<KinematicState, EngineFault> {
        let next = semi_implicit_euler::advance(&self.equations, state, dt)?;
        if next.is_finite() {
            Ok(next)
        } else {
            Err(EngineFault::NonFinite { state: next })
        }
    }
}

impl Default for PendulumModel {
    fn default() -> Self {
        Self::new(
            PhysicalParameters::default(),
            IntegrationSettings::default(),
        )
    }
}
