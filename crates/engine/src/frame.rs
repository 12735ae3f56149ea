use pendulum_physics::{DerivedCoordinates, KinematicState, PendulumModel, PhysicalParameters};

/// An immutable capture of a model, published after every tick.
///
/// Everything in a frame comes from the same model at the same instant, so
/// coordinates and parameters never disagree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Frame {
    /// Identifies the model; increases each time a model is installed.
    pub run: u64,

    /// Ticks completed by this model.
    pub tick: u64,

    /// Simulated seconds since the model was installed.
    pub elapsed: f64,

    pub parameters: PhysicalParameters,
    pub state: KinematicState,
    pub coordinates: DerivedCoordinates,
}

impl Frame {
    pub(crate) fn capture(run: u64, tick: u64, model: &PendulumModel) -> Self {
        Self {
            run,
            tick,
            elapsed: model.elapsed(),
            parameters: *model.parameters(),
            state: *model.state(),
            coordinates: model.coordinates(),
        }
    }
}
