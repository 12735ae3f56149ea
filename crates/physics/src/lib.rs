//! Physics of a planar double pendulum.
//!
//! A [`PendulumModel`] bundles validated [`PhysicalParameters`], the evolving
//! [`KinematicState`] and the [`IntegrationSettings`] used to advance it. The
//! model knows nothing about threads or I/O; it is advanced one tick at a time
//! by whoever owns it.
//!
//! Angles are measured from the downward vertical and coordinates use a screen
//! frame where `y` grows downward from the pivot.
//!
//! # Features
//!
//! - `serde`: derives `Serialize` for published values and `Deserialize` for
//!   [`ParameterOverrides`].

mod coordinates;
mod energy;
mod equations;
mod error;
mod model;
mod params;
mod settings;
mod state;

pub use coordinates::DerivedCoordinates;
pub use energy::MechanicalEnergy;
pub use equations::EquationsOfMotion;
pub use error::{EngineFault, ValidationError};
pub use model::PendulumModel;
pub use params::{Parameter, ParameterOverrides, PhysicalParameters};
pub use settings::IntegrationSettings;
pub use state::{AngularAcceleration, KinematicState};
