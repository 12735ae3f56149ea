use std::time::Duration;

use pendulum_physics::IntegrationSettings;
use thiserror::Error;

/// Configuration for a [`SimulationController`].
///
/// [`SimulationController`]: crate::SimulationController
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    tick_interval: Duration,
    integration: IntegrationSettings,
}

/// Errors that can occur when validating an engine config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(30),
            integration: IntegrationSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new config.
    ///
    /// # Errors
    ///
    /// Returns an error if `tick_interval` is zero.
    pub fn new(
        tick_interval: Duration,
        integration: IntegrationSettings,
    ) -> Result<Self, ConfigError> {
        if tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(Self {
            tick_interval,
            integration,
        })
    }

    /// Returns the wall-clock time between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Returns the integration settings given to every new model.
    #[must_use]
    pub fn integration(&self) -> IntegrationSettings {
        self.integration
    }
}
