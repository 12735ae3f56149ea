use std::{
    mem,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use pendulum_physics::{
    DerivedCoordinates, EngineFault, ParameterOverrides, PendulumModel, PhysicalParameters,
};
use tracing::{info, warn};

use crate::{
    ControllerError, EngineConfig, Frame,
    driver::{Driver, Exit, Published},
};

/// Lifecycle state of the current model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// The model is installed but not being stepped.
    Stopped,

    /// A driver thread is stepping the model.
    Running,

    /// The model faulted; its last valid frame stays readable until it is
    /// replaced by [`SimulationController::restart`] or
    /// [`SimulationController::reconfigure`].
    Faulted(EngineFault),
}

#[derive(Debug)]
enum Phase {
    Idle(PendulumModel),
    Running(Driver),
    Faulted(EngineFault),
    /// Left behind only if a driver panicked mid-transition.
    Vacant,
}

#[derive(Debug)]
struct Lifecycle {
    run: u64,
    phase: Phase,
}

impl Lifecycle {
    /// Collects a driver that exited on its own.
    fn reap(&mut self) {
        if matches!(&self.phase, Phase::Running(driver) if driver.is_finished()) {
            self.halt();
        }
    }

    /// Stops any running driver and waits for it to exit.
    fn halt(&mut self) {
        self.phase = match mem::replace(&mut self.phase, Phase::Vacant) {
            Phase::Running(driver) => Self::settle(driver.stop()),
            other => other,
        };
    }

    fn settle(exit: Exit) -> Phase {
        match exit.fault {
            Some(fault) => Phase::Faulted(fault),
            None => Phase::Idle(exit.model),
        }
    }
}

/// Runs one double pendulum at a time on a background thread.
///
/// All operations take `&self`, so a controller can be shared behind an `Arc`
/// by any number of request handlers. Reads go through an immutable [`Frame`]
/// and never block on the driver for longer than a pointer swap. Lifecycle
/// operations serialize on an internal lock: a second `reconfigure` waits for
/// the first to finish installing its model.
///
/// Dropping the controller stops its driver.
#[derive(Debug)]
pub struct SimulationController {
    config: EngineConfig,
    published: Arc<Published>,
    lifecycle: Mutex<Lifecycle>,
}

impl SimulationController {
    /// Creates a stopped controller holding a default model.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let run = 1;
        let model = PendulumModel::new(PhysicalParameters::default(), config.integration());
        let published = Arc::new(Published::new(Frame::capture(run, 0, &model)));

        Self {
            config,
            published,
            lifecycle: Mutex::new(Lifecycle {
                run,
                phase: Phase::Idle(model),
            }),
        }
    }

    /// Creates a controller and starts stepping its default model.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver thread cannot be spawned.
    pub fn spawn(config: EngineConfig) -> Result<Self, ControllerError> {
        let controller = Self::new(config);
        controller.start()?;
        Ok(controller)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts stepping the installed model.
    ///
    /// # Errors
    ///
    /// Returns an error if a driver is already running, if the installed model
    /// faulted, or if the driver thread cannot be spawned.
    pub fn start(&self) -> Result<(), ControllerError> {
        let mut lifecycle = self.lock();
        lifecycle.reap();

        match mem::replace(&mut lifecycle.phase, Phase::Vacant) {
            Phase::Idle(model) => {
                let run = lifecycle.run;
                let tick = self.published.latest().tick;
                match self.spawn_driver(model.clone(), run, tick) {
                    Ok(driver) => {
                        lifecycle.phase = Phase::Running(driver);
                        info!(run, tick, "simulation started");
                        Ok(())
                    }
                    Err(err) => {
                        lifecycle.phase = Phase::Idle(model);
                        Err(err)
                    }
                }
            }
            phase @ Phase::Running(_) => {
                lifecycle.phase = phase;
                Err(ControllerError::AlreadyRunning)
            }
            Phase::Faulted(fault) => {
                lifecycle.phase = Phase::Faulted(fault);
                Err(ControllerError::Faulted(fault))
            }
            Phase::Vacant => Err(ControllerError::NoModel),
        }
    }

    /// Stops the driver and waits until it has exited. Does nothing if the
    /// simulation is not running.
    pub fn stop(&self) {
        let mut lifecycle = self.lock();
        if matches!(lifecycle.phase, Phase::Running(_)) {
            lifecycle.halt();
            info!(run = lifecycle.run, "simulation stopped");
        }
    }

    /// Returns the lifecycle state of the current model.
    pub fn status(&self) -> Status {
        let mut lifecycle = self.lock();
        lifecycle.reap();

        match lifecycle.phase {
            Phase::Running(_) => Status::Running,
            Phase::Faulted(fault) => Status::Faulted(fault),
            Phase::Idle(_) | Phase::Vacant => Status::Stopped,
        }
    }

    /// Returns the coordinates of the most recently published frame.
    pub fn coordinates(&self) -> DerivedCoordinates {
        self.published.latest().coordinates
    }

    /// Returns the most recently published frame.
    pub fn snapshot(&self) -> Arc<Frame> {
        self.published.latest()
    }

    /// Number of driver threads currently stepping a model.
    ///
    /// Never more than one; exposed for diagnostics.
    pub fn active_drivers(&self) -> usize {
        self.published.active_drivers()
    }

    /// Replaces the model with one built from `overrides` and starts it.
    ///
    /// Unspecified fields take their defaults. Parameters are validated before
    /// anything is touched, so a rejected request leaves the current run as it
    /// was. Otherwise the current driver is stopped and joined, the new model's
    /// initial frame is published, and only then does the new driver start.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the driver thread
    /// cannot be spawned.
    pub fn reconfigure(&self, overrides: &ParameterOverrides) -> Result<(), ControllerError> {
        let params = overrides.resolve().inspect_err(|err| {
            warn!(%err, "rejected reconfigure request");
        })?;
        self.install(params)
    }

    /// Replaces the model with a default one and starts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver thread cannot be spawned.
    pub fn restart(&self) -> Result<(), ControllerError> {
        self.install(PhysicalParameters::default())
    }

    fn install(&self, params: PhysicalParameters) -> Result<(), ControllerError> {
        let mut lifecycle = self.lock();
        lifecycle.halt();

        lifecycle.run += 1;
        let run = lifecycle.run;
        let model = PendulumModel::new(params, self.config.integration());
        self.published.publish(Frame::capture(run, 0, &model));

        match self.spawn_driver(model.clone(), run, 0) {
            Ok(driver) => {
                lifecycle.phase = Phase::Running(driver);
                info!(run, ?params, "installed new model");
                Ok(())
            }
            Err(err) => {
                lifecycle.phase = Phase::Idle(model);
                Err(err)
            }
        }
    }

    fn spawn_driver(
        &self,
        model: PendulumModel,
        run: u64,
        tick: u64,
    ) -> Result<Driver, ControllerError> {
        Driver::spawn(
            model,
            run,
            tick,
            self.config.tick_interval(),
            Arc::clone(&self.published),
        )
        .map_err(ControllerError::Spawn)
    }

    fn lock(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        let lifecycle = self
            .lifecycle
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Phase::Running(driver) = mem::replace(&mut lifecycle.phase, Phase::Vacant) {
            if !std::thread::panicking() {
                driver.stop();
            }
        }
    }
}
