//! The background thread that steps a model.

use std::{
    panic,
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicUsize, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use pendulum_physics::{EngineFault, PendulumModel};
use tracing::{debug, error, trace};

use crate::Frame;

/// State shared between a controller and its drivers.
///
/// The driver is the only writer; it swaps in a fresh `Arc<Frame>` per tick.
#[derive(Debug)]
pub(crate) struct Published {
    frame: RwLock<Arc<Frame>>,
    active_drivers: AtomicUsize,
}

impl Published {
    pub(crate) fn new(frame: Frame) -> Self {
        Self {
            frame: RwLock::new(Arc::new(frame)),
            active_drivers: AtomicUsize::new(0),
        }
    }

    pub(crate) fn latest(&self) -> Arc<Frame> {
        Arc::clone(&self.frame.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub(crate) fn publish(&self, frame: Frame) {
        let frame = Arc::new(frame);
        *self.frame.write().unwrap_or_else(PoisonError::into_inner) = frame;
    }

    pub(crate) fn active_drivers(&self) -> usize {
        self.active_drivers.load(Ordering::SeqCst)
    }
}

/// What a driver hands back when its thread exits.
#[derive(Debug)]
pub(crate) struct Exit {
    pub(crate) model: PendulumModel,
    pub(crate) fault: Option<EngineFault>,
}

/// Handle to a running driver thread.
#[derive(Debug)]
pub(crate) struct Driver {
    stop: Sender<()>,
    handle: JoinHandle<Exit>,
}

impl Driver {
    /// Spawns a thread that steps `model` every `tick_interval` until stopped,
    /// counting ticks on from `tick`.
    ///
    /// On failure the model is dropped along with the thread closure.
    pub(crate) fn spawn(
        model: PendulumModel,
        run: u64,
        tick: u64,
        tick_interval: Duration,
        published: Arc<Published>,
    ) -> std::io::Result<Self> {
        let (stop, stop_rx) = crossbeam_channel::bounded(1);
        let handle = thread::Builder::new()
            .name("pendulum-driver".into())
            .spawn(move || drive(model, run, tick, tick_interval, &stop_rx, &published))?;

        Ok(Self { stop, handle })
    }

    /// Returns `true` once the thread has exited on its own (after a fault).
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the thread to stop and blocks until it has exited.
    ///
    /// A panic in the driver is a defect and is resumed on the caller.
    pub(crate) fn stop(self) -> Exit {
        // The receiver is gone if the driver already exited after a fault.
        let _ = self.stop.try_send(());
        match self.handle.join() {
            Ok(exit) => exit,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

fn drive(
    mut model: PendulumModel,
    run: u64,
    mut tick: u64,
    tick_interval: Duration,
    stop: &Receiver<()>,
    published: &Published,
) -> Exit {
    let previously_active = published.active_drivers.fetch_add(1, Ordering::SeqCst);
    debug_assert_eq!(previously_active, 0, "two drivers stepping at once");
    debug!(run, "driver started");

    let mut deadline = Instant::now() + tick_interval;

    let exit = loop {
        match stop.recv_deadline(deadline) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                break Exit { model, fault: None };
            }
        }

        if let Err(fault) = model.step() {
            error!(run, tick, %fault, "engine fault; freezing at the last valid frame");
            break Exit {
                model,
                fault: Some(fault),
            };
        }

        tick += 1;
        published.publish(Frame::capture(run, tick, &model));
        trace!(run, tick, "stepped");

        // Skip missed ticks rather than bursting to catch up.
        deadline += tick_interval;
        let now = Instant::now();
        if deadline < now {
            deadline = now + tick_interval;
        }
    };

    published.active_drivers.fetch_sub(1, Ordering::SeqCst);
    debug!(run, tick, "driver stopped");
    exit
}
