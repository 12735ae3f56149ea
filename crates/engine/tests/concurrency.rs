use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    thread,
    time::Duration,
};

use approx::assert_relative_eq;
use pendulum_engine::{EngineConfig, Frame, SimulationController};
use pendulum_physics::{DerivedCoordinates, IntegrationSettings, ParameterOverrides};

const READERS: usize = 8;

fn fast_controller() -> SimulationController {
    let config = EngineConfig::new(Duration::from_millis(1), IntegrationSettings::default())
        .expect("valid config");
    SimulationController::spawn(config).expect("should start")
}

/// Checks that everything in a frame came from one model at one instant.
fn assert_consistent(frame: &Frame) {
    assert_eq!(
        frame.coordinates,
        DerivedCoordinates::compute(&frame.parameters, &frame.state)
    );
}

fn uniform(length: f64, mass: f64) -> ParameterOverrides {
    ParameterOverrides {
        rod_length_1: Some(length),
        rod_length_2: Some(length),
        bob_mass_1: Some(mass),
        bob_mass_2: Some(mass),
        gravity: None,
    }
}

#[test]
fn readers_never_see_a_torn_frame() {
    let controller = fast_controller();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..READERS {
            scope.spawn(|| {
                let mut last_tick = 0;
                while !done.load(Ordering::Relaxed) {
                    let frame = controller.snapshot();
                    assert_consistent(&frame);
                    assert!(frame.tick >= last_tick, "ticks went backwards");
                    last_tick = frame.tick;
                }
            });
        }

        let start = controller.snapshot().tick;
        while controller.snapshot().tick < start + 50 {
            thread::sleep(Duration::from_millis(1));
        }
        done.store(true, Ordering::Relaxed);
    });
}

#[test]
fn reconfigure_never_mixes_models() {
    let controller = fast_controller();
    let done = AtomicBool::new(false);
    let short_light = uniform(100.0, 5.0);
    let long_heavy = uniform(200.0, 20.0);

    thread::scope(|scope| {
        for _ in 0..READERS {
            scope.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    let frame = controller.snapshot();
                    assert_consistent(&frame);

                    // The coordinates alone must pair each mass with its rod.
                    let c = controller.coordinates();
                    let (ox, oy) = frame.parameters.origin();
                    let rod_1 = (c.x1 - ox).hypot(c.y1 - oy);
                    let expected = match c.mass1 {
                        m if m == 5.0 => 100.0,
                        m if m == 20.0 => 200.0,
                        _ => 150.0,
                    };
                    assert_relative_eq!(rod_1, expected, epsilon = 1e-9);
                }
            });
        }

        for round in 0..40 {
            let overrides = if round % 2 == 0 {
                &short_light
            } else {
                &long_heavy
            };
            controller.reconfigure(overrides).expect("valid parameters");
            thread::sleep(Duration::from_millis(2));
        }
        done.store(true, Ordering::Relaxed);
    });

    assert_eq!(controller.snapshot().parameters.bob_mass_1(), 20.0);
}

#[test]
fn concurrent_reconfigures_serialize() {
    const CALLERS: usize = 6;
    const CALLS_EACH: usize = 10;

    let controller = fast_controller();
    let initial_run = controller.snapshot().run;
    let done = AtomicBool::new(false);
    let peak = AtomicUsize::new(0);

    thread::scope(|scope| {
        scope.spawn(|| {
            while !done.load(Ordering::Relaxed) {
                peak.fetch_max(controller.active_drivers(), Ordering::Relaxed);
            }
        });

        let callers: Vec<_> = (0..CALLERS)
            .map(|caller| {
                let controller = &controller;
                scope.spawn(move || {
                    for call in 0..CALLS_EACH {
                        let mass = 1.0 + (caller * CALLS_EACH + call) as f64;
                        controller
                            .reconfigure(&uniform(120.0, mass))
                            .expect("valid parameters");
                    }
                })
            })
            .collect();

        for caller in callers {
            caller.join().expect("caller panicked");
        }
        done.store(true, Ordering::Relaxed);
    });

    // Every request installed exactly one model, and at most one driver ever
    // stepped at a time.
    assert_eq!(
        controller.snapshot().run,
        initial_run + (CALLERS * CALLS_EACH) as u64
    );
    assert!(peak.load(Ordering::Relaxed) <= 1);
    assert_eq!(controller.active_drivers(), 1);
}
