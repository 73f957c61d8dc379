//! The pausable simulation run loop.
//!
//! [`Driver`] owns the run/stop protocol with the collaborator engine. Each
//! run rebuilds the particle graph from scratch (lattice → boundary tagging →
//! spring wiring), registers it with the engine, and then loops on a
//! dedicated worker thread:
//!
//! 1. Advance the engine's virtual clock by one fixed step and block until
//!    it is reached (the loop's only suspension point).
//! 2. Pull current particle state from the engine.
//! 3. Apply pending one-shot camera-rotation deltas about X, then Y, then Z.
//! 4. If the perturbation latch is set, run one wiggle tick.
//! 5. Publish a read-only snapshot, push state back, resume integration.
//!
//! Cross-thread shared state is limited to atomics (stop flag, perturbation
//! latch, one latest-value-wins slot per rotation axis) plus the snapshot
//! mutex; the container itself is owned exclusively by the worker while
//! running. Cancellation is cooperative: `stop` is observed at the top of
//! the next iteration, bounded by one step interval of latency.

use crate::classify;
use crate::config::Config;
use crate::engine::PhysicsEngine;
use crate::error::{Error, Result};
use crate::lattice;
use crate::particle::{Container, LABEL_BOUNDARY};
use crate::topology;
use crate::wiggle::Wiggle;
use glam::DVec3;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Lifecycle state of the driver: `Idle → Running → Stopping → Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopping,
}

const STATE_IDLE: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_STOPPING: u8 = 2;

/// Read-only copy of the particle state, published once per loop iteration
/// for external reporters.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Virtual time at which the snapshot was taken \[s\].
    pub time: f64,
    pub positions: Vec<DVec3>,
    pub labels: Vec<DVec3>,
}

/// State shared between the command side and the worker thread.
struct Shared {
    state: AtomicU8,
    stop: AtomicBool,
    wiggle_on: AtomicBool,
    /// Pending rotation deltas as f64 bits, one slot per axis. Writers
    /// overwrite (latest value wins); the worker swaps in zero on read, so
    /// each delta is applied exactly once.
    angles: [AtomicU64; 3],
    snapshot: Mutex<Option<Snapshot>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_IDLE),
            stop: AtomicBool::new(false),
            wiggle_on: AtomicBool::new(false),
            angles: [AtomicU64::new(0), AtomicU64::new(0), AtomicU64::new(0)],
            snapshot: Mutex::new(None),
        }
    }

    fn state(&self) -> DriverState {
        match self.state.load(Ordering::Relaxed) {
            STATE_RUNNING => DriverState::Running,
            STATE_STOPPING => DriverState::Stopping,
            _ => DriverState::Idle,
        }
    }

    fn set_state(&self, state: DriverState) {
        let raw = match state {
            DriverState::Idle => STATE_IDLE,
            DriverState::Running => STATE_RUNNING,
            DriverState::Stopping => STATE_STOPPING,
        };
        self.state.store(raw, Ordering::Relaxed);
    }

    fn store_angles(&self, x: f64, y: f64, z: f64) {
        self.angles[0].store(x.to_bits(), Ordering::Relaxed);
        self.angles[1].store(y.to_bits(), Ordering::Relaxed);
        self.angles[2].store(z.to_bits(), Ordering::Relaxed);
    }

    fn take_angles(&self) -> [f64; 3] {
        // 0u64 is the bit pattern of 0.0, so swapping in zero clears the slot.
        [
            f64::from_bits(self.angles[0].swap(0, Ordering::Relaxed)),
            f64::from_bits(self.angles[1].swap(0, Ordering::Relaxed)),
            f64::from_bits(self.angles[2].swap(0, Ordering::Relaxed)),
        ]
    }

    fn publish_snapshot(&self, time: f64, container: &Container) {
        if let Ok(mut slot) = self.snapshot.lock() {
            *slot = Some(Snapshot {
                time,
                positions: container.particles.iter().map(|p| p.pos).collect(),
                labels: container.particles.iter().map(|p| p.label).collect(),
            });
        }
    }
}

/// Command-side handle to the simulation.
///
/// All commands may be issued from any thread holding the handle; the
/// particle container is never touched directly from the command side.
pub struct Driver<E: PhysicsEngine + Send + 'static> {
    cfg: Config,
    shared: Arc<Shared>,
    engine: Option<E>,
    worker: Option<JoinHandle<E>>,
}

impl<E: PhysicsEngine + Send + 'static> Driver<E> {
    pub fn new(cfg: Config, engine: E) -> Self {
        Self {
            cfg,
            shared: Arc::new(Shared::new()),
            engine: Some(engine),
            worker: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.shared.state()
    }

    /// Starts a run on a dedicated worker thread.
    ///
    /// A no-op while a run is active (start is idempotent outside `Idle`).
    /// The configuration is validated before any particle is created; the
    /// engine is reset and rebuilt from scratch on every run.
    pub fn start(&mut self) -> Result<()> {
        if self.state() != DriverState::Idle {
            return Ok(());
        }
        self.cfg.validate()?;

        let engine = match self.worker.take() {
            // Reclaim the engine from the previous, already-finished run.
            Some(handle) => handle.join().map_err(|_| Error::WorkerLost)?,
            None => self.engine.take().ok_or(Error::WorkerLost)?,
        };

        self.shared.stop.store(false, Ordering::Relaxed);
        // Drop camera deltas left over from a previous run.
        self.shared.take_angles();
        self.shared.set_state(DriverState::Running);

        let cfg = self.cfg;
        let shared = Arc::clone(&self.shared);
        self.worker = Some(thread::spawn(move || run_loop(cfg, shared, engine)));
        Ok(())
    }

    /// Requests a stop; observed at the top of the next loop iteration.
    ///
    /// Harmless while idle.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::Relaxed);
    }

    /// Stores pending camera-rotation deltas, one per axis, in radians.
    ///
    /// The worker applies them once on its next iteration and clears them;
    /// repeated calls before that overwrite (latest value wins).
    pub fn set_camera_angles(&self, x: f64, y: f64, z: f64) {
        self.shared.store_angles(x, y, z);
    }

    /// Turns the boundary perturbation on.
    ///
    /// This is a one-way latch: there is no way to turn the perturbation
    /// off again for the remainder of the run.
    pub fn enable_wiggle(&self) {
        self.shared.wiggle_on.store(true, Ordering::Relaxed);
    }

    /// Whether the perturbation latch has been set.
    pub fn wiggle_enabled(&self) -> bool {
        self.shared.wiggle_on.load(Ordering::Relaxed)
    }

    /// The most recently published particle snapshot, if a loop iteration
    /// has completed since the run started.
    pub fn snapshot(&self) -> Option<Snapshot> {
        match self.shared.snapshot.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }

    /// Blocks until the worker has fully exited, then reclaims the engine.
    ///
    /// Requests a stop and polls for `Idle` at the configured interval.
    /// There is no timeout: this returns once the worker self-reports idle
    /// (or its thread is observed to have terminated).
    pub fn shutdown(&mut self) -> Result<()> {
        self.stop();
        loop {
            if self.state() == DriverState::Idle {
                break;
            }
            if let Some(worker) = &self.worker
                && worker.is_finished()
            {
                break;
            }
            thread::sleep(self.cfg.idle_poll);
        }
        if let Some(handle) = self.worker.take() {
            match handle.join() {
                Ok(engine) => self.engine = Some(engine),
                Err(_) => {
                    self.shared.set_state(DriverState::Idle);
                    return Err(Error::WorkerLost);
                }
            }
        }
        Ok(())
    }
}

impl<E: PhysicsEngine + Send + 'static> Drop for Driver<E> {
    fn drop(&mut self) {
        // Cooperative: the worker observes the flag at its next loop
        // boundary and winds down on its own.
        self.stop();
    }
}

/// Worker-side run loop; returns the engine so the handle can reclaim it.
fn run_loop<E: PhysicsEngine>(cfg: Config, shared: Arc<Shared>, mut engine: E) -> E {
    engine.reset();

    let mut container = match lattice::build_from_config(&cfg) {
        Ok(container) => container,
        Err(err) => {
            // Unreachable when start() validated the same config; bail to
            // Idle rather than panicking the worker.
            log::error!("run aborted, lattice construction failed: {err}");
            shared.set_state(DriverState::Idle);
            return engine;
        }
    };
    classify::tag_outer(&mut container, cfg.boundary_cutoff(), LABEL_BOUNDARY);
    topology::connect(
        &mut container,
        cfg.spacing,
        cfg.max_spring_length(),
        cfg.k_center,
        cfg.k_vertex,
    );

    for p in &container.particles {
        engine.create_particle(p.pos);
    }
    for s in &container.springs {
        engine.create_spring(s.a, s.b, s.stiffness);
    }
    engine.set_time_step(cfg.engine_time_step);
    engine.set_global_acceleration(DVec3::ZERO);

    log::info!(
        "run started: {} particles, {} springs",
        container.particles.len(),
        container.springs.len()
    );

    let mut wiggle = Wiggle::new(cfg.wiggle_period, cfg.wiggle_delta);

    while !shared.stop.load(Ordering::Relaxed) {
        let target = engine.time() + cfg.step_interval;
        engine.advance_and_pause(target);

        engine.pull_state(&mut container);

        let [ax, ay, az] = shared.take_angles();
        container.rotate_about_origin(DVec3::X, ax);
        container.rotate_about_origin(DVec3::Y, ay);
        container.rotate_about_origin(DVec3::Z, az);

        if shared.wiggle_on.load(Ordering::Relaxed) {
            wiggle.tick(&mut container, LABEL_BOUNDARY);
        }

        shared.publish_snapshot(engine.time(), &container);

        engine.push_state(&container);
        engine.resume();
    }

    shared.set_state(DriverState::Stopping);
    engine.stop();
    thread::sleep(cfg.stop_grace);
    log::info!("run stopped at virtual time {:.3} s", engine.time());
    shared.set_state(DriverState::Idle);
    engine
}
