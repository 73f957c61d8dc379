//! Collaborator physics-engine interface.
//!
//! The core never integrates forces itself: springs, accelerations,
//! velocities, and positions are advanced by an external engine behind
//! [`PhysicsEngine`]. The driver registers the constructed particle/spring
//! graph, advances the engine's virtual clock in fixed increments, and moves
//! bulk position state across the boundary with `pull_state`/`push_state`.

use crate::particle::Container;
use glam::DVec3;
use std::time::Duration;

/// The engine surface the simulation driver requires.
///
/// `advance_and_pause` has blocking semantics: it returns once the engine's
/// virtual clock has reached the requested time, and it is the driver loop's
/// only suspension point. Rest lengths are the engine's concern — it assigns
/// them from the current particle separation when a spring is registered.
pub trait PhysicsEngine {
    /// Drops all engine-side particles and springs and zeroes the clock.
    fn reset(&mut self);

    /// Registers one particle; returns the engine-side index.
    fn create_particle(&mut self, pos: DVec3) -> usize;

    /// Registers one spring between two previously created particles.
    fn create_spring(&mut self, a: usize, b: usize, stiffness: f64) -> usize;

    /// Sets the per-particle integration time resolution.
    fn set_time_step(&mut self, dt: f64);

    /// Sets the global external acceleration applied to every particle.
    fn set_global_acceleration(&mut self, acceleration: DVec3);

    /// Current virtual time in seconds.
    fn time(&self) -> f64;

    /// Blocks until the virtual clock reaches `target_time`, then pauses.
    fn advance_and_pause(&mut self, target_time: f64);

    /// Resumes integration after a pause.
    fn resume(&mut self);

    /// Halts integration.
    fn stop(&mut self);

    /// Bulk-reads engine-side positions into the container.
    fn pull_state(&mut self, container: &mut Container);

    /// Bulk-writes container positions to the engine.
    fn push_state(&mut self, container: &Container);
}

/// A no-integration stand-in engine.
///
/// Stores positions verbatim, tracks virtual time, and applies no forces;
/// useful for headless runs and for exercising the driver loop in tests.
/// With a wall-clock pace set, each `advance_and_pause` sleeps for that
/// duration, approximating the blocking wait of a real engine.
#[derive(Debug, Default)]
pub struct NullEngine {
    time: f64,
    running: bool,
    time_step: f64,
    global_acceleration: DVec3,
    positions: Vec<DVec3>,
    springs: Vec<(usize, usize, f64)>,
    pace: Option<Duration>,
}

impl NullEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `NullEngine` whose `advance_and_pause` sleeps `pace` per call.
    pub fn paced(pace: Duration) -> Self {
        Self {
            pace: Some(pace),
            ..Self::default()
        }
    }

    /// Number of registered particles.
    pub fn particle_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of registered springs.
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Whether integration is currently resumed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The most recently configured time resolution.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// The most recently configured global acceleration.
    pub fn global_acceleration(&self) -> DVec3 {
        self.global_acceleration
    }
}

impl PhysicsEngine for NullEngine {
    fn reset(&mut self) {
        self.time = 0.0;
        self.running = false;
        self.positions.clear();
        self.springs.clear();
    }

    fn create_particle(&mut self, pos: DVec3) -> usize {
        self.positions.push(pos);
        self.positions.len() - 1
    }

    fn create_spring(&mut self, a: usize, b: usize, stiffness: f64) -> usize {
        self.springs.push((a, b, stiffness));
        self.springs.len() - 1
    }

    fn set_time_step(&mut self, dt: f64) {
        self.time_step = dt;
    }

    fn set_global_acceleration(&mut self, acceleration: DVec3) {
        self.global_acceleration = acceleration;
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn advance_and_pause(&mut self, target_time: f64) {
        if let Some(pace) = self.pace {
            std::thread::sleep(pace);
        }
        self.time = self.time.max(target_time);
        self.running = false;
    }

    fn resume(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn pull_state(&mut self, container: &mut Container) {
        for (p, pos) in container.particles.iter_mut().zip(&self.positions) {
            p.pos = *pos;
        }
    }

    fn push_state(&mut self, container: &Container) {
        self.positions.clear();
        self.positions
            .extend(container.particles.iter().map(|p| p.pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::{LABEL_SUBLATTICE_A, Particle};

    #[test]
    fn clock_advances_to_the_requested_time() {
        let mut e = NullEngine::new();
        assert_eq!(e.time(), 0.0);
        e.advance_and_pause(0.01);
        assert_eq!(e.time(), 0.01);
        e.advance_and_pause(0.02);
        assert_eq!(e.time(), 0.02);
    }

    #[test]
    fn reset_clears_registered_state() {
        let mut e = NullEngine::new();
        e.create_particle(DVec3::X);
        e.create_particle(DVec3::Y);
        e.create_spring(0, 1, 1.0);
        e.advance_and_pause(1.0);

        e.reset();

        assert_eq!(e.particle_count(), 0);
        assert_eq!(e.spring_count(), 0);
        assert_eq!(e.time(), 0.0);
    }

    #[test]
    fn push_then_pull_round_trips_positions() {
        let mut e = NullEngine::new();
        let mut c = Container::new();
        c.add_particle(Particle::new(DVec3::new(1.0, 2.0, 3.0), 1.0, LABEL_SUBLATTICE_A));
        e.push_state(&c);

        // Disturb the container, then pull the engine's copy back.
        c.particles[0].pos = DVec3::ZERO;
        e.pull_state(&mut c);

        assert_eq!(c.particles[0].pos, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn configuration_setters_are_recorded() {
        let mut e = NullEngine::new();
        e.set_time_step(0.001);
        e.set_global_acceleration(DVec3::ZERO);
        assert_eq!(e.time_step(), 0.001);
        assert_eq!(e.global_acceleration(), DVec3::ZERO);
    }

    #[test]
    fn resume_and_stop_toggle_the_running_flag() {
        let mut e = NullEngine::new();
        assert!(!e.is_running());
        e.resume();
        assert!(e.is_running());
        e.stop();
        assert!(!e.is_running());
    }
}
