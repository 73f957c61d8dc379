//! Oscillating radial perturbation of labeled particles ("wiggle").
//!
//! Once per simulation step the controller rescales every particle carrying
//! the target label radially from the origin, expanding during the push
//! phase and contracting during the pull phase. The phase flips every fixed
//! number of ticks, driven purely by the tick count, never by wall-clock
//! time. This produces a slow breathing wave on the outer shell while inner
//! particles stay untouched.

use crate::particle::Container;
use glam::DVec3;

/// Two-valued oscillation state of the perturbation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Boundary particles move radially outward.
    Push,
    /// Boundary particles move radially inward.
    Pull,
}

impl Phase {
    fn flipped(self) -> Self {
        match self {
            Phase::Push => Phase::Pull,
            Phase::Pull => Phase::Push,
        }
    }
}

/// Stateful perturbation controller.
///
/// Starts in [`Phase::Push`]; after exactly `period` ticks the phase flips,
/// so a full push/pull cycle takes `2 * period` ticks and multiplies a
/// target particle's radius by `(1 - delta²)^period`.
#[derive(Debug)]
pub struct Wiggle {
    phase: Phase,
    ticks_in_phase: u32,
    period: u32,
    delta: f64,
}

impl Wiggle {
    pub fn new(period: u32, delta: f64) -> Self {
        Self {
            phase: Phase::Push,
            ticks_in_phase: 0,
            period,
            delta,
        }
    }

    /// Current oscillation phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Applies one perturbation step to every particle labeled `target`.
    ///
    /// The new position is `origin + (pos - origin) * (1 ± delta)` with the
    /// sign chosen by the current phase; with the origin at zero this is a
    /// plain scalar rescale. The phase flips after the move once `period`
    /// ticks have accumulated in it.
    pub fn tick(&mut self, container: &mut Container, target: DVec3) {
        let factor = match self.phase {
            Phase::Push => 1.0 + self.delta,
            Phase::Pull => 1.0 - self.delta,
        };

        for p in &mut container.particles {
            if p.label == target {
                p.pos *= factor;
            }
        }

        self.ticks_in_phase += 1;
        if self.ticks_in_phase == self.period {
            self.ticks_in_phase = 0;
            self.phase = self.phase.flipped();
        }
    }
}
