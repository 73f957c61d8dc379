use crate::types::{ParticleId, SpringId};
use glam::{DQuat, DVec3};

/// Classification label for sublattice-A ("corner") sites.
pub const LABEL_SUBLATTICE_A: DVec3 = DVec3::new(1.0, 1.0, 0.0);
/// Classification label for sublattice-B ("body-center") sites.
pub const LABEL_SUBLATTICE_B: DVec3 = DVec3::new(0.0, 1.0, 0.0);
/// Classification label for boundary particles beyond the outer radius.
pub const LABEL_BOUNDARY: DVec3 = DVec3::new(1.0, 0.0, 0.0);
/// Classification label for the single particle nearest the origin.
pub const LABEL_CENTER: DVec3 = DVec3::new(0.0, 1.0, 1.0);

/// One point mass in the lattice.
///
/// The label is a 3-component classification color compared exactly; it is
/// not used for rendering. `fixed` is advisory to the collaborator engine,
/// which excludes fixed particles from integration.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: DVec3,
    pub mass: f64,
    pub label: DVec3,
    pub fixed: bool,
    pub drag: Option<f64>,
}

impl Particle {
    pub fn new(pos: DVec3, mass: f64, label: DVec3) -> Self {
        Self {
            pos,
            mass,
            label,
            fixed: false,
            drag: None,
        }
    }

    /// Euclidean distance of this particle from the origin.
    pub fn radius(&self) -> f64 {
        self.pos.length()
    }
}

/// A spring between two distinct particles.
///
/// Endpoints satisfy `a < b` by construction, so an unordered pair occurs at
/// most once. The rest length is implicit: the collaborator engine assigns it
/// from the current particle separation when the spring is registered.
#[derive(Debug, Clone)]
pub struct Spring {
    pub a: ParticleId,
    pub b: ParticleId,
    pub stiffness: f64,
}

/// Owns the particle and spring sets for one run.
///
/// Insertion-ordered; indices are stable for the run's duration. Every spring
/// endpoint refers to a particle in the same container.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub particles: Vec<Particle>,
    pub springs: Vec<Spring>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_particle(&mut self, particle: Particle) -> ParticleId {
        let id = self.particles.len();
        self.particles.push(particle);
        id
    }

    /// Appends a spring between two distinct particles.
    ///
    /// ### Panics
    /// Debug builds assert `a < b`; callers iterate unordered index pairs
    /// once, which guarantees the order.
    pub fn add_spring(&mut self, a: ParticleId, b: ParticleId, stiffness: f64) -> SpringId {
        debug_assert!(a < b, "spring endpoints must be distinct and ordered");
        let id = self.springs.len();
        self.springs.push(Spring { a, b, stiffness });
        id
    }

    /// Rotates every particle position about an axis through the origin.
    ///
    /// Used by the driver to apply pending camera-angle deltas; a zero angle
    /// leaves the container untouched.
    pub fn rotate_about_origin(&mut self, axis: DVec3, angle: f64) {
        if angle == 0.0 {
            return;
        }
        let rotation = DQuat::from_axis_angle(axis, angle);
        for p in &mut self.particles {
            p.pos = rotation * p.pos;
        }
    }
}
