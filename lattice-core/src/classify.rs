//! Linear scans that classify particles by their distance from the origin.
//!
//! All three operations are O(n) over the container:
//! - [`find_center`] — nearest-to-origin search.
//! - [`tag_outer`] — label and fix everything beyond a radius.
//! - [`tag_inner`] — label everything inside a radius.

use crate::particle::Container;
use crate::types::ParticleId;
use glam::DVec3;

/// Finds the particle nearest the origin.
///
/// Ties are resolved by the first-encountered index, so the result is stable
/// but depends on insertion order. Returns `None` for an empty container;
/// callers must check before indexing.
pub fn find_center(container: &Container) -> Option<ParticleId> {
    let mut best = None;
    let mut best_d2 = f64::MAX;
    for (id, p) in container.particles.iter().enumerate() {
        let d2 = p.pos.length_squared();
        if d2 < best_d2 {
            best_d2 = d2;
            best = Some(id);
        }
    }
    best
}

/// Labels every particle strictly beyond `max_distance` from the origin and
/// marks it fixed.
///
/// The fixed flag is advisory: the collaborator engine excludes fixed
/// particles from integration, this core does not enforce it.
pub fn tag_outer(container: &mut Container, max_distance: f64, label: DVec3) {
    for p in &mut container.particles {
        if p.radius() > max_distance {
            p.label = label;
            p.fixed = true;
        }
    }
}

/// Labels every particle strictly inside `min_distance` from the origin.
///
/// Symmetric counterpart to [`tag_outer`] for alternative configurations;
/// inner particles keep integrating, so the fixed flag is left alone.
pub fn tag_inner(container: &mut Container, min_distance: f64, label: DVec3) {
    for p in &mut container.particles {
        if p.radius() < min_distance {
            p.label = label;
        }
    }
}
