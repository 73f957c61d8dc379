//! Proximity-based spring wiring.
//!
//! Every unordered particle pair closer than the maximum spring length gets
//! exactly one spring. This is a pure radius cutoff over all pairs — O(n²)
//! distance evaluations, not a lattice-connectivity rule — so the resulting
//! degree distribution follows directly from local particle density.

use crate::particle::Container;

/// Connects proximate particle pairs with springs of two stiffness classes.
///
/// For every pair `(i, j)` with `i < j`, a spring is appended when the
/// separation is strictly less than `max_spring_length`. Stiffness is
/// `k_center` when the separation is strictly less than `spacing` (short
/// intra-cell bonds), otherwise `k_vertex`. Iterating ordered index pairs
/// once rules out self-loops and duplicate unordered pairs by construction.
///
/// If `max_spring_length <= spacing`, every created spring gets `k_vertex`.
pub fn connect(
    container: &mut Container,
    spacing: f64,
    max_spring_length: f64,
    k_center: f64,
    k_vertex: f64,
) {
    let n = container.particles.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let separation = container.particles[i].pos.distance(container.particles[j].pos);
            if separation < max_spring_length {
                let stiffness = if separation < spacing {
                    k_center
                } else {
                    k_vertex
                };
                container.add_spring(i, j, stiffness);
            }
        }
    }
}
