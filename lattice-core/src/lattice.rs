//! BCC lattice generation under a spherical cutoff.
//!
//! Two interleaved cubic sublattices are generated around the origin:
//! corner sites at half-spacing offsets from the bounding box start, and
//! body-center sites a full spacing in. Candidates beyond the crop radius
//! are skipped, turning the cubic grid into an approximately spherical
//! particle cloud. Generation is fully deterministic: z-outer, y-middle,
//! x-inner loop order for sublattice A, then the same order for B.

use crate::classify;
use crate::config::Config;
use crate::error::Result;
use crate::particle::{Container, LABEL_CENTER, LABEL_SUBLATTICE_A, LABEL_SUBLATTICE_B, Particle};
use glam::DVec3;

/// Generates a BCC particle lattice cropped to a sphere of `max_distance`.
///
/// Sublattice A iterates `stacks × columns × rows` candidate sites starting
/// half a spacing in from the box corner; sublattice B iterates one fewer
/// site per axis starting a full spacing in, which places it at the body
/// centers of the A cells. A candidate is kept only if its distance from the
/// origin is strictly less than `max_distance`. Every particle gets `mass`.
pub fn build_lattice(
    spacing: f64,
    mass: f64,
    stacks: u32,
    columns: u32,
    rows: u32,
    max_distance: f64,
) -> Container {
    let mut container = Container::new();

    let z_start = -(f64::from(stacks) * spacing) / 2.0;
    let y_start = -(f64::from(columns) * spacing) / 2.0;
    let x_start = -(f64::from(rows) * spacing) / 2.0;

    // Sublattice A: corner sites at half-spacing offsets.
    let mut pos_z = z_start + spacing / 2.0;
    for _z in 0..stacks {
        let mut pos_y = y_start + spacing / 2.0;
        for _y in 0..columns {
            let mut pos_x = x_start + spacing / 2.0;
            for _x in 0..rows {
                let pos = DVec3::new(pos_x, pos_y, pos_z);
                if pos.length() < max_distance {
                    container.add_particle(Particle::new(pos, mass, LABEL_SUBLATTICE_A));
                }
                pos_x += spacing;
            }
            pos_y += spacing;
        }
        pos_z += spacing;
    }

    // Sublattice B: body-center sites between the A sites.
    let mut pos_z = z_start + spacing;
    for _z in 0..stacks.saturating_sub(1) {
        let mut pos_y = y_start + spacing;
        for _y in 0..columns.saturating_sub(1) {
            let mut pos_x = x_start + spacing;
            for _x in 0..rows.saturating_sub(1) {
                let pos = DVec3::new(pos_x, pos_y, pos_z);
                if pos.length() < max_distance {
                    container.add_particle(Particle::new(pos, mass, LABEL_SUBLATTICE_B));
                }
                pos_x += spacing;
            }
            pos_y += spacing;
        }
        pos_z += spacing;
    }

    container
}

/// Builds the configured cubic lattice and re-labels the nearest-to-origin
/// particle as the designated center.
///
/// Validates the configuration first, so the error surfaces before any
/// particle exists.
pub fn build_from_config(cfg: &Config) -> Result<Container> {
    cfg.validate()?;

    let mut container = build_lattice(
        cfg.spacing,
        cfg.particle_mass,
        cfg.dimension,
        cfg.dimension,
        cfg.dimension,
        cfg.lattice_cutoff(),
    );

    if let Some(center) = classify::find_center(&container) {
        container.particles[center].label = LABEL_CENTER;
    }

    Ok(container)
}
