//! Headless shell around the lattice simulation core.
//!
//! Issues the four commands the core understands — start, toggle the
//! perturbation, nudge a camera angle, stop — against a [`NullEngine`]
//! stand-in, and reports snapshot statistics through the logger. Rendering
//! and UI layout are out of scope; a real frontend would swap in an actual
//! physics engine and draw the snapshots instead of logging them.

use glam::DVec3;
use lattice_core::config::Config;
use lattice_core::driver::{Driver, Snapshot};
use lattice_core::engine::NullEngine;
use lattice_core::particle::LABEL_BOUNDARY;
use log::info;
use std::thread;
use std::time::Duration;

/// Mean distance from the origin of the particles carrying `label`.
fn mean_radius(snap: &Snapshot, label: DVec3) -> Option<f64> {
    let radii: Vec<f64> = snap
        .positions
        .iter()
        .zip(&snap.labels)
        .filter(|(_, l)| **l == label)
        .map(|(pos, _)| pos.length())
        .collect();
    if radii.is_empty() {
        return None;
    }
    Some(radii.iter().sum::<f64>() / radii.len() as f64)
}

fn report(snap: &Snapshot) {
    match mean_radius(snap, LABEL_BOUNDARY) {
        Some(radius) => info!(
            "t = {:6.2} s  particles = {}  boundary mean radius = {:.4} m",
            snap.time,
            snap.positions.len(),
            radius
        ),
        None => info!(
            "t = {:6.2} s  particles = {}  (no boundary shell)",
            snap.time,
            snap.positions.len()
        ),
    }
}

fn main() -> lattice_core::error::Result<()> {
    env_logger::init();

    let cfg = Config::default();
    // Pace the stub engine so the loop advances in roughly real time.
    let engine = NullEngine::paced(Duration::from_millis(10));
    let mut driver = Driver::new(cfg, engine);

    driver.start()?;
    info!("simulation started");

    driver.enable_wiggle();
    info!("boundary perturbation enabled");

    // One-shot camera nudge: a tenth of a radian about X.
    driver.set_camera_angles(0.1, 0.0, 0.0);

    for _ in 0..10 {
        thread::sleep(Duration::from_millis(300));
        if let Some(snap) = driver.snapshot() {
            report(&snap);
        }
    }

    driver.stop();
    driver.shutdown()?;
    info!("simulation stopped");
    Ok(())
}
