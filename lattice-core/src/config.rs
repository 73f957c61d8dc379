use crate::error::{Error, Result};
use std::time::Duration;

/// Configuration for one simulation run.
///
/// Geometry, stiffness, and timing values default to the reference model:
/// a 10-cell BCC lattice with a spacing of `2 * e` meters, two spring
/// stiffness classes, and a 0.01 s virtual step per loop iteration.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of cells per axis (stacks = columns = rows).
    pub dimension: u32,
    /// Distance between adjacent corner sites \[m\].
    pub spacing: f64,
    /// Mass assigned to every lattice particle \[kg\].
    pub particle_mass: f64,
    /// Heavier mass available for a designated wave-center particle \[kg\].
    pub center_mass: f64,
    /// Stiffness for short intra-cell bonds (separation < spacing) \[N/m\].
    pub k_center: f64,
    /// Stiffness for longer inter-cell bonds \[N/m\].
    pub k_vertex: f64,
    /// Multiple of `spacing` giving the maximum spring length. At 1.0 only
    /// the body-center bonds connect; 1.1 also wires the cube edges.
    pub spring_length_factor: f64,
    /// Divisor for the spherical crop radius applied while generating the
    /// lattice: candidates beyond `spacing * dimension / factor` are skipped.
    pub lattice_cutoff_factor: f64,
    /// Divisor for the boundary-classification radius: particles beyond
    /// `spacing * dimension / factor` are tagged and fixed.
    pub boundary_cutoff_factor: f64,
    /// Per-particle integration time resolution handed to the engine \[s\].
    pub engine_time_step: f64,
    /// Virtual time the engine advances per driver loop iteration \[s\].
    pub step_interval: f64,
    /// Number of perturbation ticks between push/pull phase flips.
    pub wiggle_period: u32,
    /// Radial rescale magnitude per perturbation tick.
    pub wiggle_delta: f64,
    /// Wall-clock delay between engine halt and the Idle transition.
    pub stop_grace: Duration,
    /// Wall-clock interval at which `shutdown` polls for Idle.
    pub idle_poll: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimension: 10,
            spacing: 2.718 * 2.0,
            particle_mass: 1.0,
            center_mass: 1836.0,
            k_center: 1.91e3,
            k_vertex: 1.66e3,
            spring_length_factor: 1.1,
            lattice_cutoff_factor: 2.0,
            boundary_cutoff_factor: 2.2,
            engine_time_step: 0.001,
            step_interval: 0.01,
            wiggle_period: 20,
            wiggle_delta: 0.01,
            stop_grace: Duration::from_millis(100),
            idle_poll: Duration::from_millis(100),
        }
    }
}

impl Config {
    /// Checks the configuration before any particle is created.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(Error::InvalidConfig("dimension must be > 0".into()));
        }
        for (name, value) in [
            ("spacing", self.spacing),
            ("particle_mass", self.particle_mass),
            ("center_mass", self.center_mass),
            ("k_center", self.k_center),
            ("k_vertex", self.k_vertex),
            ("spring_length_factor", self.spring_length_factor),
            ("lattice_cutoff_factor", self.lattice_cutoff_factor),
            ("boundary_cutoff_factor", self.boundary_cutoff_factor),
            ("engine_time_step", self.engine_time_step),
            ("step_interval", self.step_interval),
            ("wiggle_delta", self.wiggle_delta),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.wiggle_period == 0 {
            return Err(Error::InvalidConfig("wiggle_period must be > 0".into()));
        }
        Ok(())
    }

    /// Maximum separation at which two particles get connected by a spring.
    pub fn max_spring_length(&self) -> f64 {
        self.spacing * self.spring_length_factor
    }

    /// Spherical crop radius used while generating lattice sites.
    pub fn lattice_cutoff(&self) -> f64 {
        self.spacing * f64::from(self.dimension) / self.lattice_cutoff_factor
    }

    /// Radius beyond which particles are classified as boundary and fixed.
    pub fn boundary_cutoff(&self) -> f64 {
        self.spacing * f64::from(self.dimension) / self.boundary_cutoff_factor
    }
}
