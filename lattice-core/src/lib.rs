//! Core BCC spring-lattice construction and simulation-control library.
//!
//! Main components:
//! - [`particle`] — particles, springs, and the per-run container.
//! - [`lattice`] — BCC lattice generation under a spherical cutoff.
//! - [`classify`] — nearest-to-origin search and radial boundary tagging.
//! - [`topology`] — proximity-based spring wiring with two stiffness classes.
//! - [`wiggle`] — the oscillating boundary perturbation controller.
//! - [`engine`] — the collaborator physics-engine interface.
//! - [`driver`] — the pausable run/stop simulation loop.
//! - [`config`] — run configuration and validation.
//! - [`error`] — crate-wide error type.
//! - [`types`] — shared index aliases.
//!
//! Rendering, persistence, and force integration are out of scope here:
//! integration is delegated to a [`engine::PhysicsEngine`] collaborator, and
//! the surrounding application only issues commands through [`driver::Driver`].

pub mod classify;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod particle;
pub mod topology;
pub mod types;
pub mod wiggle;
