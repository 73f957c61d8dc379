/// Identifier for a particle in a [`crate::particle::Container`].
///
/// This is an index into `Container::particles`, and is only meaningful
/// within the lifetime of a given run's container.
pub type ParticleId = usize;

/// Identifier for a spring in a [`crate::particle::Container`].
///
/// This is an index into `Container::springs`, with the same lifetime
/// caveat as [`ParticleId`].
pub type SpringId = usize;
