use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the lattice simulation core.
///
/// The domain is closed (no untrusted external input), so the taxonomy is
/// narrow: configuration problems are caught before any particle is created,
/// and losing the worker thread is the only runtime failure the driver can
/// report. Empty-container lookups use `Option` rather than an error.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run configuration (zero dimension, non-positive spacing, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The simulation worker thread terminated abnormally and its engine
    /// could not be reclaimed.
    #[error("simulation worker thread was lost")]
    WorkerLost,
}
