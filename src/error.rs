//! Error types for the simulator.
//!
//! Every fallible operation in the crate returns [`SimError`] through the
//! [`Result`] alias. None of these are retried internally; they surface to
//! the caller that triggered them.

/// Main error type for the simulator.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SimError {
    /// A binary vector operation was given operands of different lengths.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A component index was outside `[0, dimension)`.
    #[error("index {index} is out of range for a {dimension}-dimensional vector")]
    OutOfRange { index: usize, dimension: usize },
    /// Attempted to normalize a vector whose magnitude is exactly zero.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,
    /// Body mass must be strictly positive.
    #[error("invalid mass {0}: mass must be positive")]
    InvalidMass(f64),
    /// Body identifiers may not be empty.
    #[error("body identifier must not be empty")]
    EmptyIdentifier,
    /// A run was asked to step by a NaN or infinite timestep.
    #[error("invalid time step {0}: time step must be finite")]
    InvalidTimeStep(f64),
    /// Obstacle radius must be nonnegative.
    #[error("invalid obstacle radius {0}")]
    InvalidRadius(f64),
    /// No body carries the requested identifier.
    #[error("body with id {0} not found")]
    NotFound(String),
}

/// Convenient Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;
