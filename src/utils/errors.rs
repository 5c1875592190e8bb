use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or feeding the solver.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Indicates an invalid radius (zero, negative, non-finite, or larger than the grid allows).
    InvalidRadius,
    /// Indicates invalid obstacle dimensions (e.g., a zero-width box).
    InvalidDimensions,
    /// Indicates an invalid time value (e.g., a non-positive frame duration).
    InvalidTime,
    /// Indicates an invalid motion cycle period.
    InvalidPeriod,
    /// Indicates a sub-step count of zero.
    InvalidSubSteps,
    /// Indicates a world size that cannot hold a single grid cell.
    InvalidWorldSize,
    /// Indicates an invalid coefficient value (e.g., negative dampening).
    InvalidCoefficient,
    /// Indicates that no particle exists with the given identifier.
    ParticleNotFound(usize),
    /// The worker thread pool could not be created.
    ThreadPool(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::InvalidRadius => write!(f, "Invalid radius value"),
            SolverError::InvalidDimensions => write!(f, "Invalid obstacle dimensions"),
            SolverError::InvalidTime => write!(f, "Invalid time value"),
            SolverError::InvalidPeriod => write!(f, "Invalid motion period"),
            SolverError::InvalidSubSteps => write!(f, "Sub-step count must be at least 1"),
            SolverError::InvalidWorldSize => write!(f, "Invalid world size"),
            SolverError::InvalidCoefficient => write!(f, "Invalid coefficient value"),
            SolverError::ParticleNotFound(id) => write!(f, "No particle with id {}", id),
            SolverError::ThreadPool(msg) => write!(f, "Thread pool error: {}", msg),
        }
    }
}

impl Error for SolverError {}
