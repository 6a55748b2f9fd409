//! Error types and context management for sampling operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all sampling operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Hexagon side lengths rejected before any state is built
    InvalidGeometry {
        /// Which side was rejected (`"a"`, `"b"` or `"c"`)
        side: &'static str,
        /// Provided side length
        value: usize,
        /// Explanation of why the value is invalid
        reason: &'static str,
    },

    /// A restored random stream produced different updates than it did before
    ///
    /// The sample could no longer be guaranteed exact, so the run is aborted.
    ReplayInconsistency {
        /// Sampler round in which the mismatch was detected
        round: usize,
        /// Number of updates in the offending block
        block_steps: u64,
        /// Fingerprint recorded the first time the block was replayed
        expected: u64,
        /// Fingerprint produced by the latest replay
        found: u64,
    },

    /// The lower chain ended a round above the upper chain somewhere
    CouplingViolation {
        /// Sampler round in which the order broke
        round: usize,
        /// Number of cells where lower exceeds upper
        cells: usize,
    },

    /// Coalescence did not happen within the configured number of rounds
    SamplingTimeout {
        /// Rounds completed before giving up
        rounds: usize,
        /// Lookback window of the last completed round
        lookback: u64,
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry {
                side,
                value,
                reason,
            } => {
                write!(f, "Invalid hexagon side {side} = {value}: {reason}")
            }
            Self::ReplayInconsistency {
                round,
                block_steps,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Replay of a {block_steps}-step block diverged in round {round} \
                     (fingerprint {expected:#018x}, now {found:#018x})"
                )
            }
            Self::CouplingViolation { round, cells } => {
                write!(
                    f,
                    "Coupling broke in round {round}: lower state exceeds upper state in {cells} cells"
                )
            }
            Self::SamplingTimeout { rounds, lookback } => {
                write!(
                    f,
                    "No coalescence after {rounds} rounds (lookback window {lookback} steps)"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for sampling results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
