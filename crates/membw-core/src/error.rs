//! Error types for the membw benchmark.

use thiserror::Error;

/// Result type alias used across the membw crates.
pub type Result<T> = std::result::Result<T, MembwError>;

/// Benchmark error type.
///
/// Any device-layer failure is fatal to the whole run: the error is
/// propagated unchanged to the top-level handler in the CLI, which prints
/// it and exits with status 1. There is no retry and no partial result.
#[derive(Error, Debug)]
pub enum MembwError {
    /// Malformed `--size` argument.
    #[error("invalid transfer size '{input}': {reason}")]
    InvalidSize {
        /// The argument as given on the command line.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Iteration count below 1.
    #[error("iteration count must be at least 1")]
    InvalidIterations,

    /// Device index outside the enumerated device range.
    #[error("device index {index} out of range: {count} device(s) available")]
    InvalidDeviceIndex {
        /// The requested index.
        index: usize,
        /// Number of devices actually enumerated.
        count: usize,
    },

    /// Statistics reduction over an empty sample set.
    #[error("measurement produced no samples")]
    EmptySamples,

    /// Underlying driver/runtime call failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// Buffer allocation failed.
    #[error("allocation of {size} bytes failed: {reason}")]
    AllocationFailed {
        /// Requested size in bytes.
        size: usize,
        /// Driver-reported reason.
        reason: String,
    },

    /// A transfer could not be issued or completed.
    #[error("transfer failed: {0}")]
    TransferFailed(String),
}

impl MembwError {
    /// Whether this error is a CLI-argument validation failure (as opposed
    /// to a device/runtime failure). Validation errors get a usage
    /// reminder appended by the CLI; both classes exit with status 1.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MembwError::InvalidSize { .. }
                | MembwError::InvalidIterations
                | MembwError::InvalidDeviceIndex { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_carry_context() {
        let err = MembwError::InvalidDeviceIndex { index: 3, count: 1 };
        assert_eq!(
            err.to_string(),
            "device index 3 out of range: 1 device(s) available"
        );

        let err = MembwError::AllocationFailed {
            size: 4096,
            reason: "out of memory".to_string(),
        };
        assert_eq!(err.to_string(), "allocation of 4096 bytes failed: out of memory");
    }

    #[test]
    fn validation_classification() {
        assert!(MembwError::InvalidIterations.is_validation());
        assert!(MembwError::InvalidSize {
            input: "5X".to_string(),
            reason: "bad suffix".to_string(),
        }
        .is_validation());
        assert!(!MembwError::Backend("boom".to_string()).is_validation());
        assert!(!MembwError::TransferFailed("boom".to_string()).is_validation());
    }
}
