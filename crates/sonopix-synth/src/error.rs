//! Error types for the synthesis core.

use sonopix_spec::ImageError;
use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur during a synthesis job.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The input image violates its buffer invariants.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ImageError),

    /// The job was cancelled cooperatively. Not a defect; callers surface
    /// this as a distinct status rather than a failure.
    #[error("synthesis cancelled")]
    Cancelled,

    /// Any other failure during synthesis or encoding. Fatal for the
    /// current job only.
    #[error("generation failed: {message}")]
    GenerationFailed {
        /// Error message.
        message: String,
    },
}

impl SynthError {
    /// Creates a generation failure with a message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            message: message.into(),
        }
    }

    /// Wire-level error code used by the job messaging protocol.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidInput(_) => "INVALID_INPUT",
            SynthError::Cancelled => "CANCELLED",
            SynthError::GenerationFailed { .. } => "GENERATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(SynthError::Cancelled.code(), "CANCELLED");
        assert_eq!(SynthError::generation("boom").code(), "GENERATION_FAILED");
        let err = SynthError::from(ImageError::EmptyDimensions {
            width: 0,
            height: 3,
        });
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_messages() {
        let err = SynthError::generation("oscillator bank overflow");
        assert!(err.to_string().contains("oscillator bank overflow"));
    }
}
