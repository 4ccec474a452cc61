//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Pipeline failure
    #[error(transparent)]
    Pyfuzzer(#[from] pyfuzzer::PyfuzzerError),

    /// Log subscriber could not be installed
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a logging error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pyfuzzer::{PyfuzzerError, ToolError};

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: CliError = PyfuzzerError::from(ToolError::ExitStatus {
            command: "clang -o foo".to_string(),
            code: 1,
        })
        .into();
        assert_eq!(
            err.to_string(),
            "command 'clang -o foo' returned non-zero exit status 1"
        );
    }

    #[test]
    fn test_logging_error() {
        let err = CliError::logging("already set");
        assert!(err.to_string().contains("Logging"));
        assert!(err.to_string().contains("already set"));
    }
}
