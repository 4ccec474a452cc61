//! Result and error types for pyfuzzer.

use crate::exec::ToolError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for pyfuzzer operations
pub type PyfuzzerResult<T> = Result<T, PyfuzzerError>;

/// Host Python build configuration could not be resolved
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `sysconfig.get_path('include')` returned nothing
    #[error("could not determine the Python include directory")]
    MissingIncludePath,

    /// A required `sysconfig` variable is unset
    #[error("Python configuration variable {0} is not set")]
    MissingVariable(&'static str),

    /// The interpreter printed something that is not the expected JSON
    #[error("malformed Python configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors that can occur while building and fuzzing a module
#[derive(Debug, Error)]
pub enum PyfuzzerError {
    /// External tool failure
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Configuration resolution failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Filesystem failure on a specific path
    #[error("{}: {source}", path.display())]
    Io {
        /// Path that was being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Module name is not usable as a file and symbol name
    #[error("invalid module name '{name}': {reason}")]
    InvalidModuleName {
        /// Rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Nothing to compile
    #[error("at least one C source file is required")]
    NoSources,

    /// A C source would be overwritten by a generated file
    #[error("C source '{source_file}' clashes with the generated {generated}")]
    ReservedSource {
        /// Source as given
        source_file: String,
        /// Generated file it clashes with
        generated: &'static str,
    },
}

impl PyfuzzerError {
    /// Create a filesystem error for `path`
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = PyfuzzerError::io(
            "missing.py",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("missing.py: "));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_tool_error_is_transparent() {
        let err: PyfuzzerError = ToolError::ExitStatus {
            command: "./foo -max_len=4096".to_string(),
            code: 77,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "command './foo -max_len=4096' returned non-zero exit status 77"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: PyfuzzerError = ConfigError::MissingVariable("LDVERSION").into();
        assert_eq!(
            err.to_string(),
            "Python configuration variable LDVERSION is not set"
        );
    }

    #[test]
    fn test_reserved_source_message() {
        let err = PyfuzzerError::ReservedSource {
            source_file: "./pyfuzzer.c".to_string(),
            generated: "pyfuzzer.c",
        };
        assert_eq!(
            err.to_string(),
            "C source './pyfuzzer.c' clashes with the generated pyfuzzer.c"
        );
    }

    #[test]
    fn test_invalid_module_name() {
        let err = PyfuzzerError::InvalidModuleName {
            name: "a-b".to_string(),
            reason: "must be a C identifier",
        };
        assert!(err.to_string().contains("'a-b'"));
    }
}
