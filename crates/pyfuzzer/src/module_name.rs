//! Validated extension module name

use crate::error::PyfuzzerError;
use std::fmt;
use std::str::FromStr;

/// Name of the C extension module under test
///
/// It names the output binary and suffixes the `PyInit_` entry point, so it
/// must be a C identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    /// Validate `name`
    pub fn new(name: impl Into<String>) -> Result<Self, PyfuzzerError> {
        let name = name.into();
        let reason = match name.chars().next() {
            None => Some("must not be empty"),
            Some(first) if !(first.is_ascii_alphabetic() || first == '_') => {
                Some("must start with a letter or underscore")
            }
            Some(_) if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') => {
                Some("must contain only letters, digits and underscores")
            }
            Some(_) => None,
        };
        match reason {
            Some(reason) => Err(PyfuzzerError::InvalidModuleName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// The name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw profile written by the fuzz binary
    #[must_use]
    pub fn profraw(&self) -> String {
        format!("{}.profraw", self.0)
    }

    /// Merged profile data
    #[must_use]
    pub fn profdata(&self) -> String {
        format!("{}.profdata", self.0)
    }
}

impl FromStr for ModuleName {
    type Err = PyfuzzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
