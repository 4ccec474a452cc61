//! Working directory the pipeline reads and writes

use crate::error::{PyfuzzerError, PyfuzzerResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory holding generated sources, the binary and profiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Use `root` as the working directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The process's current directory
    pub fn current() -> PyfuzzerResult<Self> {
        std::env::current_dir()
            .map(Self::new)
            .map_err(|e| PyfuzzerError::io(".", e))
    }

    /// Root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name` inside the workspace
    #[must_use]
    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write `contents` to `name`, replacing it
    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PyfuzzerResult<PathBuf> {
        let path = self.path(name);
        std::fs::write(&path, contents).map_err(|e| PyfuzzerError::io(&path, e))?;
        Ok(path)
    }

    /// Copy `source` byte for byte to `name`, replacing it
    ///
    /// A `source` that already is `name` is left untouched; copying a file
    /// onto itself would truncate it.
    pub fn copy_in(&self, source: &Path, name: &str) -> PyfuzzerResult<PathBuf> {
        let path = self.path(name);
        let resolved = source
            .canonicalize()
            .map_err(|e| PyfuzzerError::io(source, e))?;
        if path.canonicalize().is_ok_and(|dest| dest == resolved) {
            tracing::debug!(path = %path.display(), "source is already in place, not copying");
            return Ok(path);
        }
        std::fs::copy(source, &path).map_err(|e| PyfuzzerError::io(source, e))?;
        Ok(path)
    }

    /// Delete `name`; returns whether it existed
    pub fn remove_if_exists(&self, name: &str) -> PyfuzzerResult<bool> {
        let path = self.path(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PyfuzzerError::io(&path, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_overwrite() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path());
        ws.write("a.txt", "one").unwrap();
        let path = ws.write("a.txt", "two").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "two");
    }

    #[test]
    fn test_write_into_missing_directory_fails_with_path() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path().join("nope"));
        let err = ws.write("module.c", "x").unwrap_err();
        assert!(err.to_string().contains("module.c"));
    }

    #[test]
    fn test_copy_in_missing_source() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path());
        let err = ws
            .copy_in(&temp.path().join("missing.py"), "mutator.py")
            .unwrap_err();
        assert!(err.to_string().contains("missing.py"));
        assert!(!ws.path("mutator.py").exists());
    }

    #[test]
    fn test_copy_in_onto_itself_keeps_contents() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path());
        ws.write("mutator.py", "def test_one_input(m, d):\n    pass\n")
            .unwrap();

        let path = ws.copy_in(&ws.path("mutator.py"), "mutator.py").unwrap();

        assert_eq!(path, ws.path("mutator.py"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "def test_one_input(m, d):\n    pass\n"
        );
    }

    #[test]
    fn test_remove_if_exists() {
        let temp = TempDir::new().unwrap();
        let ws = Workspace::new(temp.path());
        assert!(!ws.remove_if_exists("foo.profraw").unwrap());
        ws.write("foo.profraw", [0u8; 4]).unwrap();
        assert!(ws.remove_if_exists("foo.profraw").unwrap());
        assert!(!ws.path("foo.profraw").exists());
    }
}
