//! Template fixtures

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Path of a checked-in template under `test-fixtures/templates/`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/templates")
        .join(name)
        .join("main.tf")
}

/// A template written to a temporary directory
pub struct TempTemplate {
    _dir: TempDir,
    path: PathBuf,
}

impl TempTemplate {
    /// Write `content` to `main.tf` in a fresh temporary directory.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("TempTemplate: tempdir failed: {e}"));
        let path = dir.path().join("main.tf");
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TempTemplate: failed to write {}: {e}", path.display()));
        Self { _dir: dir, path }
    }

    /// Path of the written `main.tf`
    pub fn path(&self) -> &Path {
        &self.path
    }
}
