//! Temporary manifest files for config loading tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A manifest written into its own temporary directory
pub struct TestManifest {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestManifest {
    /// Write `content` to `shares.toml` in a fresh temporary directory
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().expect("TestManifest: failed to create temp dir");
        let path = temp_dir.path().join("shares.toml");
        fs::write(&path, content).expect("TestManifest: failed to write manifest");
        Self { temp_dir, path }
    }

    /// Path of the manifest file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest, for sibling files
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write another file next to the manifest and return its path
    pub fn write_sibling(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        fs::write(&path, content).expect("TestManifest: failed to write sibling");
        path
    }
}
