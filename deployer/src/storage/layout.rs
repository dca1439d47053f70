//! Storage layout configuration

use std::path::PathBuf;

use crate::filesys::dir::Dir;
use crate::filesys::file::File;

/// Where avdeploy reads its settings and group records
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Base directory, the working directory by default
    pub base_dir: PathBuf,
}

impl StorageLayout {
    /// Create a new storage layout
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Get the default settings file
    pub fn settings_file(&self) -> File {
        File::new(self.base_dir.join("avdeploy.json"))
    }

    /// Get the group records directory
    pub fn groups_dir(&self) -> Dir {
        Dir::new(self.base_dir.clone())
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(base_dir)
    }
}
