//! Directory-backed marker store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::DbError;

use super::io_utils::classify_io_error;
use super::MarkerStore;

/// Keeps one sub-directory per table under a root directory.
#[derive(Debug, Clone)]
pub struct DirMarkerStore {
    /// Root directory holding the table directories
    root: PathBuf,
}

impl DirMarkerStore {
    /// Opens the store at `root`, creating the directory if it is missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, DbError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            classify_io_error(
                e,
                &format!("Failed to create data directory {}", root.display()),
            )
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn marker_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl MarkerStore for DirMarkerStore {
    fn marker_exists(&self, name: &str) -> Result<bool, DbError> {
        match fs::metadata(self.marker_path(name)) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(classify_io_error(
                e,
                &format!("Failed to stat marker for table '{}'", name),
            )),
        }
    }

    fn create_marker(&self, name: &str) -> Result<(), DbError> {
        let path = self.marker_path(name);
        match fs::create_dir(&path) {
            Ok(()) => {
                tracing::debug!("Created table marker {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(e) => Err(classify_io_error(
                e,
                &format!("Failed to create marker for table '{}'", name),
            )),
        }
    }

    fn remove_marker(&self, name: &str) -> Result<(), DbError> {
        let path = self.marker_path(name);
        match fs::remove_dir(&path) {
            Ok(()) => {
                tracing::debug!("Removed table marker {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(classify_io_error(
                e,
                &format!("Failed to remove marker for table '{}'", name),
            )),
        }
    }

    fn list_markers(&self) -> Result<Vec<String>, DbError> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            classify_io_error(
                e,
                &format!("Failed to read data directory {}", self.root.display()),
            )
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| classify_io_error(e, "Failed to read directory entry"))?;
            let file_type = entry
                .file_type()
                .map_err(|e| classify_io_error(e, "Failed to read directory entry type"))?;
            if !file_type.is_dir() {
                tracing::debug!("Skipping non-directory entry {}", entry.path().display());
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!("Skipping table directory with non-UTF-8 name {:?}", raw);
                }
            }
        }
        Ok(names)
    }
}
