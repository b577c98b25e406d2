//! In-memory marker store.

use std::collections::BTreeSet;

use parking_lot::Mutex;

use crate::error::DbError;

use super::MarkerStore;

/// Marker store that never touches the filesystem.
#[derive(Debug, Default)]
pub struct MemoryMarkerStore {
    names: Mutex<BTreeSet<String>>,
}

impl MemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds markers for `names`.
    pub fn with_markers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Mutex::new(names.into_iter().map(Into::into).collect()),
        }
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn marker_exists(&self, name: &str) -> Result<bool, DbError> {
        Ok(self.names.lock().contains(name))
    }

    fn create_marker(&self, name: &str) -> Result<(), DbError> {
        self.names.lock().insert(name.to_string());
        Ok(())
    }

    fn remove_marker(&self, name: &str) -> Result<(), DbError> {
        self.names.lock().remove(name);
        Ok(())
    }

    fn list_markers(&self) -> Result<Vec<String>, DbError> {
        Ok(self.names.lock().iter().cloned().collect())
    }
}
