//! Durable table-existence markers.
//!
//! Only the existence of a table survives a restart, never its cells. The
//! registry talks to a [`MarkerStore`]; [`DirMarkerStore`] keeps one
//! directory per table under a root, [`MemoryMarkerStore`] keeps the names
//! in memory.

mod dir;
pub mod io_utils;
mod memory;

use std::fmt::Debug;

use crate::error::DbError;

pub use dir::DirMarkerStore;
pub use memory::MemoryMarkerStore;

/// Storage for table-existence markers.
///
/// Table names are used verbatim; callers must supply names that are valid
/// for the backing store.
pub trait MarkerStore: Send + Sync + Debug {
    /// Returns true if a marker for `name` exists.
    fn marker_exists(&self, name: &str) -> Result<bool, DbError>;

    /// Creates the marker for `name`. Creating an existing marker succeeds.
    fn create_marker(&self, name: &str) -> Result<(), DbError>;

    /// Removes the marker for `name`. Removing a missing marker succeeds.
    fn remove_marker(&self, name: &str) -> Result<(), DbError>;

    /// Lists the names of all markers, in no particular order.
    fn list_markers(&self) -> Result<Vec<String>, DbError>;
}
