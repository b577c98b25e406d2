//! Table backed by a lock-free ordered map of cells.
//!
//! Every key maps to a slot holding the current cell. Replacing a cell swaps
//! the slot contents under the slot's lock, so the key never disappears from
//! the map while it is being overwritten. Deleting first empties the slot
//! (the point at which the key is gone) and then unlinks the node; a writer
//! that meets an emptied slot unlinks it and retries on a fresh node.
//!
//! Single-key operations (`insert`, `insert_if_absent`, `get`, `delete`) are
//! therefore atomic per key and need no external locking. Row-wide operations
//! (`get_row`, `delete_row`) walk the map without a table lock: a concurrent
//! writer touching the same row may or may not be observed, and a row may be
//! seen partially deleted while `delete_row` runs.

use std::sync::Arc;

use bytes::Bytes;
use crossbeam_skiplist::map::Entry;
use crossbeam_skiplist::SkipMap;
use parking_lot::RwLock;

use crate::cell::{order, Cell, CellKey};
use crate::error::DbError;

/// Current cell stored under one key; `None` once the key has been deleted.
#[derive(Debug)]
struct CellSlot {
    cell: RwLock<Option<Cell>>,
}

impl CellSlot {
    fn new(cell: Cell) -> Arc<Self> {
        Arc::new(Self {
            cell: RwLock::new(Some(cell)),
        })
    }

    fn read(&self) -> Option<Cell> {
        self.cell.read().clone()
    }
}

/// Ordered cell store for one table.
#[derive(Debug)]
pub struct Table {
    /// Table name
    name: String,
    /// Cell slots keyed by (row, column)
    data: SkipMap<CellKey, Arc<CellSlot>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: SkipMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts `cell`, replacing any cell stored at the same row and column.
    ///
    /// # Returns
    /// `true` if a cell already existed at that key.
    pub fn insert(&self, cell: Cell) -> bool {
        let fresh = CellSlot::new(cell.clone());
        loop {
            let entry = self
                .data
                .get_or_insert_with(cell.key().clone(), || Arc::clone(&fresh));
            if Arc::ptr_eq(entry.value(), &fresh) {
                return false;
            }

            let mut current = entry.value().cell.write();
            if current.is_none() {
                drop(current);
                entry.remove();
                continue;
            }
            *current = Some(cell);
            return true;
        }
    }

    /// Inserts `cell` only if nothing is stored at its key.
    ///
    /// # Returns
    /// `true` if the cell was inserted, `false` if an existing cell was kept.
    pub fn insert_if_absent(&self, cell: Cell) -> bool {
        let fresh = CellSlot::new(cell.clone());
        loop {
            let entry = self
                .data
                .get_or_insert_with(cell.key().clone(), || Arc::clone(&fresh));
            if Arc::ptr_eq(entry.value(), &fresh) {
                return true;
            }

            if entry.value().cell.read().is_some() {
                return false;
            }
            entry.remove();
        }
    }

    /// Returns the cell stored at exactly `(row, column)`.
    pub fn get(&self, row: &[u8], column: &[u8]) -> Option<Cell> {
        let key = CellKey::row_column(
            Bytes::copy_from_slice(row),
            Bytes::copy_from_slice(column),
        );
        self.data.get(&key).and_then(|entry| entry.value().read())
    }

    /// Returns every cell of `row`, ordered by column.
    ///
    /// The result is a snapshot taken by walking the row; it is not isolated
    /// from writers running concurrently on the same row.
    pub fn get_row(&self, row: &[u8]) -> Vec<Cell> {
        let start = CellKey::row_only(Bytes::copy_from_slice(row));
        self.data
            .range(start.clone()..)
            .take_while(|entry| order::compare_row(entry.key(), &start).is_eq())
            .filter_map(|entry| entry.value().read())
            .collect()
    }

    /// Removes every cell of `row`.
    ///
    /// Cells are removed one at a time; this is not atomic with respect to
    /// other writers. A cell inserted into `row` while the walk is running
    /// may survive.
    ///
    /// # Returns
    /// Number of cells removed by this call.
    pub fn delete_row(&self, row: &[u8]) -> usize {
        let start = CellKey::row_only(Bytes::copy_from_slice(row));
        let mut removed = 0;
        for entry in self.data.range(start.clone()..) {
            if order::compare_row(entry.key(), &start).is_ne() {
                break;
            }
            if Self::remove_entry(&entry) {
                removed += 1;
            }
        }
        tracing::trace!("Table {} removed {} cells from row", self.name, removed);
        removed
    }

    /// Removes the cell at exactly `(row, column)`.
    ///
    /// # Returns
    /// `true` if a cell was removed.
    pub fn delete(&self, row: &[u8], column: &[u8]) -> bool {
        let key = CellKey::row_column(
            Bytes::copy_from_slice(row),
            Bytes::copy_from_slice(column),
        );
        match self.data.get(&key) {
            Some(entry) => Self::remove_entry(&entry),
            None => false,
        }
    }

    /// Empties the slot behind `entry` and unlinks it.
    ///
    /// Only the caller that empties a live slot reports the removal.
    fn remove_entry(entry: &Entry<'_, CellKey, Arc<CellSlot>>) -> bool {
        let taken = entry.value().cell.write().take();
        entry.remove();
        taken.is_some()
    }

    /// Number of stored cells.
    ///
    /// Under concurrent deletes this may briefly count a cell whose node has
    /// not been unlinked yet.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Releases the table.
    ///
    /// Cell contents live only in memory, so there is nothing to flush; a
    /// payload persistence layer would write the table out here.
    pub fn close(&self) -> Result<(), DbError> {
        tracing::debug!("Closing table {} ({} cells)", self.name, self.data.len());
        Ok(())
    }
}
