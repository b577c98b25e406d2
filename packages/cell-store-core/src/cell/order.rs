//! Total order over cell keys.
//!
//! Row bytes are compared lexicographically first (a proper prefix is
//! less), then column bytes the same way. A missing column, as carried by a
//! row-only search key, is less than every column including the empty one.
//! Because the row is the primary component, all cells of one row are
//! contiguous in this order.

use std::cmp::Ordering;

use super::{Cell, CellKey};

/// Compares two keys row-major, then by column.
pub fn compare(a: &CellKey, b: &CellKey) -> Ordering {
    compare_row(a, b).then_with(|| a.column().cmp(&b.column()))
}

/// Compares only the row component of two keys.
pub fn compare_row(a: &CellKey, b: &CellKey) -> Ordering {
    a.row().cmp(b.row())
}

/// Compares two cells by key; payloads are ignored.
pub fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    compare(a.key(), b.key())
}

/// Compares the rows of two cells.
pub fn compare_cell_rows(a: &Cell, b: &Cell) -> Ordering {
    compare_row(a.key(), b.key())
}
