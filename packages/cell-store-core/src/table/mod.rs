//! Ordered cell storage for a single table.
//!
//! Each table keeps its cells in a concurrent skip list ordered by
//! [`CellKey`](crate::cell::CellKey), so a row is a contiguous run that can
//! be found by seeking to the row-only key.

#[allow(clippy::module_inception)]
mod table;

pub use table::Table;
