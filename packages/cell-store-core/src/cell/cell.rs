use std::cmp::Ordering;

use bytes::Bytes;

use super::order;

/// Key of a cell: a row and, for everything but row-only search keys, a column.
///
/// Keys order row-major, then by column. A row-only key has no column and
/// sorts before every column of its row, so it can be used to seek to the
/// start of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    row: Bytes,
    column: Option<Bytes>,
}

impl CellKey {
    /// Search key addressing the start of `row`.
    pub fn row_only(row: impl Into<Bytes>) -> Self {
        Self {
            row: row.into(),
            column: None,
        }
    }

    /// Search key equal to the key of a stored cell at `(row, column)`.
    pub fn row_column(row: impl Into<Bytes>, column: impl Into<Bytes>) -> Self {
        Self {
            row: row.into(),
            column: Some(column.into()),
        }
    }

    pub fn row(&self) -> &[u8] {
        &self.row
    }

    /// Column bytes, `None` for a row-only key.
    pub fn column(&self) -> Option<&[u8]> {
        self.column.as_deref()
    }
}

impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        order::compare(self, other)
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Unit of data stored in a table.
///
/// Cells are immutable. Two cells with the same row and column occupy the
/// same slot in a table regardless of payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    key: CellKey,
    payload: Bytes,
}

impl Cell {
    /// Creates a cell. Any of the byte sequences may be empty.
    pub fn new(
        row: impl Into<Bytes>,
        column: impl Into<Bytes>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            key: CellKey::row_column(row, column),
            payload: payload.into(),
        }
    }

    pub fn key(&self) -> &CellKey {
        &self.key
    }

    pub fn row(&self) -> &[u8] {
        self.key.row()
    }

    pub fn column(&self) -> &[u8] {
        self.key.column().unwrap_or_default()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Splits the cell into its key and payload.
    pub fn into_parts(self) -> (CellKey, Bytes) {
        (self.key, self.payload)
    }
}
