//! Core storage engine for the in-memory wide-column cell store.
//!
//! Provides the cell model and ordering, concurrent ordered tables,
//! durable table-existence markers, and the table registry.

pub mod cell;
pub mod config;
pub mod error;
pub mod persistence;
pub mod registry;
pub mod table;

pub use cell::{Cell, CellKey};
pub use config::DbConfig;
pub use error::DbError;
pub use registry::{CloseReport, TableRegistry};
pub use table::Table;
