//! Cell model and the total order over cell keys.

#[allow(clippy::module_inception)]
mod cell;
pub mod order;

pub use cell::{Cell, CellKey};
