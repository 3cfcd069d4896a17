//! Binary cell grid and its tab-delimited file store

pub mod model;
pub mod store;

pub use model::{CellGrid, CellPos, GridSize};
pub use store::{read_grid, write_grid, GridDataError, GridDataStore, LoadOutcome};
