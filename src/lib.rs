//! cellgrid - Elm-style editor for large binary cell grids
//!
//! This crate provides the grid store, the pan/zoom viewport and the update
//! logic; the binary adds the window, pixel surface and dialogs.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod messages;
pub mod model;
pub mod render;
pub mod tracing;
pub mod update;
pub mod viewport;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use grid::{CellGrid, CellPos, GridDataStore, GridSize};
pub use messages::Msg;
pub use model::AppModel;
pub use viewport::{Viewport, ViewportSettings};
