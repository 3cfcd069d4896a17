//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::Path;

use cellgrid::config::GridConfig;
use cellgrid::grid::{CellGrid, GridDataStore};
use cellgrid::model::AppModel;
use cellgrid::viewport::{Viewport, ViewportSettings};

/// 200x200 surface with the desktop defaults (15px cells, 1px lines, 20px margin)
///
/// Pitch is 16px, 11 whole cells fit on each axis and the largest offset is 3020.
pub fn small_settings() -> ViewportSettings {
    ViewportSettings {
        surface_width: 200,
        surface_height: 200,
        ..ViewportSettings::default()
    }
}

/// Same as [`small_settings`] but with cells too small for axis labels
pub fn unlabeled_settings() -> ViewportSettings {
    ViewportSettings {
        cell_size: 10,
        ..small_settings()
    }
}

pub fn default_viewport() -> Viewport {
    Viewport::new(ViewportSettings::default())
}

/// Model over a 200x200 grid whose file lives at `grid_file`
pub fn test_model_at(grid_file: &Path) -> AppModel {
    test_model_with(small_settings(), grid_file)
}

pub fn test_model_with(settings: ViewportSettings, grid_file: &Path) -> AppModel {
    let viewport = Viewport::new(settings);
    let grid = CellGrid::new(viewport.managed_size());
    AppModel::from_parts(
        GridConfig::default(),
        viewport,
        grid,
        GridDataStore::new(grid_file),
    )
}

/// Temp dir that lives as long as the returned guard
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}
