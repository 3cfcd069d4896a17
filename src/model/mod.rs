//! Application state for the Elm-style architecture
//!
//! The model owns the grid, the viewport over it and the file store. Every
//! mutation that changes what is on screen raises the `changed` flag; the
//! runtime redraws and presents only while it is set.

use std::path::PathBuf;

use crate::config::GridConfig;
use crate::grid::{CellGrid, GridDataError, GridDataStore, LoadOutcome};
use crate::render::GridPalette;
use crate::viewport::Viewport;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    /// Persisted editor configuration
    pub config: GridConfig,
    pub viewport: Viewport,
    /// Cell values, always `viewport.managed_size()` large
    pub grid: CellGrid,
    pub store: GridDataStore,
    changed: bool,
}

impl AppModel {
    /// Create a model with a blank grid sized from the configured surface
    pub fn new(config: GridConfig, grid_path: PathBuf) -> Self {
        let viewport = Viewport::new(config.viewport_settings());
        let grid = CellGrid::new(viewport.managed_size());
        Self::from_parts(config, viewport, grid, GridDataStore::new(grid_path))
    }

    /// Assemble a model from prepared parts
    ///
    /// # Panics
    ///
    /// If the grid size differs from the viewport's managed size.
    pub fn from_parts(
        config: GridConfig,
        viewport: Viewport,
        grid: CellGrid,
        store: GridDataStore,
    ) -> Self {
        assert_eq!(
            grid.size(),
            viewport.managed_size(),
            "grid and viewport disagree on the managed size"
        );
        Self {
            config,
            viewport,
            grid,
            store,
            changed: true,
        }
    }

    /// Replace the grid with the file contents
    ///
    /// Returns the file name when the file does not exist; the grid is then
    /// blank. Parse errors leave the current grid untouched.
    pub fn load_grid(&mut self) -> Result<Option<String>, GridDataError> {
        let missing = match self.store.load(self.grid.size())? {
            LoadOutcome::Loaded(grid) => {
                self.grid = grid;
                None
            }
            LoadOutcome::Missing { file_name } => {
                self.grid.clear();
                Some(file_name)
            }
        };
        self.mark_changed();
        Ok(missing)
    }

    pub fn save_grid(&self) -> Result<(), GridDataError> {
        self.store.save(&self.grid)
    }

    /// Kill every cell
    pub fn reset_grid(&mut self) {
        self.grid.clear();
        self.mark_changed();
    }

    pub fn palette(&self) -> GridPalette {
        GridPalette::with_active_cell(self.config.active_cell_argb())
    }

    /// Pixels panned per frame by a held arrow key
    pub fn move_increment(&self) -> i32 {
        self.config.move_increment
    }

    // =========================================================================
    // Redraw flag
    // =========================================================================

    pub fn needs_redraw(&self) -> bool {
        self.changed
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Called by the runtime once the frame is presented
    pub fn mark_drawn(&mut self) {
        self.changed = false;
    }
}
