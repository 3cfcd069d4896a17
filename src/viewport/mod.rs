//! Viewport over the managed cell grid
//!
//! The viewport owns the pixel scroll offsets and the current zoom level
//! (cell size). Every mutation re-clamps the offsets into
//! `[0, compute_max_allowed_offset(axis)]` and recomputes the draw-start
//! indices before returning, so callers never observe a stale view.
//!
//! Mutating methods return `true` when the visible state changed; the
//! application model turns that into its redraw flag.

pub mod geometry;
mod visible;

use crate::grid::{CellPos, GridSize};

pub use geometry::{Axis, PixelRect, GRID_LINE_PROFILES, SMALLEST_CELL_REQUIRED_PX_NUMBER};

use geometry::{
    cell_index_at, cell_origin, displayable_cells, max_allowed_offset, start_index, zoom_step,
};

/// Immutable viewport configuration
///
/// Built once by the configuration layer and handed to [`Viewport::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSettings {
    pub surface_width: i32,
    pub surface_height: i32,
    /// Cell size at startup
    pub cell_size: i32,
    pub line_width: i32,
    /// Correction paired with `line_width` (see [`GRID_LINE_PROFILES`])
    pub cell_size_offset: i32,
    /// Width of the axis label gutter when labels are shown
    pub margin_size: i32,
    /// At or below this cell size the labels and their margin are hidden
    pub axis_label_hide_cell_size: i32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            surface_width: 791,
            surface_height: 791,
            cell_size: 15,
            line_width: 1,
            cell_size_offset: 0,
            margin_size: 20,
            axis_label_hide_cell_size: 11,
        }
    }
}

impl ViewportSettings {
    /// Managed grid size: one cell per surface pixel on each axis
    pub fn managed_size(&self) -> GridSize {
        GridSize::new(
            self.surface_width.max(1) as usize,
            self.surface_height.max(1) as usize,
        )
    }
}

/// Pan and zoom state over a grid of `managed` cells
#[derive(Debug, Clone)]
pub struct Viewport {
    settings: ViewportSettings,
    managed: GridSize,
    cell_size: i32,
    margin: i32,
    show_axis_labels: bool,
    offset_x: i32,
    offset_y: i32,
    start_col: i32,
    start_row: i32,
    displayable_cols: i32,
    displayable_rows: i32,
}

impl Viewport {
    /// Create a viewport over a grid sized from the surface
    pub fn new(settings: ViewportSettings) -> Self {
        Self::with_managed_size(settings, settings.managed_size())
    }

    /// Create a viewport over a grid of explicit size
    pub fn with_managed_size(settings: ViewportSettings, managed: GridSize) -> Self {
        let cell_size = settings.cell_size.max(SMALLEST_CELL_REQUIRED_PX_NUMBER);
        let mut viewport = Self {
            settings,
            managed,
            cell_size,
            margin: 0,
            show_axis_labels: false,
            offset_x: 0,
            offset_y: 0,
            start_col: 0,
            start_row: 0,
            displayable_cols: 0,
            displayable_rows: 0,
        };
        viewport.sync_axis_labels();
        viewport.set_grid_dimension();
        viewport.sync_draw_start();
        viewport
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn settings(&self) -> &ViewportSettings {
        &self.settings
    }

    pub fn managed_size(&self) -> GridSize {
        self.managed
    }

    pub fn surface_width(&self) -> i32 {
        self.settings.surface_width
    }

    pub fn surface_height(&self) -> i32 {
        self.settings.surface_height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn line_width(&self) -> i32 {
        self.settings.line_width
    }

    pub fn cell_size_offset(&self) -> i32 {
        self.settings.cell_size_offset
    }

    /// Current label margin (0 while labels are hidden)
    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn show_axis_labels(&self) -> bool {
        self.show_axis_labels
    }

    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    pub fn offset(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.offset_x,
            Axis::Vertical => self.offset_y,
        }
    }

    /// First (partially) visible column
    pub fn start_col(&self) -> usize {
        self.start_col as usize
    }

    /// First (partially) visible row
    pub fn start_row(&self) -> usize {
        self.start_row as usize
    }

    pub fn displayable_cols(&self) -> usize {
        self.displayable_cols as usize
    }

    pub fn displayable_rows(&self) -> usize {
        self.displayable_rows as usize
    }

    fn extent(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.settings.surface_width,
            Axis::Vertical => self.settings.surface_height,
        }
    }

    fn managed_cells(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.managed.cols,
            Axis::Vertical => self.managed.rows,
        }
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    /// Recompute how many whole cells fit on each axis
    pub fn set_grid_dimension(&mut self) {
        let line = self.settings.line_width;
        self.displayable_cols =
            displayable_cells(self.settings.surface_width, self.margin, line, self.cell_size);
        self.displayable_rows =
            displayable_cells(self.settings.surface_height, self.margin, line, self.cell_size);
    }

    /// Largest offset on `axis` that keeps the view inside the managed grid
    pub fn compute_max_allowed_offset(&self, axis: Axis) -> i32 {
        max_allowed_offset(
            self.managed_cells(axis),
            self.extent(axis),
            self.margin,
            self.settings.line_width,
            self.cell_size,
        )
    }

    fn sync_draw_start(&mut self) {
        let line = self.settings.line_width;
        self.start_col = start_index(self.offset_x, self.cell_size, line);
        self.start_row = start_index(self.offset_y, self.cell_size, line);
    }

    fn sync_axis_labels(&mut self) {
        self.show_axis_labels = self.cell_size > self.settings.axis_label_hide_cell_size;
        self.margin = if self.show_axis_labels {
            self.settings.margin_size
        } else {
            0
        };
    }

    fn set_offset(&mut self, axis: Axis, value: i32) -> bool {
        let slot = match axis {
            Axis::Horizontal => &mut self.offset_x,
            Axis::Vertical => &mut self.offset_y,
        };
        let changed = *slot != value;
        *slot = value;
        self.sync_draw_start();
        changed
    }

    // =========================================================================
    // Panning
    // =========================================================================

    /// Move toward the origin, clamped to the valid range
    fn retreat(&mut self, axis: Axis, px: i32) -> bool {
        if px < 0 {
            return self.advance(axis, px.saturating_neg());
        }
        let max = self.compute_max_allowed_offset(axis);
        let target = self.offset(axis).saturating_sub(px).clamp(0, max);
        self.set_offset(axis, target)
    }

    /// Move away from the origin; rejected when it would reach the max
    fn advance(&mut self, axis: Axis, px: i32) -> bool {
        if px < 0 {
            return self.retreat(axis, px.saturating_neg());
        }
        let target = self.offset(axis).saturating_add(px);
        if target >= self.compute_max_allowed_offset(axis) {
            tracing::trace!(?axis, target, "pan past the grid end rejected");
            return false;
        }
        self.set_offset(axis, target)
    }

    pub fn move_left(&mut self, px: i32) -> bool {
        self.retreat(Axis::Horizontal, px)
    }

    pub fn move_up(&mut self, px: i32) -> bool {
        self.retreat(Axis::Vertical, px)
    }

    pub fn move_right(&mut self, px: i32) -> bool {
        self.advance(Axis::Horizontal, px)
    }

    pub fn move_down(&mut self, px: i32) -> bool {
        self.advance(Axis::Vertical, px)
    }

    /// Shift both offsets, clamping each into the valid range
    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        let max_x = self.compute_max_allowed_offset(Axis::Horizontal);
        let max_y = self.compute_max_allowed_offset(Axis::Vertical);
        let x = self.offset_x.saturating_add(dx).clamp(0, max_x);
        let y = self.offset_y.saturating_add(dy).clamp(0, max_y);
        let moved_x = self.set_offset(Axis::Horizontal, x);
        let moved_y = self.set_offset(Axis::Vertical, y);
        moved_x || moved_y
    }

    pub fn move_to_top(&mut self) -> bool {
        self.set_offset(Axis::Vertical, 0)
    }

    pub fn move_to_left_home(&mut self) -> bool {
        self.set_offset(Axis::Horizontal, 0)
    }

    /// Jump to the last rows, one pixel short of the rejection boundary
    pub fn move_to_bottom(&mut self) -> bool {
        let max = self.compute_max_allowed_offset(Axis::Vertical);
        self.set_offset(Axis::Vertical, (max - 1).max(0))
    }

    /// Jump to the last columns, one pixel short of the rejection boundary
    pub fn move_to_right_end(&mut self) -> bool {
        let max = self.compute_max_allowed_offset(Axis::Horizontal);
        self.set_offset(Axis::Horizontal, (max - 1).max(0))
    }

    // =========================================================================
    // Zooming
    // =========================================================================

    /// Grow cells by one step; rejected once a cell would fill the surface
    pub fn zoom_in(&mut self) -> bool {
        let size = self.cell_size + zoom_step(self.cell_size);
        if size >= self.settings.surface_height {
            tracing::debug!(size, "zoom in rejected");
            return false;
        }
        self.apply_zoom(size);
        true
    }

    /// Shrink cells by one step; rejected below the smallest cell size
    pub fn zoom_out(&mut self) -> bool {
        let size = self.cell_size - zoom_step(self.cell_size);
        if size < SMALLEST_CELL_REQUIRED_PX_NUMBER {
            tracing::debug!(size, "zoom out rejected");
            return false;
        }
        self.apply_zoom(size);
        true
    }

    fn apply_zoom(&mut self, size: i32) {
        let (anchor_col, anchor_row) = self.center_cell();
        let before_x = self.cell_screen_origin(Axis::Horizontal, anchor_col);
        let before_y = self.cell_screen_origin(Axis::Vertical, anchor_row);

        self.cell_size = size;
        self.sync_axis_labels();

        for axis in [Axis::Horizontal, Axis::Vertical] {
            let max = self.compute_max_allowed_offset(axis);
            if self.offset(axis) > max {
                self.set_offset(axis, max);
            }
        }
        self.set_grid_dimension();
        self.sync_draw_start();

        // Pan so the anchor cell returns to its pre-zoom screen position
        let after_x = self.cell_screen_origin(Axis::Horizontal, anchor_col);
        let after_y = self.cell_screen_origin(Axis::Vertical, anchor_row);
        self.move_by(after_x - before_x, after_y - before_y);

        tracing::debug!(
            cell_size = self.cell_size,
            margin = self.margin,
            offset_x = self.offset_x,
            offset_y = self.offset_y,
            "zoomed"
        );
    }

    fn center_cell(&self) -> (i32, i32) {
        self.screen_to_cell(
            self.settings.surface_width / 2,
            self.settings.surface_height / 2,
        )
    }

    fn cell_screen_origin(&self, axis: Axis, index: i32) -> i32 {
        cell_origin(
            index,
            self.offset(axis),
            self.margin,
            self.cell_size,
            self.settings.line_width,
        )
    }

    // =========================================================================
    // Coordinate mapping
    // =========================================================================

    /// Cell indices under a surface pixel, without any bounds check
    pub fn screen_to_cell(&self, x: i32, y: i32) -> (i32, i32) {
        let line = self.settings.line_width;
        (
            cell_index_at(x, self.offset_x, self.margin, self.cell_size, line),
            cell_index_at(y, self.offset_y, self.margin, self.cell_size, line),
        )
    }

    /// Managed cell under a surface pixel
    ///
    /// `None` for pixels in the label margin, outside the surface, or on a
    /// grid line before the first cell.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<CellPos> {
        if x < self.margin
            || y < self.margin
            || x >= self.settings.surface_width
            || y >= self.settings.surface_height
        {
            return None;
        }
        let (col, row) = self.screen_to_cell(x, y);
        if col < 0 || row < 0 {
            return None;
        }
        let pos = CellPos::new(col as usize, row as usize);
        (pos.col < self.managed.cols && pos.row < self.managed.rows).then_some(pos)
    }
}
