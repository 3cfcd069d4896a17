//! Pixel/cell geometry shared by the viewport and the renderer
//!
//! All arithmetic is in signed pixels. Offsets are never negative once
//! clamped, but intermediate screen coordinates can be (cells scrolled off the
//! top or left edge), so divisions floor rather than truncate.

/// Smallest cell size, in pixels, that still leaves room for a visible cell
/// between two grid lines
pub const SMALLEST_CELL_REQUIRED_PX_NUMBER: i32 = 2;

/// Tuned `(line_width, cell_size_offset)` pairs
///
/// The offset shifts filled cells up and left so they sit flush against the
/// grid lines for thick lines.
pub const GRID_LINE_PROFILES: [(i32, i32); 8] = [
    (1, 0),
    (2, 0),
    (3, 1),
    (4, 1),
    (5, 2),
    (6, 2),
    (7, 3),
    (8, 3),
];

/// Look up the tuned cell size offset for a line width
pub fn tuned_cell_size_offset(line_width: i32) -> Option<i32> {
    GRID_LINE_PROFILES
        .iter()
        .find(|(width, _)| *width == line_width)
        .map(|(_, offset)| *offset)
}

/// Screen axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Pixels taken by one cell plus its trailing grid line
#[inline]
pub fn cell_pitch(cell_size: i32, line_width: i32) -> i32 {
    cell_size + line_width
}

/// Number of whole cells fitting in the drawable part of an axis
pub fn displayable_cells(extent: i32, margin: i32, line_width: i32, cell_size: i32) -> i32 {
    (extent - margin - line_width).max(0) / cell_pitch(cell_size, line_width)
}

/// Largest offset that keeps the last managed cell inside the view
///
/// The displayable count is fractional here, so the bound accounts for a
/// partially visible last cell. Grids smaller than the view get 0.
pub fn max_allowed_offset(
    managed_cells: usize,
    extent: i32,
    margin: i32,
    line_width: i32,
    cell_size: i32,
) -> i32 {
    let pitch = f64::from(cell_pitch(cell_size, line_width));
    let displayable = f64::from(extent - line_width - margin) / pitch;
    let max = ((managed_cells as f64 - displayable) * pitch - f64::from(line_width)).floor();
    (max as i32).max(0)
}

/// Index of the first cell (partially) visible at `offset`
#[inline]
pub fn start_index(offset: i32, cell_size: i32, line_width: i32) -> i32 {
    offset.div_euclid(cell_pitch(cell_size, line_width))
}

/// Screen coordinate of the grid line preceding cell `index`
#[inline]
pub fn grid_line_coord(index: i32, offset: i32, margin: i32, cell_size: i32, line_width: i32) -> i32 {
    margin - offset + index * cell_pitch(cell_size, line_width)
}

/// Screen coordinate of the first pixel inside cell `index`
#[inline]
pub fn cell_origin(index: i32, offset: i32, margin: i32, cell_size: i32, line_width: i32) -> i32 {
    grid_line_coord(index, offset, margin, cell_size, line_width) + line_width
}

/// Cell index under screen coordinate `pos` (no bounds check)
#[inline]
pub fn cell_index_at(pos: i32, offset: i32, margin: i32, cell_size: i32, line_width: i32) -> i32 {
    (pos - margin - line_width + offset).div_euclid(cell_pitch(cell_size, line_width))
}

/// Pixel change applied by one zoom step
#[inline]
pub fn zoom_step(cell_size: i32) -> i32 {
    (cell_size / 10).max(1)
}
