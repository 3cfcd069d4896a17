//! Grid drawing
//!
//! Turns the viewport state and the cell values into draw calls against a
//! [`DrawTarget`]. Holds no state of its own; the binary implements the
//! target on top of a softbuffer pixel frame, tests implement it with a
//! call recorder.

use crate::grid::{CellGrid, CellPos};
use crate::viewport::{PixelRect, Viewport};

/// Surface the grid is drawn onto. Colors are ARGB (`0xAARRGGBB`).
pub trait DrawTarget {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    /// Fill the whole surface
    fn clear(&mut self, color: u32);

    /// Straight horizontal or vertical line of `width` pixels
    fn draw_line(&mut self, start: (i32, i32), end: (i32, i32), width: i32, color: u32);

    fn fill_rect(&mut self, rect: PixelRect, color: u32);

    /// Text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: u32);
}

/// Colors used for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPalette {
    pub background: u32,
    pub grid_line: u32,
    pub axis_label: u32,
    pub active_cell: u32,
}

impl Default for GridPalette {
    fn default() -> Self {
        Self {
            background: 0xFFFFFFFF,
            grid_line: 0xFF000000,
            axis_label: 0xFF000000,
            active_cell: 0xFF00FF00,
        }
    }
}

impl GridPalette {
    pub fn with_active_cell(active_cell: u32) -> Self {
        Self {
            active_cell,
            ..Self::default()
        }
    }
}

/// Row/column label, right-aligned on three characters
pub fn axis_label(index: usize) -> String {
    format!("{:>3}", index)
}

/// Render a complete frame: background, grid lines, labels and live cells
pub fn draw_frame(
    target: &mut impl DrawTarget,
    viewport: &Viewport,
    grid: &CellGrid,
    palette: &GridPalette,
) {
    target.clear(palette.background);
    draw_row_lines(target, viewport, palette);
    draw_col_lines(target, viewport, palette);
    draw_active_cells(target, viewport, grid, palette);
}

// Lines scrolled into the label margin are skipped and replaced by one more
// line at the far end, so the count of drawn lines stays constant.
fn draw_row_lines(target: &mut impl DrawTarget, viewport: &Viewport, palette: &GridPalette) {
    let margin = viewport.margin();
    let pitch = viewport.cell_size() + viewport.line_width();
    let mut budget = viewport.displayable_rows();
    let mut drawn = 0;
    let mut index = viewport.start_row();

    while drawn <= budget {
        let y = margin - viewport.offset_y() + index as i32 * pitch;

        if viewport.show_axis_labels() && y >= margin / 2 {
            target.draw_text(0, y, &axis_label(index), palette.axis_label);
        }

        drawn += 1;
        index += 1;

        if y < margin {
            budget += 1;
            continue;
        }
        let right = target.width();
        target.draw_line(
            (margin, y),
            (right, y),
            viewport.line_width(),
            palette.grid_line,
        );
    }
}

fn draw_col_lines(target: &mut impl DrawTarget, viewport: &Viewport, palette: &GridPalette) {
    let margin = viewport.margin();
    let pitch = viewport.cell_size() + viewport.line_width();
    let mut budget = viewport.displayable_cols();
    let mut drawn = 0;
    let mut index = viewport.start_col();

    while drawn <= budget {
        let x = margin - viewport.offset_x() + index as i32 * pitch;

        if viewport.show_axis_labels() && x >= margin / 2 {
            target.draw_text(x, 1, &axis_label(index), palette.axis_label);
        }

        drawn += 1;
        index += 1;

        if x < margin {
            budget += 1;
            continue;
        }
        let bottom = target.height();
        target.draw_line(
            (x, margin),
            (x, bottom),
            viewport.line_width(),
            palette.grid_line,
        );
    }
}

fn draw_active_cells(
    target: &mut impl DrawTarget,
    viewport: &Viewport,
    grid: &CellGrid,
    palette: &GridPalette,
) {
    for row in viewport.visible_rows() {
        for col in viewport.visible_cols() {
            let pos = CellPos::new(col, row);
            if !grid.get(pos) {
                continue;
            }
            if let Some(rect) = viewport.cell_rect(pos) {
                target.fill_rect(rect, palette.active_cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_label_padding() {
        assert_eq!(axis_label(3), "  3");
        assert_eq!(axis_label(42), " 42");
        assert_eq!(axis_label(123), "123");
        assert_eq!(axis_label(4567), "4567");
    }

    #[test]
    fn test_palette_override() {
        let palette = GridPalette::with_active_cell(0xFFFF0000);
        assert_eq!(palette.active_cell, 0xFFFF0000);
        assert_eq!(palette.background, 0xFFFFFFFF);
    }
}
