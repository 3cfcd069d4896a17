//! Visible cell ranges and on-screen cell rectangles

use std::ops::Range;

use super::geometry::{cell_origin, Axis, PixelRect};
use super::Viewport;
use crate::grid::CellPos;

impl Viewport {
    /// Columns to draw: the displayable ones plus two partial border cells
    pub fn visible_cols(&self) -> Range<usize> {
        self.visible_range(Axis::Horizontal)
    }

    /// Rows to draw: the displayable ones plus two partial border cells
    pub fn visible_rows(&self) -> Range<usize> {
        self.visible_range(Axis::Vertical)
    }

    pub fn visible_range(&self, axis: Axis) -> Range<usize> {
        let (start, displayable) = match axis {
            Axis::Horizontal => (self.start_col(), self.displayable_cols()),
            Axis::Vertical => (self.start_row(), self.displayable_rows()),
        };
        let end = self.managed_cells(axis).min(start + displayable + 2);
        start.min(end)..end
    }

    /// Screen span `(start, length)` of a visible cell along `axis`
    ///
    /// The first and last cells of the visible range are clipped to the area
    /// between the label margin and the surface edge. Returns `None` when the
    /// cell is outside the range or clipped away entirely.
    pub fn cell_span(&self, axis: Axis, index: usize) -> Option<(i32, i32)> {
        let range = self.visible_range(axis);
        if !range.contains(&index) {
            return None;
        }

        let mut start = cell_origin(
            index as i32,
            self.offset(axis),
            self.margin,
            self.cell_size,
            self.settings.line_width,
        ) - self.settings.cell_size_offset;
        let mut end = start + self.cell_size;

        if index == range.start || index + 1 == range.end {
            start = start.max(self.margin);
            end = end.min(self.extent(axis));
        }

        (end > start).then_some((start, end - start))
    }

    /// Rectangle to fill for a visible cell
    pub fn cell_rect(&self, pos: CellPos) -> Option<PixelRect> {
        let (x, width) = self.cell_span(Axis::Horizontal, pos.col)?;
        let (y, height) = self.cell_span(Axis::Vertical, pos.row)?;
        Some(PixelRect::new(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use crate::viewport::{Viewport, ViewportSettings};

    use super::*;

    #[test]
    fn test_visible_range_at_origin() {
        let vp = Viewport::new(ViewportSettings::default());
        assert_eq!(vp.visible_cols(), 0..50);
        assert_eq!(vp.visible_rows(), 0..50);
    }

    #[test]
    fn test_interior_cell_is_unclipped() {
        let vp = Viewport::new(ViewportSettings::default());
        assert_eq!(
            vp.cell_rect(CellPos::new(1, 2)),
            Some(PixelRect::new(37, 53, 15, 15))
        );
    }

    #[test]
    fn test_first_cell_clipped_at_margin() {
        let mut vp = Viewport::new(ViewportSettings::default());
        // Cell 0 now starts at 21 - 10 = 11, inside the margin
        vp.move_right(10);
        assert_eq!(vp.cell_span(Axis::Horizontal, 0), Some((20, 6)));
    }

    #[test]
    fn test_cell_outside_range_has_no_rect() {
        let vp = Viewport::new(ViewportSettings::default());
        assert_eq!(vp.cell_rect(CellPos::new(50, 0)), None);
    }

    #[test]
    fn test_last_cell_clipped_at_surface_edge() {
        let vp = Viewport::new(ViewportSettings::default());
        // Cell 48 starts at 20 + 1 + 48 * 16 = 789
        assert_eq!(vp.cell_span(Axis::Horizontal, 48), Some((789, 15)));
        // Cell 49 is the border cell and starts past the 791px edge
        assert_eq!(vp.cell_span(Axis::Horizontal, 49), None);

        let mut vp = Viewport::new(ViewportSettings::default());
        vp.move_right(4);
        // The range is now 0..50 with cell 49 at 801, still clipped away;
        // cell 0 is partially hidden under the margin
        assert_eq!(vp.cell_span(Axis::Horizontal, 0), Some((20, 12)));
    }
}
