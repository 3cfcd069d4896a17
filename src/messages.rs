//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

/// Direction for panning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Grid edge to jump to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    LeftHome,
    RightEnd,
}

/// Viewport messages (panning, zooming)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMsg {
    /// Shift the scroll offsets by a pixel delta, clamped (mouse drag)
    Pan { dx: i32, dy: i32 },
    /// Pan in a direction by a number of pixels (held arrow key)
    ///
    /// Moves toward the origin are clamped; moves away from it are dropped
    /// when they would reach the end of the grid.
    Move(Direction, i32),
    /// Jump to a grid edge (Ctrl+Arrow)
    MoveToEdge(Edge),
    /// Enlarge cells one step (Shift+Up)
    ZoomIn,
    /// Shrink cells one step (Shift+Down)
    ZoomOut,
}

/// Cell data messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMsg {
    /// Flip the cell under a surface pixel (mouse click)
    ToggleCellAt { x: i32, y: i32 },
    /// Reload the grid file
    Load,
    /// Write the grid file
    Save,
    /// Kill every cell
    Clear,
}

/// App messages (lifecycle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Leave the application, saving the grid first if `save`
    Quit { save: bool },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    View(ViewMsg),
    Grid(GridMsg),
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn pan(dx: i32, dy: i32) -> Self {
        Msg::View(ViewMsg::Pan { dx, dy })
    }

    pub fn toggle_cell_at(x: i32, y: i32) -> Self {
        Msg::Grid(GridMsg::ToggleCellAt { x, y })
    }
}
