//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod grid;
mod view;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::ViewportSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use grid::update_grid;
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::View(m) => update_view(model, m),
        Msg::Grid(m) => update_grid(model, m),
        Msg::App(m) => update_app(model, m),
    }
}

/// Update with a debug span and a viewport diff
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = ViewportSnapshot::from_viewport(&model.viewport);
    let result = update_inner(model, msg);
    let after = ViewportSnapshot::from_viewport(&model.viewport);

    if let Some(diff) = before.diff(&after) {
        debug!(target: "viewport", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `View::ZoomIn`
/// - `Grid::ToggleCellAt { x: 40, y: 52 }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::View(m) => format!("View::{:?}", m),
        Msg::Grid(m) => format!("Grid::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
