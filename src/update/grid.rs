//! Cell data message handlers

use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::model::AppModel;

/// Handle cell data messages
pub fn update_grid(model: &mut AppModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::ToggleCellAt { x, y } => {
            let Some(pos) = model.viewport.cell_at(x, y) else {
                tracing::trace!(x, y, "click outside the grid ignored");
                return None;
            };
            let alive = model.grid.toggle(pos);
            tracing::debug!(col = pos.col, row = pos.row, alive, "cell toggled");
            model.mark_changed();
            Some(Cmd::Redraw)
        }

        GridMsg::Load => match model.load_grid() {
            Ok(None) => Some(Cmd::Redraw),
            Ok(Some(file_name)) => Some(Cmd::batch(vec![
                Cmd::ShowMissingFile { file_name },
                Cmd::Redraw,
            ])),
            Err(e) => {
                tracing::error!("Failed to load grid: {}", e);
                Some(Cmd::ShowError {
                    message: format!("Could not load grid data: {}", e),
                })
            }
        },

        GridMsg::Save => match model.save_grid() {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("Failed to save grid: {}", e);
                Some(Cmd::ShowError {
                    message: format!("Could not save grid data: {}", e),
                })
            }
        },

        GridMsg::Clear => {
            model.reset_grid();
            Some(Cmd::Redraw)
        }
    }
}
