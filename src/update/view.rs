//! Viewport message handlers (panning, zooming)

use crate::commands::Cmd;
use crate::messages::{Direction, Edge, ViewMsg};
use crate::model::AppModel;

/// Handle viewport messages
pub fn update_view(model: &mut AppModel, msg: ViewMsg) -> Option<Cmd> {
    let viewport = &mut model.viewport;
    let changed = match msg {
        ViewMsg::Pan { dx, dy } => viewport.move_by(dx, dy),
        ViewMsg::Move(direction, px) => match direction {
            Direction::Up => viewport.move_up(px),
            Direction::Down => viewport.move_down(px),
            Direction::Left => viewport.move_left(px),
            Direction::Right => viewport.move_right(px),
        },
        ViewMsg::MoveToEdge(edge) => match edge {
            Edge::Top => viewport.move_to_top(),
            Edge::Bottom => viewport.move_to_bottom(),
            Edge::LeftHome => viewport.move_to_left_home(),
            Edge::RightEnd => viewport.move_to_right_end(),
        },
        ViewMsg::ZoomIn => viewport.zoom_in(),
        ViewMsg::ZoomOut => viewport.zoom_out(),
    };

    if changed {
        model.mark_changed();
        Some(Cmd::Redraw)
    } else {
        None
    }
}
