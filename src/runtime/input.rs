//! Keyboard input handling
//!
//! Arrow keys act while held: the app tracks pressed keys and turns them
//! into messages once per frame, so panning speed follows the frame rate.
//! Shortcuts are mapped on key press.

use std::collections::HashSet;

use winit::keyboard::{KeyCode, ModifiersState};

use cellgrid::messages::{Direction, Edge, GridMsg, Msg, ViewMsg};

/// Messages for the arrow keys held during one frame
///
/// - Shift: Up zooms in, otherwise Down zooms out
/// - Ctrl: each arrow jumps to its grid edge
/// - none: each arrow pans by `step` pixels
pub fn frame_messages(held: &HashSet<KeyCode>, modifiers: ModifiersState, step: i32) -> Vec<Msg> {
    let pressed = |code: KeyCode| held.contains(&code);
    let mut msgs = Vec::new();

    if modifiers.shift_key() {
        if pressed(KeyCode::ArrowUp) {
            msgs.push(Msg::View(ViewMsg::ZoomIn));
        } else if pressed(KeyCode::ArrowDown) {
            msgs.push(Msg::View(ViewMsg::ZoomOut));
        }
    } else if modifiers.control_key() {
        let edges = [
            (KeyCode::ArrowUp, Edge::Top),
            (KeyCode::ArrowDown, Edge::Bottom),
            (KeyCode::ArrowLeft, Edge::LeftHome),
            (KeyCode::ArrowRight, Edge::RightEnd),
        ];
        for (code, edge) in edges {
            if pressed(code) {
                msgs.push(Msg::View(ViewMsg::MoveToEdge(edge)));
            }
        }
    } else {
        let moves = [
            (KeyCode::ArrowDown, Direction::Down),
            (KeyCode::ArrowUp, Direction::Up),
            (KeyCode::ArrowRight, Direction::Right),
            (KeyCode::ArrowLeft, Direction::Left),
        ];
        for (code, direction) in moves {
            if pressed(code) {
                msgs.push(Msg::View(ViewMsg::Move(direction, step)));
            }
        }
    }

    msgs
}

/// Message for a shortcut key press, if any
///
/// - Ctrl+S: save the grid file
/// - Ctrl+L: reload the grid file
/// - Ctrl+N: clear the grid
pub fn shortcut_message(code: KeyCode, modifiers: ModifiersState) -> Option<Msg> {
    if !modifiers.control_key() {
        return None;
    }
    match code {
        KeyCode::KeyS => Some(Msg::Grid(GridMsg::Save)),
        KeyCode::KeyL => Some(Msg::Grid(GridMsg::Load)),
        KeyCode::KeyN => Some(Msg::Grid(GridMsg::Clear)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(codes: &[KeyCode]) -> HashSet<KeyCode> {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_plain_arrows_pan() {
        let msgs = frame_messages(
            &held(&[KeyCode::ArrowRight, KeyCode::ArrowDown]),
            ModifiersState::empty(),
            3,
        );
        assert_eq!(
            msgs,
            vec![
                Msg::View(ViewMsg::Move(Direction::Down, 3)),
                Msg::View(ViewMsg::Move(Direction::Right, 3)),
            ]
        );
    }

    #[test]
    fn test_shift_up_wins_over_down() {
        let msgs = frame_messages(
            &held(&[KeyCode::ArrowUp, KeyCode::ArrowDown]),
            ModifiersState::SHIFT,
            1,
        );
        assert_eq!(msgs, vec![Msg::View(ViewMsg::ZoomIn)]);
    }

    #[test]
    fn test_ctrl_arrows_jump() {
        let msgs = frame_messages(&held(&[KeyCode::ArrowLeft]), ModifiersState::CONTROL, 1);
        assert_eq!(msgs, vec![Msg::View(ViewMsg::MoveToEdge(Edge::LeftHome))]);
    }

    #[test]
    fn test_nothing_held() {
        assert!(frame_messages(&HashSet::new(), ModifiersState::empty(), 1).is_empty());
    }

    #[test]
    fn test_shortcuts_need_ctrl() {
        assert_eq!(shortcut_message(KeyCode::KeyS, ModifiersState::empty()), None);
        assert_eq!(
            shortcut_message(KeyCode::KeyS, ModifiersState::CONTROL),
            Some(Msg::Grid(GridMsg::Save))
        );
        assert_eq!(
            shortcut_message(KeyCode::KeyN, ModifiersState::CONTROL),
            Some(Msg::Grid(GridMsg::Clear))
        );
    }
}
