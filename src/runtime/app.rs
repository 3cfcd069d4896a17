use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use cellgrid::commands::Cmd;
use cellgrid::messages::{AppMsg, Msg};
use cellgrid::model::AppModel;
use cellgrid::update::update;

use super::{dialogs, input};
use crate::view::Renderer;

pub struct App {
    model: AppModel,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    save_prompt: bool,
    frame_interval: Duration,
    next_frame: Instant,
    modifiers: ModifiersState,
    held_keys: HashSet<KeyCode>,
    mouse_position: (i32, i32),
    /// Last pointer position while the left button is down
    drag_anchor: Option<(i32, i32)>,
    dragging: bool,
    /// Consecutive failed frames
    render_failures: u32,
    exiting: bool,
}

impl App {
    pub fn new(model: AppModel, save_prompt: bool) -> Self {
        let frame_interval = model.config.frame_interval();
        Self {
            model,
            renderer: None,
            window: None,
            context: None,
            save_prompt,
            frame_interval,
            next_frame: Instant::now(),
            modifiers: ModifiersState::empty(),
            held_keys: HashSet::new(),
            mouse_position: (0, 0),
            drag_anchor: None,
            dragging: false,
            render_failures: 0,
            exiting: false,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = &self.model.config;
        let [x, y] = config.window_position;
        let window_attributes = Window::default_attributes()
            .with_title(config.window_title.clone())
            .with_inner_size(PhysicalSize::new(
                config.surface_width.max(1),
                config.surface_height.max(1),
            ))
            .with_position(PhysicalPosition::new(x, y))
            .with_resizable(false);

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create graphics context: {}", e))?;

        let renderer = Renderer::new(Rc::clone(&window), &context, &self.model)?;

        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    /// Run a message through update and carry out the resulting command
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(event_loop, cmd);
        }
    }

    fn process_cmd(&mut self, event_loop: &ActiveEventLoop, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            // The model's redraw flag is polled in about_to_wait
            Cmd::Redraw => {}
            Cmd::ShowMissingFile { file_name } => dialogs::show_missing_file(&file_name),
            Cmd::ShowError { message } => dialogs::show_error(&message),
            Cmd::Exit => {
                self.exiting = true;
                event_loop.exit();
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(event_loop, cmd);
                }
            }
        }
    }

    fn request_quit(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            return;
        }
        let save = self.save_prompt && dialogs::confirm("Do you want to save grid data ?");
        self.dispatch(event_loop, Msg::App(AppMsg::Quit { save }));
    }

    fn handle_mouse_button(&mut self, event_loop: &ActiveEventLoop, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.drag_anchor = Some(self.mouse_position);
                self.dragging = false;
            }
            ElementState::Released => {
                let anchor = self.drag_anchor.take();
                if self.dragging {
                    self.dragging = false;
                } else if anchor == Some(self.mouse_position) {
                    let (x, y) = self.mouse_position;
                    self.dispatch(event_loop, Msg::toggle_cell_at(x, y));
                }
            }
        }
    }

    fn handle_cursor_moved(&mut self, event_loop: &ActiveEventLoop, position: (i32, i32)) {
        self.mouse_position = position;
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        if anchor == position {
            return;
        }
        self.dragging = true;
        self.drag_anchor = Some(position);
        let dx = position.0 - anchor.0;
        let dy = position.1 - anchor.1;
        self.dispatch(event_loop, Msg::pan(dx, dy));
    }

    fn render(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        let result = renderer.render(&self.model);
        self.render_failures = settle_frame(&mut self.model, result, self.render_failures);
    }

    /// Apply held arrow keys once per frame tick
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now < self.next_frame {
            return;
        }
        self.next_frame = now + self.frame_interval;

        let step = self.model.move_increment();
        for msg in input::frame_messages(&self.held_keys, self.modifiers, step) {
            self.dispatch(event_loop, msg);
        }
    }
}

/// Clear the redraw flag after a frame attempt and return the new failure streak.
///
/// A failed frame is not retried until the model changes again; only the first
/// failure of a streak is logged.
fn settle_frame(model: &mut AppModel, result: Result<()>, failures: u32) -> u32 {
    model.mark_drawn();
    match result {
        Ok(()) => {
            if failures > 0 {
                tracing::info!("Rendering recovered after {} failed frames", failures);
            }
            0
        }
        Err(e) => {
            if failures == 0 {
                tracing::error!("Render error: {:#}", e);
            }
            failures.saturating_add(1)
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to create window: {:#}", e);
                dialogs::show_error(&format!("Could not open the grid window: {}", e));
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.request_quit(event_loop),
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered to unfocused windows
                self.held_keys.clear();
                self.drag_anchor = None;
                self.dragging = false;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => {
                        self.held_keys.insert(code);
                        if !event.repeat {
                            if let Some(msg) = input::shortcut_message(code, self.modifiers) {
                                self.dispatch(event_loop, msg);
                            }
                        }
                    }
                    ElementState::Released => {
                        self.held_keys.remove(&code);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(event_loop, (position.x as i32, position.y as i32));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.handle_mouse_button(event_loop, state),
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            return;
        }

        self.tick(event_loop);

        if self.model.needs_redraw() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        if self.held_keys.is_empty() {
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgrid::config::GridConfig;
    use cellgrid::grid::{CellGrid, GridDataStore};
    use cellgrid::viewport::{Viewport, ViewportSettings};

    fn model() -> AppModel {
        let viewport = Viewport::new(ViewportSettings {
            surface_width: 100,
            surface_height: 100,
            ..ViewportSettings::default()
        });
        let grid = CellGrid::new(viewport.managed_size());
        AppModel::from_parts(
            GridConfig::default(),
            viewport,
            grid,
            GridDataStore::new("grid.csv"),
        )
    }

    #[test]
    fn test_failed_frame_is_not_retried() {
        let mut model = model();
        model.mark_changed();

        let failures = settle_frame(&mut model, Err(anyhow::anyhow!("surface lost")), 0);

        assert_eq!(failures, 1);
        assert!(!model.needs_redraw());
    }

    #[test]
    fn test_failure_streak_resets_on_success() {
        let mut model = model();

        let failures = settle_frame(&mut model, Err(anyhow::anyhow!("surface lost")), 1);
        assert_eq!(failures, 2);

        model.mark_changed();
        assert_eq!(settle_frame(&mut model, Ok(()), failures), 0);
        assert!(!model.needs_redraw());
    }
}
