//! Runtime module - winit/platform integration
//!
//! This module contains platform-specific code for running the editor:
//! - `app` - ApplicationHandler, window management and the frame clock
//! - `input` - Keyboard state to message mapping
//! - `dialogs` - Native message boxes

pub mod app;
pub mod dialogs;
pub mod input;

pub use app::App;
