//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the grid
    Redraw,
    /// Tell the user the grid file was not found and a blank grid is used
    ShowMissingFile { file_name: String },
    /// Show an error message box
    ShowError { message: String },
    /// Request application exit
    Exit,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Dialogs block; the grid is redrawn on the next frame anyway
            Cmd::ShowMissingFile { .. } => false,
            Cmd::ShowError { .. } => false,
            Cmd::Exit => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_redraw() {
        assert!(!Cmd::None.needs_redraw());
        assert!(Cmd::Redraw.needs_redraw());
        assert!(!Cmd::Exit.needs_redraw());
        assert!(Cmd::batch(vec![Cmd::ShowError { message: String::new() }, Cmd::Redraw])
            .needs_redraw());
    }
}
