//! Logging setup and viewport state diffing
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=cellgrid::viewport=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/cellgrid/logs/cellgrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::viewport::Viewport;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "cellgrid.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Pan/zoom state captured before and after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSnapshot {
    pub cell_size: i32,
    pub offset_x: i32,
    pub offset_y: i32,
    pub margin: i32,
    pub start_col: usize,
    pub start_row: usize,
}

impl ViewportSnapshot {
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            cell_size: viewport.cell_size(),
            offset_x: viewport.offset_x(),
            offset_y: viewport.offset_y(),
            margin: viewport.margin(),
            start_col: viewport.start_col(),
            start_row: viewport.start_row(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &ViewportSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.cell_size != other.cell_size {
            changes.push(format!("cell size: {} → {}", self.cell_size, other.cell_size));
        }
        if self.margin != other.margin {
            changes.push(format!("margin: {} → {}", self.margin, other.margin));
        }
        if (self.offset_x, self.offset_y) != (other.offset_x, other.offset_y) {
            changes.push(format!(
                "offset: ({},{}) → ({},{})",
                self.offset_x, self.offset_y, other.offset_x, other.offset_y
            ));
        }
        if (self.start_col, self.start_row) != (other.start_col, other.start_row) {
            changes.push(format!(
                "start cell: ({},{}) → ({},{})",
                self.start_col, self.start_row, other.start_col, other.start_row
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportSettings;

    #[test]
    fn test_snapshot_diff() {
        let mut viewport = Viewport::new(ViewportSettings::default());
        let before = ViewportSnapshot::from_viewport(&viewport);
        assert_eq!(before.diff(&before), None);

        viewport.move_right(32);
        let after = ViewportSnapshot::from_viewport(&viewport);
        assert_eq!(
            before.diff(&after).as_deref(),
            Some("offset: (0,0) → (32,0); start cell: (0,0) → (2,0)")
        );
    }
}
