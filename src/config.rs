//! Grid editor configuration
//!
//! Stores window and grid settings in `~/.config/cellgrid/config.yaml`.
//! A missing file is created with defaults; a file lacking some keys is
//! completed and written back, so users always have every setting to edit.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::viewport::geometry::tuned_cell_size_offset;
use crate::viewport::{ViewportSettings, SMALLEST_CELL_REQUIRED_PX_NUMBER};

/// Keys a complete config file contains (`label_font` is optional)
const PERSISTED_KEYS: &[&str] = &[
    "window_title",
    "window_position",
    "profile",
    "surface_width",
    "surface_height",
    "fps",
    "axis_label_hide_cell_size",
    "active_cell_color",
    "grid_line",
    "cell_size",
    "margin_size",
    "axis_font_size",
    "move_increment",
    "grid_file",
];

/// Error type for configuration loading and saving
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// YAML syntax or type error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Parse(e) => write!(f, "invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e)
    }
}

/// Device class selecting size defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformProfile {
    Desktop,
    Mobile,
}

impl PlatformProfile {
    /// Profile of the platform this binary was built for
    pub fn detect() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn default_cell_size(self) -> i32 {
        match self {
            Self::Desktop => 15,
            Self::Mobile => 35,
        }
    }

    pub fn default_margin_size(self) -> i32 {
        match self {
            Self::Desktop => 20,
            Self::Mobile => 40,
        }
    }
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,

    /// Outer window position `[x, y]` in physical pixels
    #[serde(default = "default_window_position")]
    pub window_position: [i32; 2],

    /// Size defaults; detected from the build target when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PlatformProfile>,

    /// Drawing surface size; also the managed grid size in cells
    #[serde(default = "default_surface_size")]
    pub surface_width: u32,
    #[serde(default = "default_surface_size")]
    pub surface_height: u32,

    #[serde(default = "default_fps")]
    pub fps: u32,

    /// At or below this cell size, axis labels and their margin are hidden
    #[serde(default = "default_axis_label_hide_cell_size")]
    pub axis_label_hide_cell_size: i32,

    /// `[r, g, b]`
    #[serde(default = "default_active_cell_color")]
    pub active_cell_color: [u8; 3],

    /// `[line_width, cell_size_offset]`
    #[serde(default = "default_grid_line")]
    pub grid_line: [i32; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_size: Option<i32>,

    #[serde(default = "default_axis_font_size")]
    pub axis_font_size: u32,

    /// Pixels panned per frame while an arrow key is held
    #[serde(default = "default_move_increment")]
    pub move_increment: i32,

    /// Grid data file; relative paths resolve against the config file's directory
    #[serde(default = "default_grid_file")]
    pub grid_file: PathBuf,

    /// TTF/OTF font for axis labels; common system fonts are tried otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_font: Option<PathBuf>,
}

fn default_window_title() -> String {
    "Draw grid".to_string()
}

fn default_window_position() -> [i32; 2] {
    [400, 20]
}

fn default_surface_size() -> u32 {
    791
}

fn default_fps() -> u32 {
    20
}

fn default_axis_label_hide_cell_size() -> i32 {
    11
}

fn default_active_cell_color() -> [u8; 3] {
    [0, 255, 0]
}

fn default_grid_line() -> [i32; 2] {
    [1, 0]
}

fn default_axis_font_size() -> u32 {
    12
}

fn default_move_increment() -> i32 {
    1
}

fn default_grid_file() -> PathBuf {
    PathBuf::from("griddata.csv")
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            window_position: default_window_position(),
            profile: None,
            surface_width: default_surface_size(),
            surface_height: default_surface_size(),
            fps: default_fps(),
            axis_label_hide_cell_size: default_axis_label_hide_cell_size(),
            active_cell_color: default_active_cell_color(),
            grid_line: default_grid_line(),
            cell_size: None,
            margin_size: None,
            axis_font_size: default_axis_font_size(),
            move_increment: default_move_increment(),
            grid_file: default_grid_file(),
            label_font: None,
        }
    }
}

impl GridConfig {
    /// Load config from the default location
    pub fn load() -> Self {
        match crate::config_paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Self::default().completed()
            }
        }
    }

    /// Load config from `path`, creating or completing the file as needed
    ///
    /// Never fails: unreadable or invalid files fall back to defaults with a
    /// warning and are left untouched.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default().completed();
            match config.save_to(path) {
                Ok(()) => tracing::info!("Wrote default config to {}", path.display()),
                Err(e) => tracing::warn!("Failed to write default config: {}", e),
            }
            return config;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                return Self::default().completed();
            }
        };

        match Self::parse(&content) {
            Ok((config, true)) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Ok((config, false)) => {
                let config = config.completed();
                match config.save_to(path) {
                    Ok(()) => tracing::info!("Completed missing keys in {}", path.display()),
                    Err(e) => tracing::warn!("Failed to rewrite config: {}", e),
                }
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                Self::default().completed()
            }
        }
    }

    /// Parse YAML text, reporting whether every persisted key was present
    pub fn parse(content: &str) -> Result<(Self, bool), ConfigError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok((Self::default(), false));
        }
        let complete = value
            .as_mapping()
            .is_some_and(|map| PERSISTED_KEYS.iter().all(|key| map.contains_key(*key)));
        let config = serde_yaml::from_value(value)?;
        Ok((config, complete))
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill profile-dependent keys with their resolved values
    pub fn completed(mut self) -> Self {
        let profile = self.profile();
        self.profile = Some(profile);
        self.cell_size = Some(self.cell_size());
        self.margin_size = Some(self.margin_size());
        self
    }

    pub fn profile(&self) -> PlatformProfile {
        self.profile.unwrap_or_else(PlatformProfile::detect)
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
            .unwrap_or_else(|| self.profile().default_cell_size())
    }

    pub fn margin_size(&self) -> i32 {
        self.margin_size
            .unwrap_or_else(|| self.profile().default_margin_size())
    }

    /// Value object consumed by the viewport
    pub fn viewport_settings(&self) -> ViewportSettings {
        let [line_width, cell_size_offset] = self.grid_line;
        let line_width = line_width.max(1);
        if tuned_cell_size_offset(line_width) != Some(cell_size_offset) {
            tracing::warn!(
                line_width,
                cell_size_offset,
                "grid_line pair is not a tuned combination; filled cells may be misaligned"
            );
        }

        let cell_size = self.cell_size();
        if cell_size < SMALLEST_CELL_REQUIRED_PX_NUMBER {
            tracing::warn!(
                cell_size,
                "cell_size below {}, using the minimum",
                SMALLEST_CELL_REQUIRED_PX_NUMBER
            );
        }

        ViewportSettings {
            surface_width: clamp_px(self.surface_width),
            surface_height: clamp_px(self.surface_height),
            cell_size: cell_size.max(SMALLEST_CELL_REQUIRED_PX_NUMBER),
            line_width,
            cell_size_offset,
            margin_size: self.margin_size().max(0),
            axis_label_hide_cell_size: self.axis_label_hide_cell_size,
        }
    }

    /// Active cell color as ARGB
    pub fn active_cell_argb(&self) -> u32 {
        let [r, g, b] = self.active_cell_color;
        0xFF000000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// Time between two frames at the configured FPS
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    /// Grid file location, relative paths taken from `config_file`'s directory
    pub fn grid_path(&self, config_file: Option<&Path>) -> PathBuf {
        if self.grid_file.is_absolute() {
            return self.grid_file.clone();
        }
        match config_file.and_then(Path::parent) {
            Some(dir) => dir.join(&self.grid_file),
            None => self.grid_file.clone(),
        }
    }
}

fn clamp_px(value: u32) -> i32 {
    i32::try_from(value.max(1)).unwrap_or(i32::MAX)
}
