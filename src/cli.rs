//! Command-line argument parsing
//!
//! Supports:
//! - Alternate config and grid files
//! - Loading or skipping the grid file without the startup question
//! - Disabling the save question on exit

use clap::Parser;
use std::path::PathBuf;

/// A pan-and-zoom editor for binary cell grids
#[derive(Parser, Debug)]
#[command(name = "cellgrid", version, about = "A pan-and-zoom editor for binary cell grids")]
pub struct CliArgs {
    /// Config file to use instead of the one in the config directory
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Grid data file (overrides `grid_file` from the config)
    #[arg(short = 'g', long, value_name = "PATH")]
    pub grid: Option<PathBuf>,

    /// Load the grid file without asking
    #[arg(short = 'l', long)]
    pub load: bool,

    /// Start with a blank grid without asking
    #[arg(short = 'f', long)]
    pub fresh: bool,

    /// Exit without asking whether to save
    #[arg(long)]
    pub no_save_prompt: bool,
}

/// Whether to load the grid file at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Ask the user
    Ask,
    Always,
    Never,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Explicit config file, if any
    pub config_path: Option<PathBuf>,
    /// Explicit grid file, if any
    pub grid_path: Option<PathBuf>,
    pub load: LoadPolicy,
    /// Ask whether to save when the window closes
    pub save_prompt: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let load = match (self.load, self.fresh) {
            (true, true) => return Err("--load and --fresh cannot be combined".to_string()),
            (true, false) => LoadPolicy::Always,
            (false, true) => LoadPolicy::Never,
            (false, false) => LoadPolicy::Ask,
        };

        Ok(StartupConfig {
            config_path: self.config,
            grid_path: self.grid,
            load,
            save_prompt: !self.no_save_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            config: None,
            grid: None,
            load: false,
            fresh: false,
            no_save_prompt: false,
        }
    }

    #[test]
    fn test_default_args_ask() {
        let config = args().into_config().unwrap();
        assert_eq!(config.load, LoadPolicy::Ask);
        assert!(config.save_prompt);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_load_flag() {
        let config = CliArgs {
            load: true,
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.load, LoadPolicy::Always);
    }

    #[test]
    fn test_fresh_flag() {
        let config = CliArgs {
            fresh: true,
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.load, LoadPolicy::Never);
    }

    #[test]
    fn test_load_and_fresh_conflict() {
        let result = CliArgs {
            load: true,
            fresh: true,
            ..args()
        }
        .into_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_no_save_prompt() {
        let config = CliArgs {
            no_save_prompt: true,
            ..args()
        }
        .into_config()
        .unwrap();
        assert!(!config.save_prompt);
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = CliArgs::parse_from(["cellgrid", "--grid", "glider.csv", "--load"]);
        assert_eq!(args.grid, Some(PathBuf::from("glider.csv")));
        assert!(args.load);
    }
}
