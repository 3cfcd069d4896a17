use anyhow::{Context as _, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use cellgrid::cli::{CliArgs, LoadPolicy};
use cellgrid::config::GridConfig;
use cellgrid::model::AppModel;

mod runtime;
mod view;

use runtime::{dialogs, App};

fn main() -> Result<()> {
    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    cellgrid::tracing::init();

    let config = match &startup.config_path {
        Some(path) => GridConfig::load_from(path),
        None => GridConfig::load(),
    };
    let config_file = startup
        .config_path
        .clone()
        .or_else(cellgrid::config_paths::config_file);
    let grid_path = startup
        .grid_path
        .clone()
        .unwrap_or_else(|| config.grid_path(config_file.as_deref()));

    tracing::info!("Grid data file: {}", grid_path.display());

    let mut model = AppModel::new(config, grid_path);

    let load = match startup.load {
        LoadPolicy::Ask => dialogs::confirm("Do you want to load existing grid data ?"),
        LoadPolicy::Always => true,
        LoadPolicy::Never => false,
    };
    if load {
        match model.load_grid() {
            Ok(Some(file_name)) => dialogs::show_missing_file(&file_name),
            Ok(None) => {}
            Err(e) => {
                dialogs::show_error(&format!("Could not load grid data: {}", e));
                return Err(e)
                    .with_context(|| format!("loading {}", model.store.path().display()));
            }
        }
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(model, startup.save_prompt);

    event_loop.run_app(&mut app)?;

    Ok(())
}
