// main.rs - Desktop window for Conway's Game of Life
// The simulation itself lives in the `conway` crate; this binary only drives it

mod logging;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use conway::{EngineConfig, SimulationEngine, load_config};
use eframe::egui;
use tracing::info;

use crate::ui::{CELL_SIZE, LifeApp, UiObserver};

#[derive(Parser)]
#[command(name = "conway_ui", version, about = "Conway's Game of Life on a wrap-around grid")]
struct Args {
    /// TOML file with `grid_size` and `frequency`; missing file means defaults
    #[arg(long, default_value = "life.toml")]
    config: PathBuf,

    /// Cells per side, overrides the config file
    #[arg(long)]
    size: Option<usize>,

    /// Generations per second, overrides the config file
    #[arg(long)]
    fps: Option<f64>,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = load_config(&self.config)?;
        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(fps) = self.fps {
            config.frequency = fps;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    let config = args.engine_config()?;
    info!(grid_size = config.grid_size, frequency = config.frequency, "starting");

    let runtime = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let observer = Arc::new(UiObserver::default());
    let engine = SimulationEngine::new(&config, runtime.handle().clone(), observer.clone())?;

    let side = config.grid_size as f32 * CELL_SIZE;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side + 100.0, side + 60.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "The Game of Life",
        options,
        Box::new(move |cc| {
            observer.attach(cc.egui_ctx.clone());
            Box::new(LifeApp::new(engine, observer, runtime))
        }),
    )
    .map_err(|err| anyhow!("{err}"))
}
