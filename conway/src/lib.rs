// lib.rs - Conway's Game of Life on a fixed-size toroidal grid
// Grid holds the cells and the B3/S23 rule; SimulationEngine runs generations on a tokio task

mod config;
mod engine;
mod error;
mod grid;

pub use config::{DEFAULT_FREQUENCY, DEFAULT_GRID_SIZE, EngineConfig, load_config};
pub use engine::{EngineEvent, EngineObserver, RunState, SimulationEngine};
pub use error::{LifeError, Result};
pub use grid::Grid;
