// error.rs - Error type shared by the grid, the engine and config loading

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = LifeError> = std::result::Result<T, E>;

/// All kinds of errors in this crate.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Grids need at least one cell per side.
    #[error("grid size must be positive, got {0}")]
    InvalidSize(usize),
    /// Direct cell access outside `[0, size)`.
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfRange { x: usize, y: usize, size: usize },
    #[error("tick frequency must be a positive number of generations per second, got {0}")]
    InvalidFrequency(f64),
    #[error("read {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
