use std::path::PathBuf;
use thiserror::Error;
use voltmap::engine::config::ConfigError;
use voltmap::engine::error::EngineError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("No input files with extension '{extension}' found in '{path}'", path = path.display())]
    NoInputs { path: PathBuf, extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
