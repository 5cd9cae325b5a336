use crate::core::io::csv::CsvWriteError;
use crate::engine::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Invalid color scale configuration: {source}")]
    Scale {
        #[from]
        source: ConfigError,
    },

    #[error(
        "Energy {energy} at point {index} of dataset '{dataset}' is outside the representable bin range"
    )]
    EnergyOutOfRange {
        dataset: String,
        index: usize,
        energy: f64,
    },

    #[error("Serialization failed: {source}")]
    Serialization {
        #[from]
        source: CsvWriteError,
    },
}
