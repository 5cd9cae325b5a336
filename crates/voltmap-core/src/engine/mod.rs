pub mod binning;
pub mod config;
pub mod error;
pub mod ingest;
pub mod progress;
pub mod scale;
