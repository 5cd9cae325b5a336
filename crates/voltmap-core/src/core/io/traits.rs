use crate::core::models::dataset::GridDataset;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Identifies the upstream potential solver that produced a grid file.
///
/// The tag is carried through the pipeline unchanged and handed to every
/// [`GridSource`] invocation; this core attaches no semantics to it beyond
/// provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisMode {
    /// Grids produced by the APBS Poisson-Boltzmann solver.
    Apbs,
    /// Grids produced by the EasyMIFs molecular interaction field solver.
    EasyMifs,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown analysis mode '{0}' (expected 'apbs' or 'easymifs')")]
pub struct ParseAnalysisModeError(String);

impl FromStr for AnalysisMode {
    type Err = ParseAnalysisModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apbs" => Ok(Self::Apbs),
            "easymifs" => Ok(Self::EasyMifs),
            other => Err(ParseAnalysisModeError(other.to_string())),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apbs => write!(f, "apbs"),
            Self::EasyMifs => write!(f, "easymifs"),
        }
    }
}

/// Per-invocation request passed through unchanged to every grid source call.
#[derive(Debug, Clone, Copy)]
pub struct GridRequest {
    /// The analysis-mode tag of the batch.
    pub mode: AnalysisMode,
    /// When set, a malformed row aborts the file instead of being skipped.
    pub strict: bool,
}

/// Defines the interface to the external grid parser.
///
/// The raw grid format is an external collaborator of this pipeline: given a
/// file path and the batch request, an implementor returns a self-contained
/// dataset with spatial coordinates and one energy value per point. The
/// driver treats implementations as opaque and already correct; it only
/// requires that a returned dataset carries its source identifier.
///
/// Implementations must be `Sync`-compatible in practice, as the ingestion
/// driver shares one source instance across its worker pool.
pub trait GridSource {
    /// The error type for a single file's parse failure.
    type Error: Error + Send + Sync + 'static;

    /// Reads one grid file into a dataset.
    ///
    /// # Arguments
    ///
    /// * `path` - The grid file to read.
    /// * `request` - The batch-wide mode tag and ingestion flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or yields no usable energy
    /// rows. A failure only excludes this file from the batch; it never
    /// aborts the other workers.
    fn read_grid(&self, path: &Path, request: &GridRequest) -> Result<GridDataset, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_mode_parses_known_tags() {
        assert_eq!("apbs".parse::<AnalysisMode>().unwrap(), AnalysisMode::Apbs);
        assert_eq!(
            "EasyMIFs".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::EasyMifs
        );
    }

    #[test]
    fn analysis_mode_rejects_unknown_tags() {
        assert!("delphi".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn analysis_mode_display_round_trips() {
        for mode in [AnalysisMode::Apbs, AnalysisMode::EasyMifs] {
            assert_eq!(mode.to_string().parse::<AnalysisMode>().unwrap(), mode);
        }
    }
}
