use super::point::{ColoredPoint, GridPoint};

/// An ordered collection of grid points parsed from one input file.
///
/// The identifier is derived from the source path and names the dataset
/// through the whole pipeline, including the output file derived from it.
/// Datasets are immutable after ingestion; the binning engine consumes them
/// and produces [`ColoredDataset`] counterparts.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDataset {
    /// String identifier derived from the source file path.
    pub id: String,
    /// The ordered point records of the grid.
    pub points: Vec<GridPoint>,
}

impl GridDataset {
    pub fn new(id: impl Into<String>, points: Vec<GridPoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A dataset whose points carry rendering attributes.
///
/// Consumed exactly once by the CSV serializer; no caching or reuse across
/// runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredDataset {
    /// String identifier inherited from the raw dataset.
    pub id: String,
    /// The ordered annotated point records.
    pub points: Vec<ColoredPoint>,
}

impl ColoredDataset {
    pub fn new(id: impl Into<String>, points: Vec<ColoredPoint>) -> Self {
        Self {
            id: id.into(),
            points,
        }
    }
}
