use crate::core::io::traits::{GridRequest, GridSource};
use crate::core::models::dataset::GridDataset;
use crate::core::models::point::GridPoint;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Represents errors that can occur while reading a point table.
#[derive(Debug, Error)]
pub enum TableReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed row on line {line}: expected 'x y z energy', got '{content}'")]
    MalformedRow { line: usize, content: String },
    #[error("Table contains no usable energy rows")]
    Empty,
}

/// Reads the pre-extracted point tables emitted by the solver toolchain.
///
/// One point per line, whitespace-separated `x y z energy`; blank lines and
/// lines starting with `#` are ignored. Parsing of the solvers' native
/// volumetric grid formats is out of scope for this crate, so this reader is
/// the stock [`GridSource`] for tables that have already been flattened to
/// point records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableGridSource;

impl GridSource for TableGridSource {
    type Error = TableReadError;

    fn read_grid(&self, path: &Path, request: &GridRequest) -> Result<GridDataset, TableReadError> {
        debug!(path = %path.display(), mode = %request.mode, "Reading point table.");
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut points = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let row = line.trim();
            if row.is_empty() || row.starts_with('#') {
                continue;
            }

            match parse_row(row) {
                Some(point) => points.push(point),
                None if request.strict => {
                    return Err(TableReadError::MalformedRow {
                        line: line_num,
                        content: row.to_string(),
                    });
                }
                None => warn!(path = %path.display(), line = line_num, "Skipping malformed row."),
            }
        }

        if points.is_empty() {
            return Err(TableReadError::Empty);
        }
        Ok(GridDataset::new(path.to_string_lossy(), points))
    }
}

fn parse_row(row: &str) -> Option<GridPoint> {
    let mut fields = row.split_whitespace();
    let x: f64 = fields.next()?.parse().ok()?;
    let y: f64 = fields.next()?.parse().ok()?;
    let z: f64 = fields.next()?.parse().ok()?;
    let energy: f64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(GridPoint::new(Point3::new(x, y, z), energy))
}
