use crate::core::models::dataset::{ColoredDataset, GridDataset};
use crate::core::models::point::{ColoredPoint, GridPoint};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scale::ColorScale;
use tracing::{info, instrument};

/// Maps every point of every dataset onto its bin color.
///
/// Consumes the raw datasets and returns annotated counterparts in the same
/// order; coordinates and energies pass through unchanged and the bin index
/// itself is discarded. An energy outside the sentinel-bounded edge range
/// aborts the whole batch with [`EngineError::EnergyOutOfRange`] rather than
/// clamping or dropping the record.
#[instrument(skip_all, name = "binning_task")]
pub fn bin_and_color(
    datasets: Vec<GridDataset>,
    scale: &ColorScale,
    reporter: &ProgressReporter,
) -> Result<Vec<ColoredDataset>, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Binning" });
    reporter.report(Progress::BatchStart {
        total_files: datasets.len() as u64,
    });

    let mut colored = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        colored.push(colorize_dataset(dataset, scale)?);
        reporter.report(Progress::FileDone);
    }

    reporter.report(Progress::BatchFinish);
    info!(datasets = colored.len(), "Binning finished.");
    reporter.report(Progress::PhaseFinish);
    Ok(colored)
}

fn colorize_dataset(
    dataset: GridDataset,
    scale: &ColorScale,
) -> Result<ColoredDataset, EngineError> {
    let GridDataset { id, points } = dataset;
    let mut colored = Vec::with_capacity(points.len());
    for (index, point) in points.into_iter().enumerate() {
        let annotated = colorize_point(&point, scale).ok_or_else(|| {
            EngineError::EnergyOutOfRange {
                dataset: id.clone(),
                index,
                energy: point.energy,
            }
        })?;
        colored.push(annotated);
    }
    Ok(ColoredDataset { id, points: colored })
}

/// Named-field transformation from a raw point to its annotated counterpart.
fn colorize_point(point: &GridPoint, scale: &ColorScale) -> Option<ColoredPoint> {
    let color = scale.color_for(point.energy)?;
    Some(ColoredPoint {
        position: point.position,
        energy: point.energy,
        color,
        alpha: scale.alpha(),
    })
}
