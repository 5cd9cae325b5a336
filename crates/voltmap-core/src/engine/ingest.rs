use crate::core::io::traits::{GridRequest, GridSource};
use crate::core::models::dataset::GridDataset;
use crate::engine::config::IngestOptions;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// A file excluded from the batch, with the reason it was skipped.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub id: String,
    pub reason: String,
}

/// Result of one parallel ingestion pass.
#[derive(Debug)]
pub struct IngestReport {
    /// Successfully parsed datasets, in submission order.
    pub datasets: Vec<GridDataset>,
    /// Files whose parse failed; they do not abort the batch.
    pub skipped: Vec<SkippedFile>,
}

/// Fans the batch of grid files out across a worker pool.
///
/// Each path becomes one work unit handed to `source` together with the
/// batch request; the pool joins before returning. Every unit carries its own
/// identifier, so result-to-source association never depends on completion
/// order. A single file's failure is logged and recorded as a skip.
#[instrument(skip_all, name = "ingest_task")]
pub fn run<S>(
    source: &S,
    paths: &[PathBuf],
    options: &IngestOptions,
    reporter: &ProgressReporter,
) -> Result<IngestReport, EngineError>
where
    S: GridSource + Sync,
{
    info!(
        files = paths.len(),
        workers = options.workers,
        mode = %options.mode,
        "Starting parallel grid ingestion."
    );
    reporter.report(Progress::PhaseStart { name: "Ingestion" });
    reporter.report(Progress::BatchStart {
        total_files: paths.len() as u64,
    });

    let request = GridRequest {
        mode: options.mode,
        strict: options.strict,
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers.max(1))
        .build()
        .map_err(|e| {
            EngineError::Initialization(format!("Failed to build ingestion thread pool: {e}"))
        })?;

    let results: Vec<(String, Result<GridDataset, S::Error>)> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let id = path.to_string_lossy().into_owned();
                let result = source.read_grid(path, &request);
                reporter.report(Progress::FileDone);
                (id, result)
            })
            .collect()
    });

    reporter.report(Progress::BatchFinish);

    let mut datasets = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for (id, result) in results {
        match result {
            Ok(dataset) => datasets.push(dataset),
            Err(e) => {
                warn!(id = %id, error = %e, "Grid file failed to parse; excluding it from the batch.");
                skipped.push(SkippedFile {
                    id,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        parsed = datasets.len(),
        skipped = skipped.len(),
        "Ingestion finished."
    );
    reporter.report(Progress::PhaseFinish);
    Ok(IngestReport { datasets, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::traits::AnalysisMode;
    use crate::core::models::point::GridPoint;
    use nalgebra::Point3;
    use std::path::Path;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("unreadable grid")]
    struct StubError;

    /// Fails every path whose file name starts with "bad".
    struct StubSource;

    impl GridSource for StubSource {
        type Error = StubError;

        fn read_grid(
            &self,
            path: &Path,
            request: &GridRequest,
        ) -> Result<GridDataset, StubError> {
            assert_eq!(request.mode, AnalysisMode::EasyMifs);
            let name = path.file_name().unwrap().to_string_lossy();
            if name.starts_with("bad") {
                return Err(StubError);
            }
            Ok(GridDataset::new(
                path.to_string_lossy(),
                vec![GridPoint::new(Point3::origin(), 1.0)],
            ))
        }
    }

    fn options(workers: usize) -> IngestOptions {
        IngestOptions {
            mode: AnalysisMode::EasyMifs,
            workers,
            strict: false,
        }
    }

    #[test]
    fn one_failing_file_does_not_abort_the_batch() {
        let paths = vec![
            PathBuf::from("grids/a.dat"),
            PathBuf::from("grids/bad.dat"),
            PathBuf::from("grids/c.dat"),
        ];
        let reporter = ProgressReporter::new();

        let report = run(&StubSource, &paths, &options(2), &reporter).unwrap();
        assert_eq!(report.datasets.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id, "grids/bad.dat");
        assert_eq!(report.skipped[0].reason, "unreadable grid");
    }

    #[test]
    fn results_are_reassociated_with_their_source_identifiers() {
        let paths: Vec<PathBuf> = (0..16)
            .map(|i| PathBuf::from(format!("grids/grid_{i:02}.dat")))
            .collect();
        let reporter = ProgressReporter::new();

        let report = run(&StubSource, &paths, &options(8), &reporter).unwrap();
        let ids: Vec<&str> = report.datasets.iter().map(|d| d.id.as_str()).collect();
        let expected: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn a_single_worker_processes_the_whole_batch() {
        let paths = vec![PathBuf::from("grids/a.dat"), PathBuf::from("grids/b.dat")];
        let reporter = ProgressReporter::new();

        let report = run(&StubSource, &paths, &options(1), &reporter).unwrap();
        assert_eq!(report.datasets.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn an_empty_batch_yields_an_empty_report() {
        let reporter = ProgressReporter::new();
        let report = run(&StubSource, &[], &options(4), &reporter).unwrap();
        assert!(report.datasets.is_empty());
        assert!(report.skipped.is_empty());
    }
}
