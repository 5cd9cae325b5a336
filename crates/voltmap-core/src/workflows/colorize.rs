use crate::core::io::csv;
use crate::core::io::traits::GridSource;
use crate::engine::binning;
use crate::engine::config::ColorizeConfig;
use crate::engine::error::EngineError;
use crate::engine::ingest::{self, SkippedFile};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scale::ColorScale;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Outcome of one batch run.
#[derive(Debug)]
pub struct ColorizeOutcome {
    /// Paths of the CSV tables written, in dataset order.
    pub written: Vec<PathBuf>,
    /// Files excluded because their parse failed.
    pub skipped: Vec<SkippedFile>,
}

/// Runs the full pipeline: parallel ingestion, energy binning, CSV output.
///
/// The color scale is built once up front and shared read-only across the
/// batch. Parse failures are tolerated and reported in the outcome; an
/// out-of-range energy or an unwritable output directory aborts the run.
#[instrument(skip_all, name = "colorize_workflow")]
pub fn run<S>(
    source: &S,
    paths: &[PathBuf],
    config: &ColorizeConfig,
    reporter: &ProgressReporter,
) -> Result<ColorizeOutcome, EngineError>
where
    S: GridSource + Sync,
{
    let scale = ColorScale::build(&config.scale)?;
    info!(
        files = paths.len(),
        bins = scale.bin_count(),
        "Starting colorize workflow."
    );

    let report = ingest::run(source, paths, &config.ingest, reporter)?;
    let colored = binning::bin_and_color(report.datasets, &scale, reporter)?;

    reporter.report(Progress::PhaseStart {
        name: "Serialization",
    });
    let written = csv::write_datasets(&config.output_dir, &colored)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        written = written.len(),
        skipped = report.skipped.len(),
        "Colorize workflow complete."
    );
    Ok(ColorizeOutcome {
        written,
        skipped: report.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::table::TableGridSource;
    use crate::core::io::traits::AnalysisMode;
    use crate::engine::config::ColorizeConfigBuilder;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_table(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    fn config(tmp: &TempDir) -> ColorizeConfig {
        ColorizeConfigBuilder::new()
            .mode(AnalysisMode::Apbs)
            .workers(2)
            .output_dir(tmp.path().join("test_rgb"))
            .build()
            .unwrap()
    }

    #[test]
    fn batch_with_one_unparsable_file_writes_the_other_two() {
        let tmp = TempDir::new().unwrap();
        let paths = vec![
            write_table(&tmp, "a.dat", "0 0 0 -2.5\n1 0 0 0.3\n"),
            write_table(&tmp, "b.dat", "# comments only\n"),
            write_table(&tmp, "c.dat", "0 1 0 42.0\n"),
        ];
        let config = config(&tmp);
        let reporter = ProgressReporter::new();

        let outcome = run(&TableGridSource, &paths, &config, &reporter).unwrap();
        assert_eq!(outcome.written.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(outcome.skipped[0].id.ends_with("b.dat"));
        assert!(config.output_dir.join("a.csv").exists());
        assert!(!config.output_dir.join("b.csv").exists());
        assert!(config.output_dir.join("c.csv").exists());
    }

    #[test]
    fn written_tables_carry_the_stable_header_and_colors() {
        let tmp = TempDir::new().unwrap();
        let paths = vec![write_table(&tmp, "grid.dat", "1 2 3 0\n")];
        let config = config(&tmp);
        let reporter = ProgressReporter::new();

        run(&TableGridSource, &paths, &config, &reporter).unwrap();
        let content = fs::read_to_string(config.output_dir.join("grid.csv")).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("x,y,z,energy,r,g,b,alpha"));
        // energy 0 sits in the seam bin: palest red #FFADAD at alpha 0.75.
        let row = lines.next().unwrap();
        assert_eq!(
            row,
            format!(
                "1,2,3,0,1,{},{},0.75",
                173.0 / 255.0,
                173.0 / 255.0
            )
        );
    }

    #[test]
    fn out_of_range_energy_aborts_the_whole_run() {
        let tmp = TempDir::new().unwrap();
        let paths = vec![write_table(&tmp, "hot.dat", "0 0 0 1200.0\n")];
        let config = config(&tmp);
        let reporter = ProgressReporter::new();

        let result = run(&TableGridSource, &paths, &config, &reporter);
        assert!(matches!(
            result,
            Err(EngineError::EnergyOutOfRange { energy, .. }) if energy == 1200.0
        ));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn rerunning_the_same_batch_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let paths = vec![write_table(&tmp, "grid.dat", "0 0 0 -7.5\n0 0 1 16.0\n")];
        let config = config(&tmp);
        let reporter = ProgressReporter::new();

        run(&TableGridSource, &paths, &config, &reporter).unwrap();
        let before = fs::read(config.output_dir.join("grid.csv")).unwrap();
        run(&TableGridSource, &paths, &config, &reporter).unwrap();
        let after = fs::read(config.output_dir.join("grid.csv")).unwrap();
        assert_eq!(before, after);
    }
}
