use crate::core::models::dataset::ColoredDataset;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Column order of every emitted table. Downstream consumers key on these
/// names, so the order and spelling are stable across runs.
pub const CSV_HEADER: [&str; 8] = ["x", "y", "z", "energy", "r", "g", "b", "alpha"];

/// Represents errors that can occur while serializing color tables.
#[derive(Debug, Error)]
pub enum CsvWriteError {
    #[error("Failed to create output directory '{path}': {source}", path = path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("Failed to write '{path}': {source}", path = path.display())]
    Write {
        path: PathBuf,
        source: ::csv::Error,
    },
    #[error("Identifier '{0}' has no file name component")]
    BadIdentifier(String),
}

/// Derives the output path for a dataset identifier.
///
/// Takes the final path component of the identifier, strips the source
/// extension, and appends `.csv`.
pub fn output_path(output_dir: &Path, id: &str) -> Result<PathBuf, CsvWriteError> {
    let stem = Path::new(id)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CsvWriteError::BadIdentifier(id.to_string()))?;
    Ok(output_dir.join(format!("{stem}.csv")))
}

/// Writes one CSV per dataset into `output_dir`.
///
/// The directory is created if absent; an existing file at a target path is
/// overwritten without warning (last-writer-wins). Returns the written paths
/// in dataset order. On failure the files already written are left in place.
pub fn write_datasets(
    output_dir: &Path,
    datasets: &[ColoredDataset],
) -> Result<Vec<PathBuf>, CsvWriteError> {
    fs::create_dir_all(output_dir).map_err(|source| CsvWriteError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        let path = output_path(output_dir, &dataset.id)?;
        write_dataset(&path, dataset)?;
        debug!(path = %path.display(), points = dataset.points.len(), "Wrote color table.");
        written.push(path);
    }
    Ok(written)
}

fn write_dataset(path: &Path, dataset: &ColoredDataset) -> Result<(), CsvWriteError> {
    let wrap = |source: ::csv::Error| CsvWriteError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = ::csv::Writer::from_path(path).map_err(wrap)?;
    writer.write_record(CSV_HEADER).map_err(wrap)?;
    for point in &dataset.points {
        writer
            .write_record([
                point.position.x.to_string(),
                point.position.y.to_string(),
                point.position.z.to_string(),
                point.energy.to_string(),
                point.color.r.to_string(),
                point.color.g.to_string(),
                point.color.b.to_string(),
                point.alpha.to_string(),
            ])
            .map_err(wrap)?;
    }
    writer.flush().map_err(|e| wrap(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::rgb::Rgb;
    use crate::core::models::point::ColoredPoint;
    use nalgebra::Point3;
    use tempfile::TempDir;

    fn sample_dataset(id: &str) -> ColoredDataset {
        ColoredDataset::new(
            id,
            vec![
                ColoredPoint {
                    position: Point3::new(0.0, 0.5, 1.0),
                    energy: -1.25,
                    color: Rgb::new(15.0 / 255.0, 0.0, 1.0),
                    alpha: 0.75,
                },
                ColoredPoint {
                    position: Point3::new(1.0, 1.5, 2.0),
                    energy: 0.0,
                    color: Rgb::new(1.0, 173.0 / 255.0, 173.0 / 255.0),
                    alpha: 0.75,
                },
            ],
        )
    }

    #[test]
    fn output_path_strips_the_source_extension() {
        let path = output_path(Path::new("test_rgb"), "/data/mifs/protein_a.dat").unwrap();
        assert_eq!(path, Path::new("test_rgb").join("protein_a.csv"));
    }

    #[test]
    fn output_path_rejects_identifiers_without_file_name() {
        let result = output_path(Path::new("test_rgb"), "/");
        assert!(matches!(result, Err(CsvWriteError::BadIdentifier(_))));
    }

    #[test]
    fn writes_header_and_one_row_per_point() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("test_rgb");

        let written = write_datasets(&out_dir, &[sample_dataset("grid_b.dat")]).unwrap();
        assert_eq!(written, vec![out_dir.join("grid_b.csv")]);

        let content = fs::read_to_string(&written[0]).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("x,y,z,energy,r,g,b,alpha"));
        assert_eq!(
            lines.next(),
            Some("0,0.5,1,-1.25,0.058823529411764705,0,1,0.75")
        );
        assert_eq!(lines.clone().count(), 1);
    }

    #[test]
    fn creating_the_output_directory_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("test_rgb");

        write_datasets(&out_dir, &[sample_dataset("a.dat")]).unwrap();
        write_datasets(&out_dir, &[sample_dataset("b.dat")]).unwrap();
        assert!(out_dir.join("a.csv").exists());
        assert!(out_dir.join("b.csv").exists());
    }

    #[test]
    fn rewriting_a_dataset_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("test_rgb");
        let dataset = sample_dataset("grid.dat");

        let first = write_datasets(&out_dir, std::slice::from_ref(&dataset)).unwrap();
        let before = fs::read(&first[0]).unwrap();
        let second = write_datasets(&out_dir, std::slice::from_ref(&dataset)).unwrap();
        let after = fs::read(&second[0]).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn existing_files_are_overwritten() {
        let tmp = TempDir::new().unwrap();
        let out_dir = tmp.path().join("test_rgb");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("grid.csv"), "stale contents").unwrap();

        write_datasets(&out_dir, &[sample_dataset("grid.dat")]).unwrap();
        let content = fs::read_to_string(out_dir.join("grid.csv")).unwrap();
        assert!(content.starts_with("x,y,z,energy"));
    }
}
