mod cli;
mod error;
mod logging;
mod progress;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use voltmap::core::io::table::TableGridSource;
use voltmap::core::io::traits::AnalysisMode;
use voltmap::engine::config::{ColorizeConfigBuilder, ScaleConfig};
use voltmap::engine::progress::ProgressReporter;
use voltmap::workflows::colorize;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("voltmap v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let mode = cli
        .analysis
        .parse::<AnalysisMode>()
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let workers = cli.cores.unwrap_or_else(default_workers).max(1);

    let scale = match &cli.scale_config {
        Some(path) => {
            info!("Loading scale overrides from {:?}.", path);
            ScaleConfig::from_file(path)?
        }
        None => ScaleConfig::default(),
    };

    let paths = collect_inputs(&cli.input, &cli.extension)?;
    info!(files = paths.len(), workers, "Collected input tables.");

    let config = ColorizeConfigBuilder::new()
        .mode(mode)
        .workers(workers)
        .strict(cli.strict)
        .scale(scale)
        .output_dir(cli.output.clone())
        .build()?;

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let outcome = colorize::run(&TableGridSource, &paths, &config, &reporter)?;

    println!(
        "Wrote {} color table(s) to {}.",
        outcome.written.len(),
        cli.output.display()
    );
    if !outcome.skipped.is_empty() {
        warn!(count = outcome.skipped.len(), "Some files were skipped.");
        println!("Skipped {} file(s) that failed to parse:", outcome.skipped.len());
        for skip in &outcome.skipped {
            println!("  {}: {}", skip.id, skip.reason);
        }
    }
    Ok(())
}

fn default_workers() -> usize {
    num_cpus::get().saturating_sub(2).max(1)
}

/// Collects the batch: every file in `dir` with the given extension, sorted
/// by name so runs are deterministic.
fn collect_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(CliError::NoInputs {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    Ok(paths)
}
