use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "voltmap - converts electrostatic-potential grids into color-annotated point tables for 3-D rendering.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Directory containing the grid point tables to colorize.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Analysis mode of the upstream potential solver ('apbs' or 'easymifs').
    #[arg(short, long, value_name = "MODE", default_value = "apbs")]
    pub analysis: String,

    /// File extension of the input tables.
    #[arg(short = 'e', long, value_name = "EXT", default_value = "dat")]
    pub extension: String,

    /// Output directory for the color tables.
    #[arg(short, long, value_name = "DIR", default_value = "test_rgb")]
    pub output: PathBuf,

    /// Number of parser workers. Defaults to the logical core count minus two.
    #[arg(short = 'c', long, value_name = "NUM")]
    pub cores: Option<usize>,

    /// Abort a file on its first malformed row instead of skipping the row.
    #[arg(long)]
    pub strict: bool,

    /// Path to a TOML file overriding the bin edges and anchor colors.
    #[arg(long, value_name = "PATH")]
    pub scale_config: Option<PathBuf>,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_invocation_uses_defaults() {
        let cli = Cli::parse_from(["voltmap", "--input", "grids"]);
        assert_eq!(cli.input, PathBuf::from("grids"));
        assert_eq!(cli.analysis, "apbs");
        assert_eq!(cli.extension, "dat");
        assert_eq!(cli.output, PathBuf::from("test_rgb"));
        assert_eq!(cli.cores, None);
        assert!(!cli.strict);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["voltmap", "--input", "grids", "-q", "-v"]);
        assert!(result.is_err());
    }
}
