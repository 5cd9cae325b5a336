use crate::core::color::rgb::{ColorParseError, Rgb};
use crate::core::io::traits::AnalysisMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Bin edges must contain at least two values (got {0})")]
    TooFewEdges(usize),

    #[error("Bin edges must be strictly increasing (edge {index} = {value} does not increase)")]
    EdgesNotIncreasing { index: usize, value: f64 },

    #[error("Bin edges must contain an interior 0.0 seam between the negative and positive bins")]
    MissingZeroSeam,

    #[error("Alpha must be within [0, 1] (got {0})")]
    AlphaOutOfRange(f64),

    #[error("Invalid anchor color: {0}")]
    Color(#[from] ColorParseError),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// The fixed, hand-tuned bin edges of the production scale, in kcal/mol.
///
/// Electrostatic energies cluster near zero, so the spacing is 0.05 around
/// the seam and widens to 1, 5, 10 and 50 toward the tails; the +-500
/// sentinels absorb extreme outliers into two catch-all bins. 52 edges define
/// 51 half-open intervals.
pub const DEFAULT_BIN_EDGES: [f64; 52] = [
    -500.0, -50.0, -30.0, -20.0, -17.5, -15.0, -12.5, -10.0, -9.0, -8.0, -7.0, -6.0, -5.0, -4.0,
    -3.0, -2.0, -1.0, -0.8, -0.6, -0.5, -0.4, -0.3, -0.2, -0.1, -0.05, 0.0, 0.05, 0.1, 0.2, 0.3,
    0.4, 0.5, 0.6, 0.8, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.5, 15.0, 17.5,
    20.0, 30.0, 50.0, 500.0,
];

/// Default opacity attached to every annotated point.
pub const DEFAULT_ALPHA: f64 = 0.75;

// #0F00FF -> #ADAFFF and #FFADAD -> #FF0000.
const DEEP_BLUE: Rgb = Rgb::new(15.0 / 255.0, 0.0, 1.0);
const PALE_BLUE: Rgb = Rgb::new(173.0 / 255.0, 175.0 / 255.0, 1.0);
const PALE_RED: Rgb = Rgb::new(1.0, 173.0 / 255.0, 173.0 / 255.0);
const DEEP_RED: Rgb = Rgb::new(1.0, 0.0, 0.0);

/// Immutable inputs of the energy-to-color scale.
///
/// Constructed once at startup and passed explicitly into the binning engine;
/// tests can substitute alternate edge and anchor tables. `Default` yields
/// the production tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    /// Strictly increasing bin edges, sentinel-bounded, with a 0.0 seam.
    pub edges: Vec<f64>,
    /// Anchors of the negative-energy family, darkest first.
    pub negative_anchors: (Rgb, Rgb),
    /// Anchors of the non-negative-energy family, palest first.
    pub positive_anchors: (Rgb, Rgb),
    /// Opacity attached to every annotated point.
    pub alpha: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            edges: DEFAULT_BIN_EDGES.to_vec(),
            negative_anchors: (DEEP_BLUE, PALE_BLUE),
            positive_anchors: (PALE_RED, DEEP_RED),
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// On-disk override format for [`ScaleConfig`], merged over the defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ScaleConfigFile {
    edges: Option<Vec<f64>>,
    negative_anchors: Option<[String; 2]>,
    positive_anchors: Option<[String; 2]>,
    alpha: Option<f64>,
}

impl ScaleConfig {
    /// Loads a TOML override file and merges it over the default tables.
    ///
    /// Anchor colors are given in `#RRGGBB` hex notation. Any field left out
    /// of the file keeps its default.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: ScaleConfigFile =
            toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.display().to_string(),
                source,
            })?;
        Self::default().merged_with(file)
    }

    fn merged_with(mut self, file: ScaleConfigFile) -> Result<Self, ConfigError> {
        if let Some(edges) = file.edges {
            self.edges = edges;
        }
        if let Some([dark, pale]) = file.negative_anchors {
            self.negative_anchors = (dark.parse()?, pale.parse()?);
        }
        if let Some([pale, dark]) = file.positive_anchors {
            self.positive_anchors = (pale.parse()?, dark.parse()?);
        }
        if let Some(alpha) = file.alpha {
            self.alpha = alpha;
        }
        Ok(self)
    }
}

/// Options handed through unchanged to every parser invocation of a batch.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// The analysis-mode tag of the upstream solver.
    pub mode: AnalysisMode,
    /// Number of concurrent parser workers, at least 1.
    pub workers: usize,
    /// Abort a file on its first malformed row instead of skipping the row.
    pub strict: bool,
}

/// Full configuration of one colorize batch.
#[derive(Debug, Clone)]
pub struct ColorizeConfig {
    pub scale: ScaleConfig,
    pub ingest: IngestOptions,
    pub output_dir: PathBuf,
}

#[derive(Default)]
pub struct ColorizeConfigBuilder {
    mode: Option<AnalysisMode>,
    workers: Option<usize>,
    strict: bool,
    scale: Option<ScaleConfig>,
    output_dir: Option<PathBuf>,
}

impl ColorizeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: AnalysisMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn build(self) -> Result<ColorizeConfig, ConfigError> {
        let ingest = IngestOptions {
            mode: self.mode.ok_or(ConfigError::MissingParameter("mode"))?,
            workers: self
                .workers
                .ok_or(ConfigError::MissingParameter("workers"))?
                .max(1),
            strict: self.strict,
        };
        Ok(ColorizeConfig {
            scale: self.scale.unwrap_or_default(),
            ingest,
            output_dir: self
                .output_dir
                .ok_or(ConfigError::MissingParameter("output_dir"))?,
        })
    }
}
