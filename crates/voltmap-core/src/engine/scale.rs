use crate::core::color::gradient::gradient;
use crate::core::color::rgb::Rgb;
use crate::engine::config::{ConfigError, ScaleConfig};

/// The immutable energy-to-color lookup table of a batch.
///
/// Pairs `edges.len() - 1` half-open bins `[edge[i], edge[i + 1])` with one
/// color each: a blue gradient (dark to pale) over the bins below the 0.0
/// seam, a red gradient (pale to dark) over the bins at or above it. Built
/// once per batch and shared read-only across all workers.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    edges: Vec<f64>,
    colors: Vec<Rgb>,
    alpha: f64,
}

impl ColorScale {
    /// Builds the scale from a configuration, validating its tables.
    ///
    /// The two gradients share their pale seam color. The negative family is
    /// generated one entry long and sliced back so the seam entry is dropped
    /// deliberately; the bin starting at 0.0 therefore takes the positive
    /// family's palest color.
    ///
    /// # Errors
    ///
    /// Returns an error if the edges are not strictly increasing, lack an
    /// interior 0.0 seam, or the alpha is out of range.
    pub fn build(config: &ScaleConfig) -> Result<Self, ConfigError> {
        let seam = validate_edges(&config.edges)?;
        if !(0.0..=1.0).contains(&config.alpha) {
            return Err(ConfigError::AlphaOutOfRange(config.alpha));
        }

        let negative_bins = seam;
        let positive_bins = config.edges.len() - 1 - seam;

        let (deep_blue, pale_blue) = config.negative_anchors;
        let (pale_red, deep_red) = config.positive_anchors;

        let mut colors = Vec::with_capacity(negative_bins + positive_bins);
        colors.extend_from_slice(&gradient(deep_blue, pale_blue, negative_bins)[..negative_bins]);
        colors.extend(gradient(pale_red, deep_red, positive_bins - 1));
        debug_assert_eq!(config.edges.len(), colors.len() + 1);

        Ok(Self {
            edges: config.edges.clone(),
            colors,
            alpha: config.alpha,
        })
    }

    /// Number of bins, always `edges().len() - 1`.
    pub fn bin_count(&self) -> usize {
        self.colors.len()
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Locates the bin index `i` with `edges[i] <= energy < edges[i + 1]`.
    ///
    /// Values equal to an interior edge fall into the bin starting at that
    /// edge. Returns `None` for energies outside the sentinel-bounded range
    /// (including NaN); callers decide how loudly to fail.
    pub fn bin_index(&self, energy: f64) -> Option<usize> {
        let idx = self.edges.partition_point(|&edge| edge <= energy);
        if idx == 0 || idx == self.edges.len() {
            None
        } else {
            Some(idx - 1)
        }
    }

    /// Resolves the color of the bin covering `energy`.
    pub fn color_for(&self, energy: f64) -> Option<Rgb> {
        self.bin_index(energy).map(|i| self.colors[i])
    }
}

fn validate_edges(edges: &[f64]) -> Result<usize, ConfigError> {
    if edges.len() < 2 {
        return Err(ConfigError::TooFewEdges(edges.len()));
    }
    for (index, pair) in edges.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(ConfigError::EdgesNotIncreasing {
                index: index + 1,
                value: pair[1],
            });
        }
    }
    match edges.iter().position(|&edge| edge == 0.0) {
        Some(seam) if seam > 0 && seam < edges.len() - 1 => Ok(seam),
        _ => Err(ConfigError::MissingZeroSeam),
    }
}
