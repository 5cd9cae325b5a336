use crate::core::color::rgb::Rgb;
use nalgebra::Point3;

/// Represents one sampled point of a volumetric potential grid.
///
/// A point is the smallest unit of work in the pipeline: the external solver
/// produces one scalar energy per spatial sample, and the binning engine maps
/// that energy onto a discrete color category.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    /// The Cartesian coordinates of the sample in the solver's frame.
    pub position: Point3<f64>,
    /// The electrostatic potential energy at this sample, in kcal/mol.
    pub energy: f64,
}

impl GridPoint {
    pub fn new(position: Point3<f64>, energy: f64) -> Self {
        Self { position, energy }
    }
}

/// A grid point annotated with its per-point rendering attributes.
///
/// Produced from a [`GridPoint`] by the binning engine through an explicit
/// named-field transformation; the spatial coordinates and the energy pass
/// through unchanged, and the intermediate bin index is not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredPoint {
    /// The Cartesian coordinates of the sample, unchanged from the raw point.
    pub position: Point3<f64>,
    /// The energy of the sample, unchanged from the raw point.
    pub energy: f64,
    /// The color of the bin covering this point's energy.
    pub color: Rgb,
    /// The opacity attribute, constant across a batch.
    pub alpha: f64,
}
