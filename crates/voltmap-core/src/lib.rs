//! # voltmap Core Library
//!
//! A pipeline library that converts volumetric electrostatic-potential grids
//! (one scalar energy per sampled 3-D point) into color-annotated point tables
//! suitable for downstream 3-D rendering.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers with a strict dependency direction,
//! keeping the pieces independently testable.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`GridDataset`,
//!   `ColoredPoint`), the color arithmetic (`Rgb`, `gradient`), and I/O
//!   utilities (the `GridSource` seam to the external potential solver and the
//!   CSV serializer).
//!
//! - **[`engine`]: The Logic Core.** The immutable energy-to-color scale
//!   (`ColorScale`), the binning engine, and the parallel ingestion driver
//!   that fans a batch of grid files out across a worker pool.
//!
//! - **[`workflows`]: The Public API.** The user-facing entry point that ties
//!   ingestion, binning, and serialization into one batch run.

pub mod core;
pub mod engine;
pub mod workflows;
