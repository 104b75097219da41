//! Error types for the map generation pipeline.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;
use trackkit_core::ConfigError;

/// Errors raised while fitting a curve through a waypoint sequence.
///
/// Every variant is recoverable: the pipeline reports the run as producing
/// no curve and the caller shows an empty grid instead of crashing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveFitError {
    /// Fewer than two effective points were supplied.
    #[error("Not enough points to fit a curve: {count}")]
    NotEnoughPoints {
        /// Number of effective points supplied.
        count: usize,
    },

    /// Two consecutive points were assigned the same parameter value.
    #[error("Degenerate parametrization at index {index}")]
    DegenerateParameters {
        /// Index of the first of the coincident parameter values.
        index: usize,
    },

    /// A periodic fit was requested but the endpoint values differ.
    #[error("Periodic fit requires identical first and last values")]
    NotPeriodic,

    /// The interpolation system could not be solved.
    #[error("Singular interpolation system")]
    Singular,
}

/// Errors raised while writing map artifacts to disk.
#[derive(Error, Debug)]
pub enum MapWriteError {
    /// The grid has no cells to encode.
    #[error("Cannot save an empty grid")]
    EmptyGrid,

    /// Image encoding failed.
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Unified error type for map generation.
#[derive(Error, Debug)]
pub enum MapGenError {
    /// Curve fitting error.
    #[error(transparent)]
    CurveFit(#[from] CurveFitError),

    /// Configuration validation error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Map artifact write error.
    #[error(transparent)]
    MapWrite(#[from] MapWriteError),
}

/// Result type alias for map generation operations.
pub type MapGenResult<T> = Result<T, MapGenError>;
