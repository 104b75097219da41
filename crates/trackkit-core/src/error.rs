//! Error handling for TrackKit core types.
//!
//! Provides structured error types for configuration validation and design
//! file persistence. The map generation pipeline defines its own error types
//! on top of these (see `trackkit-mapgen`).
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Errors raised by [`crate::GridConfig::validate`].
///
/// The reference behavior this tool descends from accepted non-positive
/// resolutions and extents and produced nonsensical grids; these variants
/// close that gap before any division happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid resolution must be strictly positive.
    #[error("Resolution must be > 0 m/cell, got {0}")]
    NonPositiveResolution(f64),

    /// Mapped area width must be strictly positive.
    #[error("Real width must be > 0 m, got {0}")]
    NonPositiveWidth(f64),

    /// Mapped area height must be strictly positive.
    #[error("Real height must be > 0 m, got {0}")]
    NonPositiveHeight(f64),

    /// Track edge widths must not be negative.
    #[error("Track width '{name}' must be >= 0 m, got {value}")]
    NegativeTrackWidth {
        /// The offending parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The configured extent is smaller than one cell in some axis.
    #[error("Grid would be empty: {width} x {height} m at {resolution} m/cell")]
    EmptyGrid {
        /// Mapped area width in meters.
        width: f64,
        /// Mapped area height in meters.
        height: f64,
        /// Resolution in meters per cell.
        resolution: f64,
    },
}

/// Errors raised while saving or loading a track design file.
#[derive(Error, Debug)]
pub enum DesignFileError {
    /// The file version is not one this build understands.
    #[error("Unsupported design file version: {0}")]
    UnsupportedVersion(String),

    /// The stored waypoint sequence violates its closed-loop invariant.
    #[error("Malformed design: {0}")]
    Malformed(String),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Unified error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration validation error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Design file error.
    #[error(transparent)]
    DesignFile(#[from] DesignFileError),

    /// Standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
