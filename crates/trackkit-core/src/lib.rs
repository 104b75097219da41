//! # TrackKit Core
//!
//! Core types and utilities shared by the TrackKit crates:
//!
//! - **Geometry**: 2D points, sampled curves, and polygon rings in
//!   real-world (meter) coordinates
//! - **Track model**: the ordered waypoint sequence describing a track
//!   centerline, with the editing operations that keep its closed-loop
//!   invariant intact
//! - **Grid**: the binary occupancy grid produced by the map pipeline
//! - **Configuration**: grid resolution, extent, and track width parameters
//!   with validation
//! - **Design files**: JSON persistence for a track design (waypoints plus
//!   grid configuration)
//! - **Errors**: structured error types used across the workspace
//!
//! All error types use `thiserror` for ergonomic error handling.

pub mod config;
pub mod design;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod track;

pub use config::GridConfig;
pub use design::{DesignMetadata, TrackDesign};
pub use error::{ConfigError, DesignFileError, Error, Result};
pub use geometry::{Curve, Point, Polygon};
pub use grid::{Cell, OccupancyGrid};
pub use track::{AddOutcome, WaypointSequence, SNAP_RADIUS};
