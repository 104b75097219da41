//! # TrackKit
//!
//! A racetrack designer backend: converts user-placed 2D waypoints
//! describing a track centerline into a binary occupancy grid and saves it
//! as a navigation-stack map (grayscale PNG plus metadata descriptor).
//!
//! ## Architecture
//!
//! TrackKit is organized as a workspace:
//!
//! 1. **trackkit-core** - waypoint/track model, grid configuration,
//!    occupancy grid, design files, errors
//! 2. **trackkit-mapgen** - the stateless pipeline: spline fitting,
//!    boundary offsetting, rasterization, map export
//! 3. **trackkit** - command-line binary that loads a track design and
//!    writes the map artifacts

pub use trackkit_core::{
    AddOutcome, Cell, ConfigError, Curve, DesignFileError, DesignMetadata, Error, GridConfig,
    OccupancyGrid, Point, Polygon, Result, TrackDesign, WaypointSequence, SNAP_RADIUS,
};

pub use trackkit_mapgen::{
    grid_to_image, BoundaryOffsetter, CurveFitError, CurveFitter, GridRasterizer, MapGenError,
    MapGenResult, MapPipeline, MapSerializer, MapWriteError, SavedMap, SplineKind, CURVE_SAMPLES,
    FREE_PIXEL, WALL_PIXEL,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output, `RUST_LOG` environment
/// variable support, and INFO as the default level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
