//! # TrackKit Map Generation
//!
//! The stateless pipeline that turns a track centerline into a persisted
//! occupancy-grid map:
//!
//! - **Spline fitting**: smooth parametric curve through the waypoints
//!   (natural boundary for open tracks, periodic for closed loops), with a
//!   selectable cubic or Akima interpolant
//! - **Boundary offsetting**: left/right track edges and the wall inset
//!   ring derived from the curve normals
//! - **Rasterization**: even-odd scan conversion of the track and inset
//!   polygons into a binary occupancy grid
//! - **Map export**: grayscale PNG plus the metadata descriptor used by
//!   navigation-stack map loaders
//!
//! The pipeline holds no state between runs; every input change recomputes
//! the grid from scratch.

pub mod error;
pub mod map_writer;
pub mod offset;
pub mod pipeline;
pub mod raster;
pub mod spline;

pub use error::{CurveFitError, MapGenError, MapGenResult, MapWriteError};
pub use map_writer::{grid_to_image, MapSerializer, SavedMap, FREE_PIXEL, WALL_PIXEL};
pub use offset::BoundaryOffsetter;
pub use pipeline::MapPipeline;
pub use raster::GridRasterizer;
pub use spline::{fit_axis, AxisSpline, CurveFitter, SplineKind, CURVE_SAMPLES};
