//! The full map generation pipeline.
//!
//! Stateless: every invocation fits the curve, offsets the edges, and
//! rasterizes from scratch. Nothing is cached between runs, so the caller
//! can re-run it on every waypoint or parameter change and always sees a
//! grid that matches the current inputs.

use tracing::{debug, warn};
use trackkit_core::{GridConfig, OccupancyGrid, Point, WaypointSequence};

use crate::error::{CurveFitError, MapGenResult};
use crate::offset::BoundaryOffsetter;
use crate::raster::GridRasterizer;
use crate::spline::{CurveFitter, SplineKind};

/// Chains curve fitting, boundary offsetting, and rasterization.
#[derive(Debug, Clone, Default)]
pub struct MapPipeline {
    fitter: CurveFitter,
}

impl MapPipeline {
    pub fn new(kind: SplineKind) -> Self {
        Self {
            fitter: CurveFitter::new(kind),
        }
    }

    /// Generate the occupancy grid for the committed waypoints.
    ///
    /// Returns `Ok(None)` when no curve exists yet (too few points, or a
    /// degenerate fit): the caller shows an empty grid and carries on. An
    /// invalid configuration is a real error.
    pub fn generate(
        &self,
        track: &WaypointSequence,
        config: &GridConfig,
    ) -> MapGenResult<Option<OccupancyGrid>> {
        self.generate_with_preview(track, config, None)
    }

    /// Generate with a live preview point appended to an open sequence.
    pub fn generate_with_preview(
        &self,
        track: &WaypointSequence,
        config: &GridConfig,
        preview: Option<Point>,
    ) -> MapGenResult<Option<OccupancyGrid>> {
        config.validate()?;

        let curve = match self.fitter.fit_with_preview(track, preview) {
            Ok(curve) => curve,
            Err(CurveFitError::NotEnoughPoints { count }) => {
                debug!("no curve yet ({count} points)");
                return Ok(None);
            }
            Err(err) => {
                warn!("Spline fit failed: {err}");
                return Ok(None);
            }
        };

        let offsetter = BoundaryOffsetter::from_config(config);
        let track_polygon = offsetter.track_polygon(&curve);
        let wall_polygon = offsetter.wall_polygon(&curve);
        debug!(
            "fitted {} samples (closed: {}), track ring {} vertices",
            curve.len(),
            curve.is_closed(),
            track_polygon.len()
        );

        let rasterizer = GridRasterizer::new(config.resolution);
        Ok(Some(rasterizer.rasterize(config, &track_polygon, &wall_polygon)))
    }
}
