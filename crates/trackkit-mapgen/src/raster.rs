//! Polygon scan conversion into the occupancy grid.
//!
//! Vertices in meters map to cell coordinates by dividing by the grid
//! resolution and truncating toward zero. A cell belongs to a polygon when
//! its center lies inside the ring under the even-odd rule, so
//! self-intersecting rings (an inverted wall inset, a figure-eight track)
//! rasterize deterministically instead of failing.

use tracing::debug;
use trackkit_core::{Cell, GridConfig, OccupancyGrid, Polygon};

/// Scan-converts polygons into an occupancy grid.
#[derive(Debug, Clone, Copy)]
pub struct GridRasterizer {
    resolution: f64,
}

impl GridRasterizer {
    pub fn new(resolution: f64) -> Self {
        Self { resolution }
    }

    /// Rasterize the track outline and its wall inset into a fresh grid.
    ///
    /// Two passes: every cell inside the track polygon becomes [`Cell::Wall`],
    /// then every cell inside the inset polygon reverts to [`Cell::Free`].
    /// What remains walled is the boundary band between the two rings. Cells
    /// outside the track stay free — this tool does not mark off-track space
    /// as impassable.
    pub fn rasterize(
        &self,
        config: &GridConfig,
        track: &Polygon,
        wall_inset: &Polygon,
    ) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(config.grid_width(), config.grid_height());
        self.fill(&mut grid, track, Cell::Wall);
        self.fill(&mut grid, wall_inset, Cell::Free);
        debug!(
            "rasterized {}x{} grid, {} wall cells",
            grid.width(),
            grid.height(),
            grid.wall_count()
        );
        grid
    }

    /// Mark every cell whose center falls inside `polygon` with `value`.
    pub fn fill(&self, grid: &mut OccupancyGrid, polygon: &Polygon, value: Cell) {
        if polygon.len() < 3 || grid.is_empty() {
            return;
        }

        // Vertex (x, y) in meters -> cell (x / resolution, y / resolution),
        // truncated toward zero. Cell centers then sit at half-integer
        // coordinates, so no scanline ever passes exactly through a vertex.
        let cells: Vec<(f64, f64)> = polygon
            .vertices()
            .iter()
            .map(|p| ((p.x / self.resolution).trunc(), (p.y / self.resolution).trunc()))
            .collect();

        let width = grid.width() as i64;
        let mut crossings: Vec<f64> = Vec::new();
        for row in 0..grid.height() {
            let yc = row as f64 + 0.5;
            crossings.clear();
            for i in 0..cells.len() {
                let (x0, y0) = cells[i];
                let (x1, y1) = cells[(i + 1) % cells.len()];
                if (y0 <= yc) != (y1 <= yc) {
                    crossings.push(x0 + (yc - y0) * (x1 - x0) / (y1 - y0));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                // Cells whose center c + 0.5 lies in [span[0], span[1]).
                let start = (span[0] - 0.5).ceil() as i64;
                let end = (span[1] - 0.5).ceil() as i64;
                for col in start.max(0)..end.min(width) {
                    grid.set(col as usize, row, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackkit_core::Point;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    fn config(resolution: f64, w: f64, h: f64) -> GridConfig {
        GridConfig {
            resolution,
            real_width: w,
            real_height: h,
            ..Default::default()
        }
    }

    #[test]
    fn test_rectangle_fill_count() {
        let cfg = config(1.0, 10.0, 5.0);
        let raster = GridRasterizer::new(cfg.resolution);
        let mut grid = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        raster.fill(&mut grid, &rect(0.0, 0.0, 10.0, 5.0), Cell::Wall);
        assert_eq!(grid.wall_count(), 50);
    }

    #[test]
    fn test_sub_cell_resolution() {
        let cfg = config(0.5, 10.0, 5.0);
        let raster = GridRasterizer::new(cfg.resolution);
        let mut grid = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        raster.fill(&mut grid, &rect(1.0, 1.0, 3.0, 2.0), Cell::Wall);
        // 2 m x 1 m at 0.5 m/cell: 4 x 2 cells.
        assert_eq!(grid.wall_count(), 8);
        assert_eq!(grid.get(2, 2), Some(Cell::Wall));
        assert_eq!(grid.get(1, 2), Some(Cell::Free));
    }

    #[test]
    fn test_two_pass_carve() {
        let cfg = config(1.0, 10.0, 10.0);
        let raster = GridRasterizer::new(cfg.resolution);
        let mut grid = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        raster.fill(&mut grid, &rect(0.0, 0.0, 10.0, 10.0), Cell::Wall);
        raster.fill(&mut grid, &rect(2.0, 2.0, 8.0, 8.0), Cell::Free);
        // 100 outer minus the 36-cell carved interior.
        assert_eq!(grid.wall_count(), 64);
        assert_eq!(grid.get(5, 5), Some(Cell::Free));
        assert_eq!(grid.get(0, 0), Some(Cell::Wall));
        assert_eq!(grid.get(1, 5), Some(Cell::Wall));
    }

    #[test]
    fn test_annulus_ring_via_even_odd() {
        // Outer and inner rectangles stitched into one ring, the way the
        // boundary offsetter emits track outlines: even-odd leaves the hole.
        let cfg = config(1.0, 12.0, 12.0);
        let ring = Polygon::new(vec![
            Point::new(1.0, 1.0),
            Point::new(11.0, 1.0),
            Point::new(11.0, 11.0),
            Point::new(1.0, 11.0),
            Point::new(1.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(9.0, 3.0),
            Point::new(9.0, 9.0),
            Point::new(3.0, 9.0),
            Point::new(3.0, 3.0),
        ]);
        let raster = GridRasterizer::new(cfg.resolution);
        let mut grid = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        raster.fill(&mut grid, &ring, Cell::Wall);
        assert_eq!(grid.get(6, 6), Some(Cell::Free), "hole stays free");
        assert_eq!(grid.get(2, 6), Some(Cell::Wall), "band is wall");
        assert_eq!(grid.get(0, 6), Some(Cell::Free), "outside stays free");
        // 10x10 outer minus 6x6 hole.
        assert_eq!(grid.wall_count(), 64);
    }

    #[test]
    fn test_polygon_clipped_to_grid() {
        let cfg = config(1.0, 5.0, 5.0);
        let raster = GridRasterizer::new(cfg.resolution);
        let mut grid = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        raster.fill(&mut grid, &rect(-10.0, -10.0, 20.0, 20.0), Cell::Wall);
        assert_eq!(grid.wall_count(), 25);
    }

    #[test]
    fn test_degenerate_polygon_is_noop() {
        let cfg = config(1.0, 5.0, 5.0);
        let raster = GridRasterizer::new(cfg.resolution);
        let mut grid = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        // A ring that is a doubled line segment: crossings cancel in pairs.
        let line = Polygon::new(vec![
            Point::new(0.0, 2.0),
            Point::new(5.0, 2.0),
            Point::new(5.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        raster.fill(&mut grid, &line, Cell::Wall);
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let cfg = config(1.0, 5.0, 5.0);
        let raster = GridRasterizer::new(cfg.resolution);
        let mut grid = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        // Vertices at 0.9 truncate to cell 0: the rectangle collapses to a
        // zero-area ring and marks nothing.
        raster.fill(&mut grid, &rect(0.1, 0.1, 0.9, 0.9), Cell::Wall);
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_deterministic() {
        let cfg = config(0.25, 20.0, 20.0);
        let raster = GridRasterizer::new(cfg.resolution);
        let poly = Polygon::new(vec![
            Point::new(2.0, 1.0),
            Point::new(18.0, 3.0),
            Point::new(10.0, 17.0),
        ]);
        let mut a = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        let mut b = OccupancyGrid::new(cfg.grid_width(), cfg.grid_height());
        raster.fill(&mut a, &poly, Cell::Wall);
        raster.fill(&mut b, &poly, Cell::Wall);
        assert_eq!(a, b);
    }
}
