//! Boundary offsetting: track edges and the wall inset ring.
//!
//! Tangents come from the central-difference gradient of the sampled curve
//! (one-sided at the ends), normals are the tangents rotated a quarter turn,
//! and each edge is the centerline displaced along the normal by the
//! configured width. The track polygon is the left edge followed by the
//! right edge in reverse, forming one closed ring.

use trackkit_core::{Curve, GridConfig, Point, Polygon};

/// Threshold below which a tangent counts as zero-length.
const TANGENT_EPS: f64 = 1e-12;

/// Derives track-edge and wall-inset polygons from a sampled curve.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryOffsetter {
    left_width: f64,
    right_width: f64,
    boundary_width: f64,
}

impl BoundaryOffsetter {
    pub fn new(left_width: f64, right_width: f64, boundary_width: f64) -> Self {
        Self {
            left_width,
            right_width,
            boundary_width,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.left_width, config.right_width, config.boundary_width)
    }

    /// The full track outline: centerline offset by the left and right
    /// widths.
    pub fn track_polygon(&self, curve: &Curve) -> Polygon {
        offset_ring(curve, self.left_width, self.right_width)
    }

    /// The drivable interior: the track outline shrunk by the boundary
    /// width on each side. With `boundary_width` above the smaller track
    /// width the inset widths go negative and the ring turns inside out;
    /// the rasterizer's fill rule decides what such a ring covers.
    pub fn wall_polygon(&self, curve: &Curve) -> Polygon {
        offset_ring(
            curve,
            self.left_width - self.boundary_width,
            self.right_width - self.boundary_width,
        )
    }
}

/// Offset the curve by `left` to one side and `right` to the other and
/// stitch the two edges into a single closed ring.
fn offset_ring(curve: &Curve, left: f64, right: f64) -> Polygon {
    let points = curve.points();
    if points.len() < 2 {
        return Polygon::default();
    }

    let tangents = unit_tangents(points);
    let mut ring = Vec::with_capacity(2 * points.len());
    // left(t) = curve(t) - normal(t) * left, with normal = (-dy, dx)
    for (p, (tx, ty)) in points.iter().zip(&tangents) {
        ring.push(Point::new(p.x + ty * left, p.y - tx * left));
    }
    for (p, (tx, ty)) in points.iter().zip(&tangents).rev() {
        ring.push(Point::new(p.x - ty * right, p.y + tx * right));
    }
    Polygon::new(ring)
}

/// Unit tangents by central differences, one-sided at the ends.
///
/// Zero-length differences (coincident consecutive samples) reuse the
/// nearest well-defined direction instead of producing NaN normals.
fn unit_tangents(points: &[Point]) -> Vec<(f64, f64)> {
    let n = points.len();
    let mut tangents = Vec::with_capacity(n);
    for i in 0..n {
        let (dx, dy) = if i == 0 {
            (points[1].x - points[0].x, points[1].y - points[0].y)
        } else if i == n - 1 {
            (
                points[n - 1].x - points[n - 2].x,
                points[n - 1].y - points[n - 2].y,
            )
        } else {
            (
                (points[i + 1].x - points[i - 1].x) / 2.0,
                (points[i + 1].y - points[i - 1].y) / 2.0,
            )
        };
        let norm = dx.hypot(dy);
        if norm > TANGENT_EPS {
            tangents.push((dx / norm, dy / norm));
        } else {
            tangents.push(tangents.last().copied().unwrap_or((f64::NAN, f64::NAN)));
        }
    }
    // Leading degenerate entries take the first well-defined direction.
    if let Some(first_valid) = tangents.iter().position(|(tx, _)| tx.is_finite()) {
        for i in 0..first_valid {
            tangents[i] = tangents[first_valid];
        }
    } else {
        // Every sample coincides; pick an arbitrary fixed direction.
        for t in &mut tangents {
            *t = (1.0, 0.0);
        }
    }
    tangents
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_curve() -> Curve {
        // Along +x from (0, 0) to (10, 0).
        let points = (0..=10).map(|i| Point::new(i as f64, 0.0)).collect();
        Curve::new(points, false)
    }

    #[test]
    fn test_straight_offsets_exact_distance() {
        let curve = straight_curve();
        let offsetter = BoundaryOffsetter::new(2.0, 3.0, 0.0);
        let ring = offsetter.track_polygon(&curve);
        let n = curve.len();
        assert_eq!(ring.len(), 2 * n);

        // Tangent (1, 0), normal (0, 1): left edge at y = -2, right at y = 3.
        for (i, p) in curve.points().iter().enumerate() {
            let left = ring.vertices()[i];
            let right = ring.vertices()[2 * n - 1 - i];
            assert!((left.y - (-2.0)).abs() < 1e-12);
            assert!((right.y - 3.0).abs() < 1e-12);
            assert!((left.x - p.x).abs() < 1e-12);
            assert!((right.x - p.x).abs() < 1e-12);
            assert!((left.distance_to(p) - 2.0).abs() < 1e-12);
            assert!((right.distance_to(p) - 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_right_edge_reversed() {
        let curve = straight_curve();
        let ring = BoundaryOffsetter::new(1.0, 1.0, 0.0).track_polygon(&curve);
        let n = curve.len();
        // Last left vertex connects to the right-edge vertex under the same
        // curve sample: the seam at the far end of the track.
        assert!((ring.vertices()[n - 1].x - 10.0).abs() < 1e-12);
        assert!((ring.vertices()[n].x - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_wall_polygon_shrinks_widths() {
        let curve = straight_curve();
        let offsetter = BoundaryOffsetter::new(2.0, 2.0, 0.5);
        let inset = offsetter.wall_polygon(&curve);
        for v in inset.vertices() {
            assert!((v.y.abs() - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_inset_inverts_when_boundary_exceeds_width() {
        let curve = straight_curve();
        let offsetter = BoundaryOffsetter::new(1.0, 1.0, 2.0);
        let inset = offsetter.wall_polygon(&curve);
        // Negative inset widths flip the edges to the opposite sides.
        assert!((inset.vertices()[0].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_short_curve_yields_empty_polygon() {
        let curve = Curve::new(vec![Point::new(0.0, 0.0)], false);
        let ring = BoundaryOffsetter::new(1.0, 1.0, 0.1).track_polygon(&curve);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_coincident_samples_do_not_produce_nan() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let ring = BoundaryOffsetter::new(1.0, 1.0, 0.0).track_polygon(&Curve::new(points, false));
        for v in ring.vertices() {
            assert!(v.x.is_finite() && v.y.is_finite());
        }
    }

    #[test]
    fn test_closed_curve_ring_is_finite_everywhere() {
        let n = 32;
        let points: Vec<Point> = (0..=n)
            .map(|i| {
                let a = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                Point::new(10.0 + 5.0 * a.cos(), 10.0 + 5.0 * a.sin())
            })
            .collect();
        let curve = Curve::new(points, true);
        let ring = BoundaryOffsetter::new(1.0, 1.0, 0.2).track_polygon(&curve);
        assert_eq!(ring.len(), 2 * curve.len());
        // Circle of radius 5 offset by 1: edges at radii 4 and 6.
        for (i, v) in ring.vertices().iter().enumerate() {
            let r = ((v.x - 10.0).powi(2) + (v.y - 10.0).powi(2)).sqrt();
            if i < curve.len() {
                assert!((r - 6.0).abs() < 0.05, "left vertex {i} at radius {r}");
            } else {
                assert!((r - 4.0).abs() < 0.05, "right vertex {i} at radius {r}");
            }
        }
    }
}
