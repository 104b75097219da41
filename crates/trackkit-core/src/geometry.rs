//! 2D geometry primitives in real-world (meter) coordinates.

use serde::{Deserialize, Serialize};

/// A 2D point in real-world coordinates (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A densely sampled parametric curve.
///
/// Samples are ordered by monotonically increasing parameter value. For a
/// curve fitted through a closed waypoint loop the first and last sample
/// coincide exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<Point>,
    closed: bool,
}

impl Curve {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the fitted waypoint sequence formed a loop.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// One closed polygon ring.
///
/// The last vertex implicitly connects back to the first. Rings produced by
/// boundary offsetting are not validated against self-intersection; the
/// rasterizer's fill rule decides what such a ring covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_curve_accessors() {
        let c = Curve::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)], false);
        assert_eq!(c.len(), 2);
        assert!(!c.is_closed());
        assert!(!c.is_empty());
    }
}
