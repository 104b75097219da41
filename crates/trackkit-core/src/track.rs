//! The track centerline model: an ordered waypoint sequence.
//!
//! The editor owns a [`WaypointSequence`] value and mutates it through the
//! operations below; every change hands an immutable snapshot to the
//! stateless map pipeline. The type maintains the closed-loop invariant:
//! a closed sequence has at least four entries, the last entry is an exact
//! duplicate of the first, and at least three distinct points precede the
//! duplicate.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Snap distance for closing the loop, in meters. A new point placed within
/// this radius of the first point closes the track instead of extending it.
pub const SNAP_RADIUS: f64 = 1.0;

/// Result of [`WaypointSequence::push_snapped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The point was appended to the open sequence.
    Added,
    /// The point snapped onto the first waypoint and closed the loop.
    Closed,
    /// The sequence is already closed; the point was discarded.
    Ignored,
}

/// An ordered list of user-placed waypoints plus a closed flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointSequence {
    points: Vec<Point>,
    closed: bool,
}

impl WaypointSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from raw parts. The closed-loop invariant is the
    /// caller's responsibility; see [`WaypointSequence::is_well_formed`].
    pub fn from_parts(points: Vec<Point>, closed: bool) -> Self {
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

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Checks the closed-loop invariant.
    pub fn is_well_formed(&self) -> bool {
        if !self.closed {
            return true;
        }
        self.points.len() >= 4 && self.points.first() == self.points.last()
    }

    /// Append a waypoint. Discarded when the loop is already closed.
    pub fn push(&mut self, p: Point) {
        if self.closed {
            return;
        }
        self.points.push(p);
    }

    /// Append a waypoint with snap-to-close: once three or more points are
    /// committed, a point within [`SNAP_RADIUS`] of the first point snaps
    /// onto it and closes the loop by appending the explicit duplicate.
    pub fn push_snapped(&mut self, p: Point) -> AddOutcome {
        if self.closed {
            return AddOutcome::Ignored;
        }
        if self.points.len() >= 3 {
            let first = self.points[0];
            if p.distance_to(&first) < SNAP_RADIUS {
                self.points.push(first);
                self.closed = true;
                return AddOutcome::Closed;
            }
        }
        self.points.push(p);
        AddOutcome::Added
    }

    /// Remove the most recent waypoint. Removing the closing duplicate
    /// reopens the loop.
    pub fn pop(&mut self) -> Option<Point> {
        let p = self.points.pop();
        if self.closed {
            self.closed = false;
        }
        p
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.closed = false;
    }

    /// The points the curve fitter should see: the committed sequence plus a
    /// live preview point, when one is present and the loop is still open.
    pub fn points_with_preview(&self, preview: Option<Point>) -> Vec<Point> {
        let mut pts = self.points.clone();
        if !self.closed {
            if let Some(p) = preview {
                pts.push(p);
            }
        }
        pts
    }

    /// Snap a candidate preview point onto the first waypoint when it is
    /// within closing range, mirroring what a committed point would do.
    pub fn snap_preview(&self, p: Point) -> Point {
        if !self.closed && self.points.len() >= 3 {
            let first = self.points[0];
            if p.distance_to(&first) < SNAP_RADIUS {
                return first;
            }
        }
        p
    }
}
