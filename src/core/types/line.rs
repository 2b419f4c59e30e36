//! Straight-line feature extracted from a sweep.

use serde::{Deserialize, Serialize};

use crate::core::math::normalize_orientation_180;
use crate::core::types::Point2D;

/// A detected line segment.
///
/// Lines are undirected: `orientation_deg` is normalized to [0, 180),
/// where 0° runs along +Y and 90° along +X (bearing frame).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineFeature {
    /// Segment start.
    pub start: Point2D,
    /// Segment end.
    pub end: Point2D,
    /// Undirected orientation in degrees, [0, 180).
    pub orientation_deg: f32,
    /// Number of samples supporting this line.
    pub point_count: usize,
}

impl LineFeature {
    /// Build a line feature from its endpoints; orientation is derived
    /// from the segment direction.
    pub fn new(start: Point2D, end: Point2D, point_count: usize) -> Self {
        let d = end - start;
        let orientation_deg = normalize_orientation_180(d.x.atan2(d.y).to_degrees());
        Self {
            start,
            end,
            orientation_deg,
            point_count,
        }
    }

    /// Segment length in meters.
    #[inline]
    pub fn length(&self) -> f32 {
        self.start.distance(&self.end)
    }

    /// Unit direction from start to end; zero for a degenerate segment.
    pub fn direction(&self) -> Point2D {
        (self.end - self.start).normalize()
    }

    /// Perpendicular distance from a point to the infinite line through
    /// this segment. Falls back to point-to-start distance when the
    /// segment is degenerate.
    pub fn distance_to_point(&self, point: &Point2D) -> f32 {
        let d = self.end - self.start;
        let len_sq = d.dot(&d);
        if len_sq < f32::EPSILON {
            return self.start.distance(point);
        }
        let rel = *point - self.start;
        d.cross(&rel).abs() / len_sq.sqrt()
    }

    /// Point at parameter `t` along the segment (`t` in [0, 1]).
    #[inline]
    pub fn point_at(&self, t: f32) -> Point2D {
        self.start + (self.end - self.start) * t
    }
}
