//! Incremental least-squares line fitting.

use crate::core::types::Point2D;

/// Running least-squares accumulator over a growing point set.
///
/// Tracks the sums of an ordinary y-on-x regression so cluster growth can
/// test each candidate point against the current fit in O(1) without
/// revisiting earlier points.
#[derive(Clone, Debug, Default)]
pub struct LineFit {
    n: f32,
    sum_x: f32,
    sum_y: f32,
    sum_xx: f32,
    sum_xy: f32,
}

impl LineFit {
    /// Create an empty fit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one point.
    #[inline]
    pub fn add(&mut self, p: &Point2D) {
        self.n += 1.0;
        self.sum_x += p.x;
        self.sum_y += p.y;
        self.sum_xx += p.x * p.x;
        self.sum_xy += p.x * p.y;
    }

    /// Number of accumulated points.
    #[inline]
    pub fn len(&self) -> usize {
        self.n as usize
    }

    /// True if no points have been accumulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0.0
    }

    /// Regression slope dy/dx. Non-finite for a vertical point set.
    pub fn slope(&self) -> f32 {
        (self.n * self.sum_xy - self.sum_x * self.sum_y)
            / (self.n * self.sum_xx - self.sum_x * self.sum_x)
    }

    /// Mean of the accumulated points. The regression line passes
    /// through it.
    pub fn centroid(&self) -> Point2D {
        Point2D::new(self.sum_x / self.n, self.sum_y / self.n)
    }

    /// Unit direction of the fitted line, or `None` when the slope is
    /// non-finite (near-vertical data needs the secant fallback).
    pub fn direction(&self) -> Option<Point2D> {
        let slope = self.slope();
        if slope.is_finite() {
            Some(Point2D::new(1.0, slope).normalize())
        } else {
            None
        }
    }

    /// Perpendicular distance from `p` to the current regression line.
    ///
    /// Zero while fewer than two points are accumulated; a single point
    /// does not define a line to deviate from.
    pub fn distance_to(&self, p: &Point2D) -> f32 {
        if self.n < 2.0 {
            return 0.0;
        }
        let denom = self.n * self.sum_xx - self.sum_x * self.sum_x;
        if denom.abs() < f32::EPSILON {
            // Vertical point set: deviation is the horizontal offset
            // from the shared x.
            return (p.x - self.sum_x / self.n).abs();
        }
        let slope = (self.n * self.sum_xy - self.sum_x * self.sum_y) / denom;
        let intercept = (self.sum_y - slope * self.sum_x) / self.n;
        (slope * p.x - p.y + intercept).abs() / (slope * slope + 1.0).sqrt()
    }
}

/// Project `points` onto `direction` through `anchor` and return the two
/// extreme projections as segment endpoints.
pub(super) fn span_along(
    anchor: &Point2D,
    direction: &Point2D,
    points: &[Point2D],
) -> (Point2D, Point2D) {
    let mut t_min = f32::MAX;
    let mut t_max = f32::MIN;
    for p in points {
        let t = (*p - *anchor).dot(direction);
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }
    (*anchor + *direction * t_min, *anchor + *direction * t_max)
}
