//! Planar point type shared across the crate.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// World coordinates (meters, f32).
///
/// The crate uses a bearing convention: 0° points along +Y, 90° along +X,
/// angles grow clockwise. A sample at bearing `a` and range `r` sits at
/// `(sin(a)·r, cos(a)·r)`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters.
    pub x: f32,
    /// Y coordinate in meters.
    pub y: f32,
}

impl Point2D {
    /// Origin.
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared distance (avoids the sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Magnitude as a vector from the origin.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length; the zero vector stays zero.
    #[inline]
    pub fn normalize(&self) -> Point2D {
        let len = self.length();
        if len > 0.0 {
            Point2D::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Dot product with another point (as vectors).
    #[inline]
    pub fn dot(&self, other: &Point2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn cross(&self, other: &Point2D) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Bearing of this point seen from the origin, degrees in [0, 360).
    #[inline]
    pub fn bearing_deg(&self) -> f32 {
        crate::core::math::normalize_degrees_360(self.x.atan2(self.y).to_degrees())
    }

    /// Rotate around the origin by `theta_deg` in the bearing frame:
    /// a point at bearing `a` moves to bearing `a + theta_deg`.
    #[inline]
    pub fn rotated_deg(&self, theta_deg: f32) -> Point2D {
        let (sin_t, cos_t) = theta_deg.to_radians().sin_cos();
        self.rotated_sin_cos(sin_t, cos_t)
    }

    /// Rotate with a precomputed sine/cosine pair, for loops that apply
    /// the same rotation to many points.
    #[inline]
    pub fn rotated_sin_cos(&self, sin_t: f32, cos_t: f32) -> Point2D {
        Point2D::new(
            self.x * cos_t + self.y * sin_t,
            self.y * cos_t - self.x * sin_t,
        )
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}
