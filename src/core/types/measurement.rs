//! Raw sensor sample types.

use serde::{Deserialize, Serialize};

use crate::core::types::Point2D;

/// Confidence value assigned to synthetic samples (line resampling).
pub const FULL_CONFIDENCE: u8 = 255;

/// One range/bearing sample from the rotating sensor.
///
/// `angle_deg` is a bearing in [0, 360) (the decoder normalizes it),
/// `distance_mm` the measured range in millimeters, `confidence` the
/// sensor's 0-255 signal quality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Bearing in degrees, [0, 360).
    pub angle_deg: f32,
    /// Range in millimeters.
    pub distance_mm: u32,
    /// Signal quality, 0-255.
    pub confidence: u8,
    /// Capture time in microseconds.
    pub timestamp_us: u64,
}

impl Measurement {
    /// Create a new measurement.
    pub fn new(angle_deg: f32, distance_mm: u32, confidence: u8, timestamp_us: u64) -> Self {
        Self {
            angle_deg,
            distance_mm,
            confidence,
            timestamp_us,
        }
    }

    /// Range in meters.
    #[inline]
    pub fn distance_m(&self) -> f32 {
        self.distance_mm as f32 / 1000.0
    }

    /// Cartesian position in the sensor frame (bearing convention).
    #[inline]
    pub fn to_point(&self) -> Point2D {
        let r = self.distance_m();
        let (sin_a, cos_a) = self.angle_deg.to_radians().sin_cos();
        Point2D::new(sin_a * r, cos_a * r)
    }

    /// Build a synthetic full-confidence measurement from a Cartesian
    /// point, re-deriving bearing and range.
    pub fn from_point(point: Point2D, timestamp_us: u64) -> Self {
        Self {
            angle_deg: point.bearing_deg(),
            distance_mm: (point.length() * 1000.0).round() as u32,
            confidence: FULL_CONFIDENCE,
            timestamp_us,
        }
    }
}

/// One gyroscope reading: angular velocity around the device z axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GyroSample {
    /// Capture time in microseconds.
    pub timestamp_us: u64,
    /// Angular velocity in rad/s, positive counter-clockwise.
    pub angular_velocity_z: f32,
}

impl GyroSample {
    /// Create a new gyro sample.
    pub fn new(timestamp_us: u64, angular_velocity_z: f32) -> Self {
        Self {
            timestamp_us,
            angular_velocity_z,
        }
    }
}
