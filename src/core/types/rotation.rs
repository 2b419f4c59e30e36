//! One full sweep of the sensor, as exchanged with recording layers.

use serde::{Deserialize, Serialize};

use crate::core::types::{GyroSample, Measurement};

/// An ordered sample set for one full 360° sweep, plus the gyroscope
/// samples captured during it and an optional externally-fixed absolute
/// orientation for that sweep.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Range/bearing samples in sweep order.
    pub measurements: Vec<Measurement>,
    /// Gyroscope samples captured during the sweep (may be empty).
    pub gyro: Vec<GyroSample>,
    /// Absolute orientation fixed by an external source, degrees.
    pub orientation_deg: Option<f32>,
}

impl Rotation {
    /// Sweep with measurements only.
    pub fn from_measurements(measurements: Vec<Measurement>) -> Self {
        Self {
            measurements,
            ..Default::default()
        }
    }

    /// Timestamp of the last gyro sample, if any.
    pub fn last_gyro_timestamp_us(&self) -> Option<u64> {
        self.gyro.last().map(|s| s.timestamp_us)
    }

    /// Whether the sweep carries no data at all.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty() && self.gyro.is_empty() && self.orientation_deg.is_none()
    }
}
