//! Gyroscope integration into an absolute device heading.

use crate::core::math::{normalize_degrees, normalize_radians};
use crate::core::types::{GyroSample, Rotation};

/// Integrates angular-velocity samples into an absolute heading and
/// resynchronizes against externally supplied orientations.
///
/// The heading is held in radians normalized to (-π, π]; degree accessors
/// report [-180, 180). Integration anchors each batch at the tracker's
/// last known timestamp, so sweeps integrate seamlessly across calls.
#[derive(Clone, Debug, Default)]
pub struct OrientationTracker {
    orientation_rad: f32,
    last_timestamp_us: Option<u64>,
}

impl OrientationTracker {
    /// Tracker at heading zero with no timestamp history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current heading in radians, (-π, π].
    #[inline]
    pub fn orientation_rad(&self) -> f32 {
        self.orientation_rad
    }

    /// Current heading in degrees, [-180, 180).
    #[inline]
    pub fn orientation_deg(&self) -> f32 {
        normalize_degrees(self.orientation_rad.to_degrees())
    }

    /// Timestamp of the last sample integrated or applied, if any.
    pub fn last_timestamp_us(&self) -> Option<u64> {
        self.last_timestamp_us
    }

    /// Integrate a batch of gyro samples in order.
    ///
    /// Each sample contributes `angular_velocity_z · Δt` where Δt runs
    /// from the previous timestamp. The first-ever Δt anchors at the
    /// tracker's stored timestamp, else `start_timestamp_us`, else the
    /// first sample itself (which then contributes nothing). Samples that
    /// step backwards in time are skipped. The heading is normalized once
    /// after the batch.
    pub fn integrate(&mut self, samples: &[GyroSample], start_timestamp_us: Option<u64>) {
        if samples.is_empty() {
            return;
        }
        if self.last_timestamp_us.is_none() {
            self.last_timestamp_us = start_timestamp_us;
        }

        for sample in samples {
            let dt = match self.last_timestamp_us {
                Some(last) => {
                    if sample.timestamp_us < last {
                        log::warn!(
                            "Gyro sample goes back in time ({} < {}), skipping",
                            sample.timestamp_us,
                            last
                        );
                        continue;
                    }
                    (sample.timestamp_us - last) as f32 / 1_000_000.0
                }
                None => 0.0,
            };
            self.orientation_rad += sample.angular_velocity_z * dt;
            self.last_timestamp_us = Some(sample.timestamp_us);
        }

        self.orientation_rad = normalize_radians(self.orientation_rad);
    }

    /// Reset the heading to an externally supplied absolute value.
    ///
    /// `last_timestamp_us`, when given, replaces the bookkeeping timestamp
    /// used to anchor the next integration; `None` leaves it untouched.
    pub fn apply(&mut self, orientation_deg: f32, last_timestamp_us: Option<u64>) {
        self.orientation_rad = normalize_radians(orientation_deg.to_radians());
        if last_timestamp_us.is_some() {
            self.last_timestamp_us = last_timestamp_us;
        }
    }

    /// Clear the heading and timestamp history.
    pub fn reset(&mut self) {
        self.orientation_rad = 0.0;
        self.last_timestamp_us = None;
    }

    /// Walk an ordered batch of sweeps, producing the heading at each
    /// sweep's end.
    ///
    /// A sweep with a stored absolute orientation adopts it directly,
    /// resynchronizing any accumulated drift; a sweep with gyro samples
    /// integrates them from the previous sweep's last timestamp; a sweep
    /// with neither inherits the previous heading unchanged.
    pub fn reconcile(&mut self, rotations: &[Rotation]) -> Vec<f32> {
        let mut headings = Vec::with_capacity(rotations.len());
        for rotation in rotations {
            if let Some(fixed) = rotation.orientation_deg {
                self.apply(fixed, rotation.last_gyro_timestamp_us());
            } else if !rotation.gyro.is_empty() {
                self.integrate(&rotation.gyro, None);
            }
            headings.push(self.orientation_deg());
        }
        headings
    }
}
