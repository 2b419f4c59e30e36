//! Pose candidate and search-result types.

use serde::{Deserialize, Serialize};

use crate::core::math::normalize_degrees_360;
use crate::core::types::Point2D;

/// Score reported when an estimator received no samples at all.
/// Distinct from "searched but found no alignment", which scores >= 0.
pub const NO_DATA_SCORE: f32 = -1.0;

/// A candidate alignment of sensor-frame samples onto the floor plan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseEstimate {
    /// Orientation in degrees, [0, 360).
    pub orientation_deg: f32,
    /// Positive scale ratio applied to sample ranges.
    pub scale: f32,
    /// Translation in meters (floor-plan frame).
    pub translation: Point2D,
}

impl PoseEstimate {
    /// Create a pose estimate; orientation is wrapped into [0, 360).
    pub fn new(orientation_deg: f32, scale: f32, translation: Point2D) -> Self {
        Self {
            orientation_deg: normalize_degrees_360(orientation_deg),
            scale,
            translation,
        }
    }

    /// Identity pose: no rotation, unit scale, zero translation.
    pub fn identity() -> Self {
        Self {
            orientation_deg: 0.0,
            scale: 1.0,
            translation: Point2D::ZERO,
        }
    }

    /// Map a sensor-frame point into the floor-plan frame.
    #[inline]
    pub fn transform_point(&self, point: Point2D) -> Point2D {
        self.translation + point.rotated_deg(self.orientation_deg) * self.scale
    }
}

/// Outcome of one pose search, successful or not.
///
/// `estimate` is `None` when no combination scored above zero or the
/// input was empty; `combinations` and `duration_ms` are reported either
/// way. A search abandoned through its cancel token carries
/// `cancelled: true` and must be discarded by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoseSearchResult {
    /// Best alignment found, if any.
    pub estimate: Option<PoseEstimate>,
    /// Score of the best candidate; `NO_DATA_SCORE` for empty input.
    pub score: f32,
    /// Pose combinations evaluated.
    pub combinations: u64,
    /// Wall-clock search time in milliseconds.
    pub duration_ms: u64,
    /// Whether the search was abandoned mid-computation.
    pub cancelled: bool,
}

impl PoseSearchResult {
    /// Result for an empty sample set.
    pub fn no_data(duration_ms: u64) -> Self {
        Self {
            estimate: None,
            score: NO_DATA_SCORE,
            combinations: 0,
            duration_ms,
            cancelled: false,
        }
    }
}
