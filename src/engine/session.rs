//! Per-device localization pipeline state.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::algorithms::extraction::{
    as_measurements, filter_adaptive, AdaptiveFilterConfig, LineDetector, LineDetectorConfig,
};
use crate::algorithms::localization::{CancelToken, DynEstimator, DynEstimatorConfig, EstimatorType};
use crate::algorithms::mapping::OccupancyGrid;
use crate::core::types::{Point2D, PoseEstimate, PoseSearchResult, Rotation};
use crate::engine::orientation::OrientationTracker;
use crate::engine::position::{PositionFilter, DEFAULT_SMOOTHING_ALPHA};
use crate::sensors::{MeasurementFilter, MeasurementFilterConfig};

/// Configuration for a [`LocalizationSession`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sample quality filter applied to every sweep.
    pub filter: MeasurementFilterConfig,
    /// Line extraction; `None` feeds filtered samples straight to the
    /// estimator.
    pub detector: Option<LineDetectorConfig>,
    /// Adaptive line filtering, used only when a detector is set.
    pub adaptive: AdaptiveFilterConfig,
    /// Which pose estimator to run.
    pub estimator: EstimatorType,
    /// Per-estimator settings.
    pub estimator_config: DynEstimatorConfig,
    /// Position smoothing factor in (0, 1].
    pub smoothing_alpha: f32,
    /// RNG seed; 0 seeds from OS entropy.
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            filter: MeasurementFilterConfig::default(),
            detector: None,
            adaptive: AdaptiveFilterConfig::default(),
            estimator: EstimatorType::Exhaustive,
            estimator_config: DynEstimatorConfig::default(),
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            seed: 0,
        }
    }
}

/// Everything one sweep produced: the raw search result plus the
/// session's smoothed position and integrated heading afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// Unsmoothed estimator output.
    pub raw: PoseSearchResult,
    /// Smoothed position, carried over from earlier sweeps when this
    /// one produced no estimate.
    pub position: Option<Point2D>,
    /// Heading after folding in this sweep's orientation data, degrees
    /// in [-180, 180).
    pub orientation_deg: f32,
}

/// Stateful pipeline from raw sweeps to a smoothed pose.
///
/// Each sweep runs quality filtering, optional line extraction, and the
/// configured estimator against the floor plan, then folds the outcome
/// into the running orientation and position state. Successful estimates
/// become the prior for the next sweep, narrowing the exhaustive
/// estimator's orientation window.
pub struct LocalizationSession {
    grid: Arc<OccupancyGrid>,
    filter: MeasurementFilter,
    detector: Option<LineDetector>,
    adaptive: AdaptiveFilterConfig,
    estimator: DynEstimator,
    orientation: OrientationTracker,
    position: PositionFilter,
    last_estimate: Option<PoseEstimate>,
    rng: StdRng,
}

impl LocalizationSession {
    /// Create a session over the given floor plan.
    pub fn new(grid: Arc<OccupancyGrid>, config: SessionConfig) -> Self {
        let rng = if config.seed == 0 {
            StdRng::from_os_rng()
        } else {
            StdRng::seed_from_u64(config.seed)
        };
        Self {
            grid,
            filter: MeasurementFilter::new(config.filter),
            detector: config.detector.map(LineDetector::new),
            adaptive: config.adaptive,
            estimator: DynEstimator::new(config.estimator, config.estimator_config),
            orientation: OrientationTracker::new(),
            position: PositionFilter::new(config.smoothing_alpha),
            last_estimate: None,
            rng,
        }
    }

    /// Floor plan this session localizes against.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Last adopted estimate, used as the prior for the next sweep.
    pub fn last_estimate(&self) -> Option<PoseEstimate> {
        self.last_estimate
    }

    /// Process one sweep to completion.
    pub fn process_rotation(&mut self, rotation: &Rotation) -> SweepOutcome {
        self.process_rotation_with_cancel(rotation, &CancelToken::new())
    }

    /// Process one sweep, abandoning the pose search if `cancel` fires.
    ///
    /// Orientation data is folded in before the search so the heading
    /// stays current even for cancelled or empty sweeps. A cancelled
    /// search's partial estimate is not adopted into session state.
    pub fn process_rotation_with_cancel(
        &mut self,
        rotation: &Rotation,
        cancel: &CancelToken,
    ) -> SweepOutcome {
        if let Some(fixed) = rotation.orientation_deg {
            self.orientation.apply(fixed, rotation.last_gyro_timestamp_us());
        } else if !rotation.gyro.is_empty() {
            self.orientation.integrate(&rotation.gyro, None);
        }

        let filtered = self.filter.apply(&rotation.measurements);
        let samples = match &self.detector {
            Some(detector) => {
                let lines = detector.detect(&filtered, &mut self.rng);
                let result = filter_adaptive(lines, &self.adaptive);
                let timestamp = filtered.first().map(|m| m.timestamp_us).unwrap_or(0);
                as_measurements(&result.lines, timestamp)
            }
            None => filtered,
        };

        let raw = self.estimator.estimate(
            &samples,
            &self.grid,
            self.last_estimate.as_ref(),
            &mut self.rng,
            cancel,
        );

        let position = match raw.estimate {
            Some(est) if !raw.cancelled => {
                self.last_estimate = Some(est);
                Some(self.position.update(est.translation))
            }
            _ => self.position.value(),
        };

        log::debug!(
            "Sweep: {} samples, score {:.1}, {} combinations in {} ms",
            samples.len(),
            raw.score,
            raw.combinations,
            raw.duration_ms
        );

        SweepOutcome {
            raw,
            position,
            orientation_deg: self.orientation.orientation_deg(),
        }
    }

    /// Drop all accumulated state; the next sweep searches from scratch.
    pub fn reset(&mut self) {
        self.orientation.reset();
        self.position.reset();
        self.last_estimate = None;
    }
}
