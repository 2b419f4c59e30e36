//! Runtime estimator selection.
//!
//! [`DynEstimator`] wraps both pose-search strategies behind one `estimate`
//! call so applications can pick the algorithm from configuration or a
//! command-line flag.

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::localization::{
    CancelToken, GridSearchConfig, GridSearchEstimator, ParticleFilterConfig,
    ParticleFilterEstimator,
};
use crate::algorithms::mapping::OccupancyGrid;
use crate::core::types::{Measurement, PoseEstimate, PoseSearchResult};

/// Available pose-search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorType {
    /// Exhaustive orientation/scale/translation sweep.
    ///
    /// Deterministic and prior-aware; cost grows with plan area.
    Exhaustive,

    /// Monte Carlo particle filter.
    ///
    /// Cost bounded by particle count; needs a random generator and
    /// ignores priors.
    Particle,
}

impl std::fmt::Display for EstimatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatorType::Exhaustive => write!(f, "Exhaustive"),
            EstimatorType::Particle => write!(f, "Particle"),
        }
    }
}

/// Configuration for all estimator types.
///
/// Only the field matching the selected [`EstimatorType`] is used.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DynEstimatorConfig {
    /// Configuration for the exhaustive sweep.
    pub grid_search: GridSearchConfig,

    /// Configuration for the particle filter.
    pub particle_filter: ParticleFilterConfig,
}

/// Runtime-selectable pose estimator.
#[derive(Clone, Debug)]
pub enum DynEstimator {
    /// Exhaustive lattice sweep.
    Exhaustive(GridSearchEstimator),
    /// Monte Carlo particle filter.
    Particle(ParticleFilterEstimator),
}

impl DynEstimator {
    /// Create an estimator of the selected type.
    pub fn new(kind: EstimatorType, config: DynEstimatorConfig) -> Self {
        match kind {
            EstimatorType::Exhaustive => {
                DynEstimator::Exhaustive(GridSearchEstimator::new(config.grid_search))
            }
            EstimatorType::Particle => {
                DynEstimator::Particle(ParticleFilterEstimator::new(config.particle_filter))
            }
        }
    }

    /// Run one search.
    ///
    /// The exhaustive branch uses `prior` to narrow its orientation window;
    /// the particle branch draws from `rng`. Each branch ignores the
    /// argument the other needs.
    pub fn estimate<R: Rng>(
        &self,
        samples: &[Measurement],
        grid: &OccupancyGrid,
        prior: Option<&PoseEstimate>,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> PoseSearchResult {
        match self {
            DynEstimator::Exhaustive(e) => e.estimate(samples, grid, prior, cancel),
            DynEstimator::Particle(e) => e.estimate(samples, grid, rng, cancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point2D;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square_room() -> OccupancyGrid {
        let plan = [
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 4.0),
        ];
        OccupancyGrid::from_polygon(&plan, 0.5).unwrap()
    }

    fn ring_samples(radius_mm: u32, count: usize) -> Vec<Measurement> {
        (0..count)
            .map(|i| Measurement::new(i as f32 * 360.0 / count as f32, radius_mm, 200, 0))
            .collect()
    }

    #[test]
    fn test_estimator_type_display() {
        assert_eq!(format!("{}", EstimatorType::Exhaustive), "Exhaustive");
        assert_eq!(format!("{}", EstimatorType::Particle), "Particle");
    }

    #[test]
    fn test_both_variants_localize() {
        let grid = square_room();
        let samples = ring_samples(1000, 12);
        let config = DynEstimatorConfig {
            grid_search: GridSearchConfig {
                orientation_step_deg: 15.0,
                scale_min: 1.0,
                scale_max: 1.0,
                ..Default::default()
            },
            particle_filter: ParticleFilterConfig {
                particle_count: 200,
                iterations: 5,
                ..Default::default()
            },
        };

        for kind in [EstimatorType::Exhaustive, EstimatorType::Particle] {
            let estimator = DynEstimator::new(kind, config.clone());
            let mut rng = StdRng::seed_from_u64(42);
            let result = estimator.estimate(&samples, &grid, None, &mut rng, &CancelToken::new());
            assert!(
                result.estimate.is_some(),
                "{kind} should place the ring inside the room"
            );
            assert!(result.score > 0.0, "{kind} score");
        }
    }
}
