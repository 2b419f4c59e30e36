//! Exhaustive pose search over a fixed candidate lattice.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::algorithms::localization::CancelToken;
use crate::algorithms::mapping::OccupancyGrid;
use crate::core::math::normalize_degrees_360;
use crate::core::types::{Measurement, Point2D, PoseEstimate, PoseSearchResult};

/// Configuration for [`GridSearchEstimator`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSearchConfig {
    /// Orientation step in degrees.
    /// Default: 2.0
    pub orientation_step_deg: f32,

    /// Width of the orientation window searched around a prior estimate,
    /// in degrees. Without a prior the full circle is swept.
    /// Default: 30.0
    pub orientation_span_deg: f32,

    /// Smallest scale candidate.
    /// Default: 0.9
    pub scale_min: f32,

    /// Largest scale candidate.
    /// Default: 1.1
    pub scale_max: f32,

    /// Scale step between candidates.
    /// Default: 0.05
    pub scale_step: f32,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            orientation_step_deg: 2.0,
            orientation_span_deg: 30.0,
            scale_min: 0.9,
            scale_max: 1.1,
            scale_step: 0.05,
        }
    }
}

/// Brute-force pose search.
///
/// Sweeps orientation, then scale, then translation over a lattice spaced
/// by the grid's cell size, counting how many transformed samples land on
/// occupied cells. Deterministic: equal scores keep the earliest candidate
/// in sweep order, so repeated runs return the same pose.
#[derive(Clone, Debug)]
pub struct GridSearchEstimator {
    config: GridSearchConfig,
}

impl GridSearchEstimator {
    /// Create an estimator with the given configuration.
    pub fn new(config: GridSearchConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &GridSearchConfig {
        &self.config
    }

    /// Search for the pose aligning `samples` onto `grid`.
    ///
    /// A `prior` narrows the orientation sweep to a window of
    /// `orientation_span_deg` centered on the prior's orientation; scale
    /// and translation are always swept in full. The token is polled once
    /// per orientation step; a cancelled search returns its partial best
    /// with `cancelled: true`.
    pub fn estimate(
        &self,
        samples: &[Measurement],
        grid: &OccupancyGrid,
        prior: Option<&PoseEstimate>,
        cancel: &CancelToken,
    ) -> PoseSearchResult {
        let started = Instant::now();
        if samples.is_empty() {
            return PoseSearchResult::no_data(started.elapsed().as_millis() as u64);
        }

        let offsets: Vec<Point2D> = samples.iter().map(Measurement::to_point).collect();

        // Guard against a zero step looping forever.
        let step = self.config.orientation_step_deg.max(0.01);
        let (first, orientation_count) = match prior {
            Some(p) => {
                let span = self.config.orientation_span_deg.max(0.0);
                let count = (span / step).floor() as usize + 1;
                (p.orientation_deg - span / 2.0, count)
            }
            None => (0.0, (360.0 / step).ceil() as usize),
        };

        let scale_step = self.config.scale_step.max(0.001);
        let scale_count =
            ((self.config.scale_max - self.config.scale_min) / scale_step).floor() as usize + 1;

        let origin = grid.origin();
        let cell = grid.cell_size();

        let mut best: Option<PoseEstimate> = None;
        let mut best_score = 0u32;
        let mut combinations = 0u64;
        let mut cancelled = false;

        'sweep: for oi in 0..orientation_count {
            if cancel.is_cancelled() {
                cancelled = true;
                break 'sweep;
            }
            let orientation = normalize_degrees_360(first + oi as f32 * step);
            let (sin_t, cos_t) = orientation.to_radians().sin_cos();
            let rotated: Vec<Point2D> = offsets
                .iter()
                .map(|o| o.rotated_sin_cos(sin_t, cos_t))
                .collect();

            for si in 0..scale_count {
                let scale = self.config.scale_min + si as f32 * scale_step;
                for iy in 0..=grid.height() {
                    let ty = origin.y + iy as f32 * cell;
                    for ix in 0..=grid.width() {
                        let tx = origin.x + ix as f32 * cell;
                        combinations += 1;

                        let mut score = 0u32;
                        for p in &rotated {
                            if grid.is_occupied(tx + p.x * scale, ty + p.y * scale) {
                                score += 1;
                            }
                        }
                        // Strictly greater: ties keep the earliest candidate.
                        if score > best_score {
                            best_score = score;
                            best = Some(PoseEstimate::new(
                                orientation,
                                scale,
                                Point2D::new(tx, ty),
                            ));
                        }
                    }
                }
            }
        }

        PoseSearchResult {
            estimate: best,
            score: best_score as f32,
            combinations,
            duration_ms: started.elapsed().as_millis() as u64,
            cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::NO_DATA_SCORE;

    fn square_room() -> OccupancyGrid {
        let plan = [
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 4.0),
            Point2D::new(0.0, 4.0),
        ];
        OccupancyGrid::from_polygon(&plan, 0.5).unwrap()
    }

    fn rect_room() -> OccupancyGrid {
        let plan = [
            Point2D::new(0.0, 0.0),
            Point2D::new(8.0, 0.0),
            Point2D::new(8.0, 6.0),
            Point2D::new(0.0, 6.0),
        ];
        OccupancyGrid::from_polygon(&plan, 0.5).unwrap()
    }

    /// Perimeter of the rectangle (0,0)-(w,h), pulled `inset` inward.
    fn rect_interior_points(w: f32, h: f32, inset: f32, spacing: f32) -> Vec<Point2D> {
        let mut pts = Vec::new();
        let nx = ((w - 2.0 * inset) / spacing) as usize;
        for i in 0..=nx {
            let x = inset + i as f32 * spacing;
            pts.push(Point2D::new(x, inset));
            pts.push(Point2D::new(x, h - inset));
        }
        let ny = ((h - 2.0 * inset) / spacing) as usize;
        for j in 1..ny {
            let y = inset + j as f32 * spacing;
            pts.push(Point2D::new(inset, y));
            pts.push(Point2D::new(w - inset, y));
        }
        pts
    }

    /// What a sensor at `pose` would measure for the given world points.
    fn sensor_view(walls: &[Point2D], pose: &PoseEstimate) -> Vec<Measurement> {
        walls
            .iter()
            .map(|w| {
                let local = (*w - pose.translation) * (1.0 / pose.scale);
                Measurement::from_point(local.rotated_deg(-pose.orientation_deg), 0)
            })
            .collect()
    }

    /// Ring of sensor offsets around the origin.
    fn ring_samples(radius_mm: u32, count: usize) -> Vec<Measurement> {
        (0..count)
            .map(|i| Measurement::new(i as f32 * 360.0 / count as f32, radius_mm, 200, 0))
            .collect()
    }

    #[test]
    fn test_empty_samples_report_no_data() {
        let grid = square_room();
        let estimator = GridSearchEstimator::new(GridSearchConfig::default());
        let result = estimator.estimate(&[], &grid, None, &CancelToken::new());
        assert!(result.estimate.is_none());
        assert_eq!(result.score, NO_DATA_SCORE);
        assert_eq!(result.combinations, 0);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_recovers_pose_in_rectangle() {
        let grid = rect_room();
        let truth = PoseEstimate::new(30.0, 1.0, Point2D::new(4.0, 3.0));
        let walls = rect_interior_points(8.0, 6.0, 0.2, 0.5);
        let samples = sensor_view(&walls, &truth);

        let estimator = GridSearchEstimator::new(GridSearchConfig {
            orientation_step_deg: 5.0,
            ..Default::default()
        });
        let result = estimator.estimate(&samples, &grid, None, &CancelToken::new());

        let est = result.estimate.expect("search should find the room");
        assert!(
            (est.scale - truth.scale).abs() <= 0.2,
            "scale {} too far from {}",
            est.scale,
            truth.scale
        );
        assert!(
            est.translation.distance(&truth.translation) <= 1.0,
            "translation {:?} too far from {:?}",
            est.translation,
            truth.translation
        );
        // The truth pose lies on the lattice, so the full score is reachable.
        assert_eq!(result.score, samples.len() as f32);
        // 72 orientations x 5 scales x 13 rows x 17 columns.
        assert_eq!(result.combinations, 72 * 5 * 13 * 17);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_prior_narrows_orientation_window() {
        let grid = rect_room();
        let truth = PoseEstimate::new(30.0, 1.0, Point2D::new(4.0, 3.0));
        let walls = rect_interior_points(8.0, 6.0, 0.2, 0.5);
        let samples = sensor_view(&walls, &truth);

        let estimator = GridSearchEstimator::new(GridSearchConfig {
            orientation_step_deg: 5.0,
            orientation_span_deg: 20.0,
            ..Default::default()
        });
        let result = estimator.estimate(&samples, &grid, Some(&truth), &CancelToken::new());

        let est = result.estimate.expect("search should find the room");
        assert!((est.scale - truth.scale).abs() <= 0.2);
        assert!(est.translation.distance(&truth.translation) <= 1.0);
        assert_eq!(result.score, samples.len() as f32);
        // Window of 20 degrees at step 5 is 5 candidates, not 72.
        assert_eq!(result.combinations, 5 * 5 * 13 * 17);
    }

    #[test]
    fn test_ties_keep_earliest_candidate() {
        let grid = square_room();
        // A rotationally symmetric cloud ties at every orientation.
        let samples = ring_samples(1000, 12);
        let estimator = GridSearchEstimator::new(GridSearchConfig {
            orientation_step_deg: 5.0,
            orientation_span_deg: 20.0,
            scale_min: 1.0,
            scale_max: 1.0,
            ..Default::default()
        });

        let result = estimator.estimate(&samples, &grid, None, &CancelToken::new());
        let est = result.estimate.unwrap();
        assert_eq!(result.score, 12.0);
        // First orientation candidate, then first translation that fits.
        assert_eq!(est.orientation_deg, 0.0);
        assert_eq!(est.translation, Point2D::new(1.0, 1.0));

        // A prior shifts the window start but not the tie policy.
        let prior = PoseEstimate::new(45.0, 1.0, Point2D::new(2.0, 2.0));
        let with_prior = estimator.estimate(&samples, &grid, Some(&prior), &CancelToken::new());
        let est = with_prior.estimate.unwrap();
        assert_eq!(est.orientation_deg, 35.0);
        assert_eq!(est.translation, Point2D::new(1.0, 1.0));
    }

    #[test]
    fn test_cancelled_token_stops_immediately() {
        let grid = square_room();
        let samples = ring_samples(1000, 12);
        let estimator = GridSearchEstimator::new(GridSearchConfig::default());

        let token = CancelToken::new();
        token.cancel();
        let result = estimator.estimate(&samples, &grid, None, &token);
        assert!(result.cancelled);
        assert!(result.estimate.is_none());
        assert_eq!(result.combinations, 0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_unmatchable_samples_yield_no_estimate() {
        let grid = square_room();
        // 100 m ranges cannot land on a 4 m plan from any lattice pose.
        let samples = ring_samples(100_000, 4);
        let estimator = GridSearchEstimator::new(GridSearchConfig {
            orientation_step_deg: 30.0,
            scale_min: 1.0,
            scale_max: 1.0,
            ..Default::default()
        });

        let result = estimator.estimate(&samples, &grid, None, &CancelToken::new());
        assert!(result.estimate.is_none());
        // Searched but found nothing: zero, not the no-data sentinel.
        assert_eq!(result.score, 0.0);
        assert!(result.combinations > 0);
        assert!(!result.cancelled);
    }
}
