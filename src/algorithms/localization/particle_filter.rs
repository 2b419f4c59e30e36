//! Monte Carlo pose search with low-variance resampling.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::localization::CancelToken;
use crate::algorithms::mapping::OccupancyGrid;
use crate::core::math::normalize_degrees_360;
use crate::core::types::{Measurement, Point2D, PoseEstimate, PoseSearchResult};

/// Weight floor so a round of all-miss particles still resamples.
const WEIGHT_EPSILON: f64 = 1e-6;

/// Orientation jitter applied on resampling, degrees.
const ORIENTATION_JITTER_DEG: f32 = 2.0;

/// Configuration for [`ParticleFilterEstimator`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticleFilterConfig {
    /// Number of pose hypotheses held between rounds.
    /// Default: 1000
    pub particle_count: usize,

    /// Score/resample rounds to run.
    /// Default: 20
    pub iterations: usize,

    /// Score subtracted per sample landing outside the plan. Zero keeps
    /// only the hit count; higher values punish spilling over walls.
    /// Default: 0.5
    pub miss_penalty: f32,
}

impl Default for ParticleFilterConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            iterations: 20,
            miss_penalty: 0.5,
        }
    }
}

/// One pose hypothesis carried by the filter.
#[derive(Clone, Copy, Debug)]
struct Particle {
    /// Translation, floor-plan frame (meters).
    x: f32,
    y: f32,
    /// Orientation, degrees in [0, 360).
    orientation_deg: f32,
    /// Normalized importance weight.
    weight: f64,
}

/// Sampling-based pose search.
///
/// Seeds `particle_count` uniformly random poses over the grid's square
/// region, then alternates scoring and low-variance resampling so lineages
/// concentrate around well-fitting poses. Scale is fixed at 1.0; the
/// estimate is the best-scoring particle ever weighed, not the final
/// population mean.
///
/// Randomness is injected, so a seeded generator reproduces a run exactly.
#[derive(Clone, Debug)]
pub struct ParticleFilterEstimator {
    config: ParticleFilterConfig,
}

impl ParticleFilterEstimator {
    /// Create an estimator with the given configuration.
    pub fn new(config: ParticleFilterConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &ParticleFilterConfig {
        &self.config
    }

    /// Search for the pose aligning `samples` onto `grid`.
    ///
    /// The token is polled once per round; a cancelled search returns the
    /// best pose weighed so far with `cancelled: true`.
    pub fn estimate<R: Rng>(
        &self,
        samples: &[Measurement],
        grid: &OccupancyGrid,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> PoseSearchResult {
        let started = Instant::now();
        if samples.is_empty() {
            return PoseSearchResult::no_data(started.elapsed().as_millis() as u64);
        }

        let offsets: Vec<Point2D> = samples.iter().map(Measurement::to_point).collect();

        let origin = grid.origin();
        let side = grid.extent();
        let cell = grid.cell_size();
        let n = self.config.particle_count.max(1);

        // Uniform seed over the square region and the full circle.
        let mut particles: Vec<Particle> = (0..n)
            .map(|_| Particle {
                x: rng.random_range(origin.x..origin.x + side),
                y: rng.random_range(origin.y..origin.y + side),
                orientation_deg: rng.random_range(0.0..360.0),
                weight: 1.0 / n as f64,
            })
            .collect();

        let mut best: Option<PoseEstimate> = None;
        let mut best_score = f32::MIN;
        let mut combinations = 0u64;
        let mut cancelled = false;
        let mut cumulative = vec![0.0f64; n];

        for _ in 0..self.config.iterations {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            // Score every particle, remembering the best pose ever weighed.
            let mut total = 0.0f64;
            for p in particles.iter_mut() {
                let score = score_pose(p, &offsets, grid, self.config.miss_penalty);
                combinations += 1;
                if score > best_score {
                    best_score = score;
                    best = Some(PoseEstimate::new(
                        p.orientation_deg,
                        1.0,
                        Point2D::new(p.x, p.y),
                    ));
                }
                p.weight = f64::from(score.max(0.0)) + WEIGHT_EPSILON;
                total += p.weight;
            }

            let mut acc = 0.0;
            for (c, p) in cumulative.iter_mut().zip(particles.iter()) {
                acc += p.weight / total;
                *c = acc;
            }

            // Low-variance resampling: one random offset, then evenly
            // spaced picks through the cumulative weights. Jitter spreads
            // each lineage half a cell and a couple of degrees.
            let step = 1.0 / n as f64;
            let mut r = rng.random_range(0.0..step);
            let mut idx = 0;
            let mut next = Vec::with_capacity(n);
            for _ in 0..n {
                while r > cumulative[idx] && idx < n - 1 {
                    idx += 1;
                }
                let parent = particles[idx];
                next.push(Particle {
                    x: parent.x + rng.random_range(-0.5..0.5) * cell,
                    y: parent.y + rng.random_range(-0.5..0.5) * cell,
                    orientation_deg: normalize_degrees_360(
                        parent.orientation_deg
                            + rng.random_range(-ORIENTATION_JITTER_DEG..ORIENTATION_JITTER_DEG),
                    ),
                    weight: step,
                });
                r += step;
            }
            particles = next;
        }

        PoseSearchResult {
            estimate: if best_score > 0.0 { best } else { None },
            score: best_score.max(0.0),
            combinations,
            duration_ms: started.elapsed().as_millis() as u64,
            cancelled,
        }
    }
}

/// Hits minus penalized misses for one pose hypothesis.
fn score_pose(
    particle: &Particle,
    offsets: &[Point2D],
    grid: &OccupancyGrid,
    miss_penalty: f32,
) -> f32 {
    let (sin_t, cos_t) = particle.orientation_deg.to_radians().sin_cos();
    let mut score = 0.0f32;
    for o in offsets {
        let w = o.rotated_sin_cos(sin_t, cos_t);
        if grid.is_occupied(particle.x + w.x, particle.y + w.y) {
            score += 1.0;
        } else {
            score -= miss_penalty;
        }
    }
    score
}
