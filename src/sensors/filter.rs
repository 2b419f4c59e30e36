//! Signal-quality filtering for raw sweep samples.
//!
//! Rejects samples by confidence, minimum range and spatial isolation.
//! The isolation test counts neighbours within a radius over the full
//! input set; with at most a few hundred samples per sweep the O(n²)
//! scan is cheaper than building an index.

use serde::{Deserialize, Serialize};

use crate::core::types::{Measurement, Point2D};

/// Configuration for [`MeasurementFilter`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MeasurementFilterConfig {
    /// Minimum confidence (0-255) to keep a sample.
    pub confidence_threshold: u8,
    /// Minimum range in meters to keep a sample.
    pub min_distance_m: f32,
    /// Neighbour radius in meters; 0 disables the isolation test.
    pub isolation_distance_m: f32,
    /// Minimum number of *other* samples required within the radius.
    pub min_neighbours: usize,
}

impl Default for MeasurementFilterConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 100,
            min_distance_m: 0.1,
            isolation_distance_m: 0.0,
            min_neighbours: 1,
        }
    }
}

/// Confidence / range / isolation sample filter.
#[derive(Debug, Clone)]
pub struct MeasurementFilter {
    config: MeasurementFilterConfig,
}

impl MeasurementFilter {
    /// Create a filter with the given configuration.
    pub fn new(config: MeasurementFilterConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &MeasurementFilterConfig {
        &self.config
    }

    /// Filter a sweep. A sample survives iff its confidence and range
    /// meet the thresholds and, when the isolation test is enabled, at
    /// least `min_neighbours` other input samples lie within
    /// `isolation_distance_m`.
    pub fn apply(&self, samples: &[Measurement]) -> Vec<Measurement> {
        if samples.is_empty() {
            return Vec::new();
        }

        let isolation = self.config.isolation_distance_m;
        let isolation_sq = isolation * isolation;
        let points: Vec<Point2D> = samples.iter().map(|m| m.to_point()).collect();

        let mut kept = Vec::with_capacity(samples.len());
        for (i, sample) in samples.iter().enumerate() {
            if sample.confidence < self.config.confidence_threshold {
                continue;
            }
            if sample.distance_m() < self.config.min_distance_m {
                continue;
            }
            if isolation > 0.0 && !self.has_neighbours(i, &points, isolation_sq) {
                continue;
            }
            kept.push(*sample);
        }
        kept
    }

    fn has_neighbours(&self, index: usize, points: &[Point2D], isolation_sq: f32) -> bool {
        let mut neighbours = 0usize;
        for (j, point) in points.iter().enumerate() {
            if j == index {
                continue;
            }
            if points[index].distance_squared(point) <= isolation_sq {
                neighbours += 1;
                if neighbours >= self.config.min_neighbours {
                    return true;
                }
            }
        }
        false
    }
}
