//! Line detector facade.
//!
//! Wraps the two extraction algorithms behind one configuration, applies
//! the optional forward merge pass, and offers adaptive percentile
//! filtering plus resampling of line features back into measurements.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::math::{angle_diff_180, percentile};
use crate::core::types::{LineFeature, Measurement};

use super::cluster::extract_cluster;
use super::ransac::extract_ransac;

/// Which extraction algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    /// Bearing-ordered cluster growing with a running regression.
    Cluster,
    /// Random sample consensus over the unordered point set.
    Ransac,
}

/// Configuration for line extraction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineDetectorConfig {
    /// Extraction algorithm.
    /// Default: Cluster
    pub algorithm: LineAlgorithm,

    /// Maximum perpendicular distance (meters) from a point to its
    /// line (cluster growth and RANSAC inlier test).
    /// Default: 0.05m
    pub distance_threshold: f32,

    /// Minimum supporting samples for a valid line.
    /// Default: 5
    pub min_points: usize,

    /// Orientation difference (degrees) under which adjacent output
    /// lines are merged.
    /// Default: 5.0
    pub angle_tolerance_deg: f32,

    /// Bearing gap (degrees) between consecutive samples that splits a
    /// cluster. Only used by the cluster algorithm.
    /// Default: 5.0
    pub gap_tolerance_deg: f32,

    /// Run the merge pass over the extracted lines.
    /// Default: true
    pub merge: bool,

    /// RANSAC trials per extracted line.
    /// Default: 100
    pub ransac_trials: usize,
}

impl Default for LineDetectorConfig {
    fn default() -> Self {
        Self {
            algorithm: LineAlgorithm::Cluster,
            distance_threshold: 0.05,
            min_points: 5,
            angle_tolerance_deg: 5.0,
            gap_tolerance_deg: 5.0,
            merge: true,
            ransac_trials: 100,
        }
    }
}

impl LineDetectorConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the algorithm.
    pub fn with_algorithm(mut self, algorithm: LineAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Builder-style setter for the distance threshold.
    pub fn with_distance_threshold(mut self, threshold: f32) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Builder-style setter for the minimum point count.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Builder-style setter for the merge angle tolerance.
    pub fn with_angle_tolerance_deg(mut self, tolerance: f32) -> Self {
        self.angle_tolerance_deg = tolerance;
        self
    }

    /// Builder-style setter for the cluster gap tolerance.
    pub fn with_gap_tolerance_deg(mut self, tolerance: f32) -> Self {
        self.gap_tolerance_deg = tolerance;
        self
    }

    /// Builder-style setter for the merge pass.
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Builder-style setter for the RANSAC trial count.
    pub fn with_ransac_trials(mut self, trials: usize) -> Self {
        self.ransac_trials = trials;
        self
    }
}

/// Extracts straight-line features from a filtered sweep.
pub struct LineDetector {
    config: LineDetectorConfig,
}

impl LineDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: LineDetectorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &LineDetectorConfig {
        &self.config
    }

    /// Extract line features from a sweep's samples.
    ///
    /// The random source only drives the RANSAC algorithm; the cluster
    /// algorithm is fully deterministic.
    pub fn detect<R: Rng>(&self, samples: &[Measurement], rng: &mut R) -> Vec<LineFeature> {
        let lines = match self.config.algorithm {
            LineAlgorithm::Cluster => extract_cluster(samples, &self.config),
            LineAlgorithm::Ransac => {
                let points: Vec<_> = samples.iter().map(|m| m.to_point()).collect();
                extract_ransac(&points, &self.config, rng)
            }
        };
        if self.config.merge {
            merge_lines(lines, self.config.angle_tolerance_deg)
        } else {
            lines
        }
    }
}

/// Forward merge over the extracted lines.
///
/// Walks the lines in emission order and absorbs each line into its
/// predecessor while their orientations agree within `tolerance_deg`.
/// The merged line spans the predecessor's start to the absorbed line's
/// end, so the result depends on emission order by construction.
fn merge_lines(lines: Vec<LineFeature>, tolerance_deg: f32) -> Vec<LineFeature> {
    let mut merged: Vec<LineFeature> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.last_mut() {
            Some(prev)
                if angle_diff_180(prev.orientation_deg, line.orientation_deg)
                    <= tolerance_deg =>
            {
                *prev = LineFeature::new(
                    prev.start,
                    line.end,
                    prev.point_count + line.point_count,
                );
            }
            _ => merged.push(line),
        }
    }
    merged
}

/// Configuration for adaptive percentile filtering.
///
/// Thresholds are derived from the line population itself: a line must
/// reach `factor` times the configured percentile of lengths and of
/// supporting counts, with both thresholds clamped into [min, max].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdaptiveFilterConfig {
    /// Apply the thresholds; when false only the percentile statistics
    /// are computed. Default: true
    pub enabled: bool,
    /// Percentile in [0, 100] used for both statistics. Default: 50.0
    pub percentile: f32,
    /// Fraction of the length percentile a line must reach. Default: 0.5
    pub length_factor: f32,
    /// Lower clamp for the length threshold (meters). Default: 0.1m
    pub length_min: f32,
    /// Upper clamp for the length threshold (meters). Default: 1.0m
    pub length_max: f32,
    /// Fraction of the inlier percentile a line must reach. Default: 0.5
    pub inlier_factor: f32,
    /// Lower clamp for the inlier threshold. Default: 3.0
    pub inlier_min: f32,
    /// Upper clamp for the inlier threshold. Default: 30.0
    pub inlier_max: f32,
}

impl Default for AdaptiveFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            percentile: 50.0,
            length_factor: 0.5,
            length_min: 0.1,
            length_max: 1.0,
            inlier_factor: 0.5,
            inlier_min: 3.0,
            inlier_max: 30.0,
        }
    }
}

/// Output of [`filter_adaptive`]: the surviving lines plus the raw
/// percentile statistics they were judged against.
#[derive(Clone, Debug)]
pub struct AdaptiveFilterResult {
    /// Lines that passed both thresholds (all input lines when the
    /// filter is disabled).
    pub lines: Vec<LineFeature>,
    /// Raw length percentile of the input population, meters.
    pub length_percentile: f32,
    /// Raw supporting-count percentile of the input population.
    pub inlier_percentile: f32,
}

/// Filter lines against thresholds derived from their own population.
pub fn filter_adaptive(
    lines: Vec<LineFeature>,
    config: &AdaptiveFilterConfig,
) -> AdaptiveFilterResult {
    let lengths: Vec<f32> = lines.iter().map(|l| l.length()).collect();
    let counts: Vec<f32> = lines.iter().map(|l| l.point_count as f32).collect();
    let length_percentile = percentile(&lengths, config.percentile);
    let inlier_percentile = percentile(&counts, config.percentile);

    if !config.enabled {
        return AdaptiveFilterResult {
            lines,
            length_percentile,
            inlier_percentile,
        };
    }

    let min_length =
        (config.length_factor * length_percentile).clamp(config.length_min, config.length_max);
    let min_inliers =
        (config.inlier_factor * inlier_percentile).clamp(config.inlier_min, config.inlier_max);

    let kept = lines
        .into_iter()
        .filter(|l| l.length() >= min_length && l.point_count as f32 >= min_inliers)
        .collect();

    AdaptiveFilterResult {
        lines: kept,
        length_percentile,
        inlier_percentile,
    }
}

/// Resample line features back into synthetic measurements.
///
/// Each line yields `max(point_count, 2)` evenly spaced full-confidence
/// samples, so a line re-enters pose estimation with the same point mass
/// as the raw samples that supported it.
pub fn as_measurements(lines: &[LineFeature], timestamp_us: u64) -> Vec<Measurement> {
    let mut out = Vec::new();
    for line in lines {
        let count = line.point_count.max(2);
        for i in 0..count {
            let t = i as f32 / (count - 1) as f32;
            out.push(Measurement::from_point(line.point_at(t), timestamp_us));
        }
    }
    out
}
