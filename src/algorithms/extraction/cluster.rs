//! Cluster-growing line extraction.
//!
//! Walks the sweep in bearing order and grows a cluster while consecutive
//! samples stay close in angle and near the running regression line. Each
//! closed cluster large enough to matter becomes one line feature.

use crate::core::types::{LineFeature, Measurement, Point2D};

use super::detector::LineDetectorConfig;
use super::fit::{span_along, LineFit};

pub(super) fn extract_cluster(
    samples: &[Measurement],
    config: &LineDetectorConfig,
) -> Vec<LineFeature> {
    let mut ordered = samples.to_vec();
    ordered.sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));

    let mut lines = Vec::new();
    let mut points: Vec<Point2D> = Vec::new();
    let mut fit = LineFit::new();
    let mut prev_angle = 0.0f32;

    for sample in &ordered {
        let point = sample.to_point();
        if !points.is_empty() {
            let gap = sample.angle_deg - prev_angle;
            if gap > config.gap_tolerance_deg
                || fit.distance_to(&point) > config.distance_threshold
            {
                close_cluster(&points, &fit, config, &mut lines);
                points.clear();
                fit = LineFit::new();
            }
        }
        points.push(point);
        fit.add(&point);
        prev_angle = sample.angle_deg;
    }
    close_cluster(&points, &fit, config, &mut lines);

    lines
}

/// Emit a line for a finished cluster, unless it is too small.
fn close_cluster(
    points: &[Point2D],
    fit: &LineFit,
    config: &LineDetectorConfig,
    lines: &mut Vec<LineFeature>,
) {
    if points.len() < config.min_points || points.len() < 2 {
        return;
    }
    let direction = match fit.direction() {
        Some(d) => d,
        None => {
            // Near-vertical fit: fall back to the secant through the
            // cluster's first and last points.
            let secant = points[points.len() - 1] - points[0];
            if secant.dot(&secant) < f32::EPSILON {
                return;
            }
            secant.normalize()
        }
    };
    let (start, end) = span_along(&fit.centroid(), &direction, points);
    lines.push(LineFeature::new(start, end, points.len()));
}
