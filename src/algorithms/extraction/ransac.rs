//! RANSAC line extraction.
//!
//! Repeatedly samples two-point candidate lines, keeps the one with the
//! most inliers, and removes those inliers from the pool until no line
//! with enough support remains. Robust to clutter between walls.

use rand::Rng;

use crate::core::types::{LineFeature, Point2D};

use super::detector::LineDetectorConfig;
use super::fit::span_along;

pub(super) fn extract_ransac<R: Rng>(
    points: &[Point2D],
    config: &LineDetectorConfig,
    rng: &mut R,
) -> Vec<LineFeature> {
    let mut active = vec![true; points.len()];
    let mut lines = Vec::new();

    loop {
        let remaining: Vec<usize> = active
            .iter()
            .enumerate()
            .filter_map(|(i, &a)| if a { Some(i) } else { None })
            .collect();
        if remaining.len() < config.min_points {
            break;
        }

        let mut best_inliers: Vec<usize> = Vec::new();
        let mut best_anchor = Point2D::ZERO;
        let mut best_direction = Point2D::ZERO;

        for _ in 0..config.ransac_trials {
            let i = remaining[rng.random_range(0..remaining.len())];
            let j = remaining[rng.random_range(0..remaining.len())];
            if i == j {
                // Degenerate draw, skip this trial.
                continue;
            }
            let anchor = points[i];
            let chord = points[j] - anchor;
            let len = chord.length();
            if len < f32::EPSILON {
                // Coincident pair defines no line, skip this trial.
                continue;
            }
            let direction = chord * (1.0 / len);

            let inliers: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&k| {
                    (points[k] - anchor).cross(&direction).abs() <= config.distance_threshold
                })
                .collect();

            if inliers.len() > best_inliers.len() {
                best_inliers = inliers;
                best_anchor = anchor;
                best_direction = direction;
            }
        }

        if best_inliers.len() < config.min_points {
            break;
        }

        let inlier_points: Vec<Point2D> = best_inliers.iter().map(|&k| points[k]).collect();
        let (start, end) = span_along(&best_anchor, &best_direction, &inlier_points);
        lines.push(LineFeature::new(start, end, inlier_points.len()));
        for &k in &best_inliers {
            active[k] = false;
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::angle_diff_180;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> LineDetectorConfig {
        LineDetectorConfig::default()
            .with_distance_threshold(0.05)
            .with_min_points(5)
    }

    #[test]
    fn test_single_horizontal_line() {
        let points: Vec<Point2D> = (0..20)
            .map(|i| Point2D::new(-1.0 + i as f32 * 0.1, 1.0))
            .collect();
        let mut rng = StdRng::seed_from_u64(42);

        let lines = extract_ransac(&points, &config(), &mut rng);

        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(angle_diff_180(line.orientation_deg, 90.0) < 5.0);
        assert_eq!(line.point_count, 20);
        // Endpoints span the full extent.
        let min_x = line.start.x.min(line.end.x);
        let max_x = line.start.x.max(line.end.x);
        assert!(min_x < -0.9 && max_x > 0.8);
    }

    #[test]
    fn test_vertical_line() {
        let points: Vec<Point2D> = (0..15)
            .map(|i| Point2D::new(0.0, 0.5 + i as f32 * 0.1))
            .collect();
        let mut rng = StdRng::seed_from_u64(42);

        let lines = extract_ransac(&points, &config(), &mut rng);

        assert_eq!(lines.len(), 1);
        assert!(angle_diff_180(lines[0].orientation_deg, 0.0) < 5.0);
    }

    #[test]
    fn test_two_walls() {
        let mut points: Vec<Point2D> = (0..15)
            .map(|i| Point2D::new(i as f32 * 0.1, 0.0))
            .collect();
        for i in 0..15 {
            points.push(Point2D::new(0.0, 1.0 + i as f32 * 0.1));
        }
        let mut rng = StdRng::seed_from_u64(42);

        let lines = extract_ransac(&points, &config(), &mut rng);

        assert_eq!(lines.len(), 2);
        let mut orientations: Vec<f32> = lines.iter().map(|l| l.orientation_deg).collect();
        orientations.sort_by(f32::total_cmp);
        assert!(angle_diff_180(orientations[0], 0.0) < 5.0);
        assert!(angle_diff_180(orientations[1], 90.0) < 5.0);
    }

    #[test]
    fn test_outliers_left_unconsumed() {
        let mut points: Vec<Point2D> = (0..20)
            .map(|i| Point2D::new(i as f32 * 0.1, 2.0))
            .collect();
        points.push(Point2D::new(5.0, 5.0));
        points.push(Point2D::new(-3.0, 0.5));
        let mut rng = StdRng::seed_from_u64(7);

        let lines = extract_ransac(&points, &config(), &mut rng);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].point_count, 20);
    }

    #[test]
    fn test_coincident_points_yield_nothing() {
        // Every pair is degenerate; all trials are skipped.
        let points = vec![Point2D::new(1.0, 1.0); 10];
        let mut rng = StdRng::seed_from_u64(42);

        let lines = extract_ransac(&points, &config(), &mut rng);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(42);

        let lines = extract_ransac(&points, &config(), &mut rng);
        assert!(lines.is_empty());
    }
}
