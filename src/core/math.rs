//! Angle arithmetic and small numeric helpers.
//!
//! Angles appear in three ranges depending on consumer:
//! degrees in [-180, 180) for heading reports, degrees in [0, 360) for
//! sweep/bearing values, and degrees in [0, 180) for undirected line
//! orientations. Radians are normalized to (-π, π].

use std::f32::consts::{PI, TAU};

/// Normalize an angle in degrees to [-180, 180).
///
/// # Examples
///
/// ```
/// use vastu_loc::core::math::normalize_degrees;
///
/// assert_eq!(normalize_degrees(190.0), -170.0);
/// assert_eq!(normalize_degrees(-190.0), 170.0);
/// assert_eq!(normalize_degrees(180.0), -180.0);
/// ```
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a >= 180.0 {
        a -= 360.0;
    } else if a < -180.0 {
        a += 360.0;
    }
    a
}

/// Normalize an angle in radians to (-π, π].
#[inline]
pub fn normalize_radians(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Normalize an angle in degrees to [0, 360).
#[inline]
pub fn normalize_degrees_360(angle: f32) -> f32 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Normalize an undirected line orientation to [0, 180).
#[inline]
pub fn normalize_orientation_180(angle: f32) -> f32 {
    let a = angle % 180.0;
    if a < 0.0 {
        a + 180.0
    } else {
        a
    }
}

/// Minimal absolute distance between two undirected line orientations,
/// on a 180°-periodic scale.
///
/// # Examples
///
/// ```
/// use vastu_loc::core::math::angle_diff_180;
///
/// assert_eq!(angle_diff_180(1.0, 179.0), 2.0);
/// assert_eq!(angle_diff_180(90.0, 90.0), 0.0);
/// ```
#[inline]
pub fn angle_diff_180(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 180.0;
    d.min(180.0 - d)
}

/// Percentile of a value set with linear interpolation between closest
/// ranks. `pct` is in [0, 100]; an empty input yields 0.
pub fn percentile(values: &[f32], pct: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = pct.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f32;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}
