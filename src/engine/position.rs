//! Exponential smoothing of per-sweep position fixes.

use crate::core::types::Point2D;

/// Default blend factor for new position fixes.
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.2;

/// First-order low-pass over position estimates.
///
/// Raw per-sweep fixes jitter by a grid cell or more; blending each new
/// fix into the running value keeps the reported position stable while
/// still following real motion. The first fix seeds the filter directly.
#[derive(Clone, Debug)]
pub struct PositionFilter {
    alpha: f32,
    smoothed: Option<Point2D>,
}

impl PositionFilter {
    /// Filter with the given blend factor in (0, 1]; 1 disables smoothing.
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            smoothed: None,
        }
    }

    /// Blend in a new fix and return the smoothed position.
    pub fn update(&mut self, position: Point2D) -> Point2D {
        let next = match self.smoothed {
            Some(prev) => prev * (1.0 - self.alpha) + position * self.alpha,
            None => position,
        };
        self.smoothed = Some(next);
        next
    }

    /// Last smoothed position, if any fix has been seen.
    pub fn value(&self) -> Option<Point2D> {
        self.smoothed
    }

    /// Drop the history; the next fix seeds the filter again.
    pub fn reset(&mut self) {
        self.smoothed = None;
    }
}

impl Default for PositionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_ALPHA)
    }
}
