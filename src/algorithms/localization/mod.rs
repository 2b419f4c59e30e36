//! Floor-plan pose search.
//!
//! Two strategies recover where on a known floor plan a sweep was taken:
//!
//! - [`GridSearchEstimator`]: exhaustive orientation/scale/translation sweep,
//!   deterministic and prior-aware
//! - [`ParticleFilterEstimator`]: Monte Carlo search with low-variance
//!   resampling, cost bounded by particle count
//!
//! Both score candidates against the same
//! [`OccupancyGrid`](crate::algorithms::mapping::OccupancyGrid) and report a
//! [`PoseSearchResult`](crate::core::types::PoseSearchResult). Long searches
//! poll a [`CancelToken`] so a newer sweep can abandon a stale one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod dynamic;
mod grid_search;
mod particle_filter;

pub use dynamic::{DynEstimator, DynEstimatorConfig, EstimatorType};
pub use grid_search::{GridSearchConfig, GridSearchEstimator};
pub use particle_filter::{ParticleFilterConfig, ParticleFilterEstimator};

/// Cooperative cancellation handle shared between a search and its owner.
///
/// Cloning yields another handle to the same flag. Estimators poll the token
/// at coarse intervals (once per orientation step or filter iteration) and
/// return their partial result flagged `cancelled: true` when it fires.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask any search holding a clone of this token to stop.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_token_shared_across_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_fresh_tokens_independent() {
        let a = CancelToken::new();
        let b = CancelToken::new();
        a.cancel();
        assert!(!b.is_cancelled());
    }
}
