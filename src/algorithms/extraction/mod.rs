//! Straight-line feature extraction.
//!
//! Turns a filtered sweep into line segments via one of two algorithms:
//!
//! - [`LineAlgorithm::Cluster`]: walks samples in bearing order, growing
//!   clusters along a running regression. Fast, relies on sweep order.
//! - [`LineAlgorithm::Ransac`]: order-independent random sample
//!   consensus. Slower but robust to clutter between walls.
//!
//! The [`LineDetector`] facade applies the optional merge pass; the
//! free functions handle adaptive percentile filtering and resampling
//! of line features back into synthetic measurements.

mod cluster;
mod detector;
mod fit;
mod ransac;

pub use detector::{
    as_measurements, filter_adaptive, AdaptiveFilterConfig, AdaptiveFilterResult, LineAlgorithm,
    LineDetector, LineDetectorConfig,
};
pub use fit::LineFit;
