//! Core data types shared by every layer.
//!
//! - [`Point2D`]: 2D point in meters (bearing-frame helpers)
//! - [`Measurement`] / [`GyroSample`]: raw sensor samples
//! - [`Rotation`]: one full sweep as exchanged with recording layers
//! - [`LineFeature`]: extracted straight-line segment
//! - [`PoseEstimate`] / [`PoseSearchResult`]: pose search outcomes

mod line;
mod measurement;
mod point;
mod pose;
mod rotation;

pub use line::LineFeature;
pub use measurement::{GyroSample, Measurement, FULL_CONFIDENCE};
pub use point::Point2D;
pub use pose::{PoseEstimate, PoseSearchResult, NO_DATA_SCORE};
pub use rotation::Rotation;
