//! Geometry and pose-search algorithms.
//!
//! Three areas build on the [`core`](crate::core) types:
//!
//! - [`extraction`]: line features from raw sweep samples
//! - [`mapping`]: floor-plan polygon and its quadtree occupancy grid
//! - [`localization`]: pose search of a sweep against the grid

pub mod extraction;
pub mod localization;
pub mod mapping;
