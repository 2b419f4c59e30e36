//! Floor-plan occupancy representation.
//!
//! - [`Polygon`]: ordered-vertex floor plan with containment tests.
//! - [`OccupancyGrid`]: immutable quadtree index answering "is this
//!   world position inside the floor plan" in O(log(extent/cell)).

mod polygon;
mod quadtree;

pub use polygon::Polygon;
pub use quadtree::{Node, OccupancyGrid};
