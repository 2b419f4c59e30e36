//! Foundation layer: math helpers and shared data types.

pub mod math;
pub mod types;
