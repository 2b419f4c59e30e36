//! Sample preprocessing between the decoder and the feature extractors.

pub mod filter;

pub use filter::{MeasurementFilter, MeasurementFilterConfig};
