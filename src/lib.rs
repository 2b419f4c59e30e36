//! Lidar pose estimation against a known floor plan.
//!
//! # Architecture
//!
//! The crate is organized into 5 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      bin/                           │  ← Executables
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Wire protocol
//! │           (packet codec, decoder, stream)           │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    engine/                          │  ← Orchestration
//! │          (session, worker, smoothing)               │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                  algorithms/                        │  ← Core algorithms
//! │        (extraction, mapping, localization)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                   sensors/                          │  ← Sample filtering
//! │                (measurement filter)                 │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! A sweep travels through the layers in order:
//!
//! 1. [`io::PacketDecoder`] locates and validates LD06 frames in a raw
//!    byte stream and emits [`Measurement`]s; [`io::DecodeStream`] runs
//!    the same decoder on its own thread behind channels.
//! 2. [`MeasurementFilter`] drops low-confidence, too-close and
//!    isolated samples.
//! 3. [`algorithms::extraction`] optionally condenses the sweep into
//!    straight-line features and resamples them into synthetic
//!    measurements.
//! 4. [`OccupancyGrid`] indexes the floor-plan polygon as a quadtree;
//!    [`GridSearchEstimator`] and [`ParticleFilterEstimator`] search it
//!    for the pose that explains the sweep.
//! 5. [`LocalizationSession`] holds the cross-sweep state: the last
//!    estimate seeds the next search, gyro samples keep the heading
//!    current, and an exponential filter steadies the reported
//!    position. [`EstimatorWorker`] moves all of that off-thread.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Sample filtering (depends on core)
// ============================================================================
pub mod sensors;

// ============================================================================
// Layer 3: Algorithms (depends on core, sensors)
// ============================================================================
pub mod algorithms;

// ============================================================================
// Layer 4: Engine (depends on core, sensors, algorithms)
// ============================================================================
pub mod engine;

// ============================================================================
// Layer 5: I/O wire protocol (depends on core)
// ============================================================================
pub mod io;

pub mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use error::{Error, Result};

// Core types
pub use core::math;
pub use core::types::{GyroSample, Measurement, FULL_CONFIDENCE};
pub use core::types::{LineFeature, Point2D, Rotation};
pub use core::types::{PoseEstimate, PoseSearchResult, NO_DATA_SCORE};

// Sensors
pub use sensors::{MeasurementFilter, MeasurementFilterConfig};

// Algorithms - Extraction
pub use algorithms::extraction::{
    as_measurements, filter_adaptive, AdaptiveFilterConfig, AdaptiveFilterResult, LineAlgorithm,
    LineDetector, LineDetectorConfig,
};

// Algorithms - Mapping
pub use algorithms::mapping::{OccupancyGrid, Polygon};

// Algorithms - Localization
pub use algorithms::localization::{
    CancelToken, DynEstimator, DynEstimatorConfig, EstimatorType, GridSearchConfig,
    GridSearchEstimator, ParticleFilterConfig, ParticleFilterEstimator,
};

// Engine
pub use engine::{
    EstimatorWorker, LocalizationSession, OrientationTracker, PositionFilter, SessionConfig,
    SweepOutcome, DEFAULT_SMOOTHING_ALPHA,
};

// I/O
pub use io::{DecodeStream, DecoderStats, PacketDecoder};
