//! Sweep-to-pose pipeline state.
//!
//! [`LocalizationSession`] runs the full chain for one device: quality
//! filtering, optional line extraction, pose search against the floor
//! plan, then heading integration and position smoothing across sweeps.
//! [`EstimatorWorker`] moves a session onto its own thread so slow
//! searches never stall the sweep producer.

mod orientation;
mod position;
mod session;
mod worker;

pub use orientation::OrientationTracker;
pub use position::{PositionFilter, DEFAULT_SMOOTHING_ALPHA};
pub use session::{LocalizationSession, SessionConfig, SweepOutcome};
pub use worker::EstimatorWorker;
