//! Background estimator thread.
//!
//! Pose searches can outlast the sweep interval, so the session runs on
//! its own thread. Submitting a sweep cancels whatever the thread is
//! still working on: with a fixed floor plan only the newest sweep is
//! worth finishing.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

use crate::algorithms::localization::CancelToken;
use crate::algorithms::mapping::OccupancyGrid;
use crate::core::types::Rotation;
use crate::engine::session::{LocalizationSession, SessionConfig, SweepOutcome};

struct Job {
    rotation: Rotation,
    cancel: CancelToken,
}

/// Handle to a [`LocalizationSession`] running on its own thread.
///
/// [`submit`](Self::submit) never blocks; each submission supersedes the
/// previous one. Completed outcomes land in a single slot that
/// [`try_latest`](Self::try_latest) drains, so a slow consumer only ever
/// sees the freshest result.
pub struct EstimatorWorker {
    job_tx: Sender<Job>,
    latest: Arc<Mutex<Option<SweepOutcome>>>,
    last_cancel: Option<CancelToken>,
    handle: JoinHandle<()>,
}

impl EstimatorWorker {
    /// Spawn the estimator thread over the given floor plan.
    pub fn spawn(grid: Arc<OccupancyGrid>, config: SessionConfig) -> Self {
        let (job_tx, job_rx) = unbounded::<Job>();
        let latest = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&latest);

        let handle = thread::Builder::new()
            .name("estimator".into())
            .spawn(move || run(grid, config, job_rx, slot))
            .expect("Failed to spawn estimator thread");

        Self {
            job_tx,
            latest,
            last_cancel: None,
            handle,
        }
    }

    /// Queue a sweep, superseding any submission still in flight.
    pub fn submit(&mut self, rotation: Rotation) {
        if let Some(previous) = self.last_cancel.take() {
            previous.cancel();
        }
        let cancel = CancelToken::new();
        self.last_cancel = Some(cancel.clone());
        if self.job_tx.send(Job { rotation, cancel }).is_err() {
            log::error!("Estimator thread is gone, dropping sweep");
        }
    }

    /// Take the most recent completed outcome, if a new one has arrived
    /// since the last call.
    pub fn try_latest(&self) -> Option<SweepOutcome> {
        self.latest.lock().take()
    }

    /// Stop the thread and wait for it to finish.
    pub fn shutdown(self) {
        let Self {
            job_tx,
            latest: _,
            last_cancel,
            handle,
        } = self;
        if let Some(cancel) = last_cancel {
            cancel.cancel();
        }
        // Closing the channel ends the thread's recv loop.
        drop(job_tx);
        if handle.join().is_err() {
            log::error!("Estimator thread panicked");
        }
    }
}

fn run(
    grid: Arc<OccupancyGrid>,
    config: SessionConfig,
    job_rx: Receiver<Job>,
    slot: Arc<Mutex<Option<SweepOutcome>>>,
) {
    log::info!("Estimator thread started");
    let mut session = LocalizationSession::new(grid, config);

    while let Ok(mut job) = job_rx.recv() {
        // Drain the queue; older sweeps are already superseded.
        while let Ok(newer) = job_rx.try_recv() {
            job = newer;
        }
        if job.cancel.is_cancelled() {
            continue;
        }

        let outcome = session.process_rotation_with_cancel(&job.rotation, &job.cancel);
        if outcome.raw.cancelled {
            log::debug!(
                "Sweep superseded after {} combinations",
                outcome.raw.combinations
            );
            continue;
        }
        *slot.lock() = Some(outcome);
    }

    log::info!("Estimator thread stopped");
}
