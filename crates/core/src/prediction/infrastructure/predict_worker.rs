use std::thread::JoinHandle;
use std::time::Duration;

use crate::prediction::domain::prediction_client::{Prediction, PredictionClient};
use crate::sampling::frame_sampler::EncodedStill;
use crate::shared::constants::PREDICT_QUEUE_CAPACITY;

/// A sampled still bound for the classifier, tagged with its cycle.
pub struct PredictJob {
    pub cycle: u64,
    pub still: EncodedStill,
}

/// A finished prediction attempt.
///
/// Errors cross the thread boundary as strings; the monitor only logs them.
pub struct PredictOutcome {
    pub cycle: u64,
    pub result: Result<Prediction, String>,
    /// Wall-clock time the request took, for stage timing.
    pub elapsed_ms: f64,
}

/// Runs the prediction client on a dedicated thread.
///
/// Jobs and outcomes move over bounded channels so a slow backend applies
/// backpressure instead of growing an unbounded backlog. Dispatch is
/// non-blocking: a full queue means the current cycle skips prediction.
/// Outcomes keep their cycle tag, which is what lets the monitor discard
/// responses that arrive after a newer cycle has already been applied.
pub struct PredictWorker {
    job_tx: Option<crossbeam_channel::Sender<PredictJob>>,
    outcome_rx: crossbeam_channel::Receiver<PredictOutcome>,
    handle: Option<JoinHandle<()>>,
}

impl PredictWorker {
    pub fn spawn(client: Box<dyn PredictionClient>) -> Self {
        Self::with_capacity(client, PREDICT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(client: Box<dyn PredictionClient>, capacity: usize) -> Self {
        let (job_tx, job_rx) = crossbeam_channel::bounded::<PredictJob>(capacity.max(1));
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<PredictOutcome>();

        let handle = std::thread::spawn(move || {
            for job in job_rx {
                let started = std::time::Instant::now();
                let result = client.predict(&job.still).map_err(|e| e.to_string());
                let outcome = PredictOutcome {
                    cycle: job.cycle,
                    result,
                    elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
                };
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            job_tx: Some(job_tx),
            outcome_rx,
            handle: Some(handle),
        }
    }

    /// Queues a job without blocking. Returns `false` when the queue is
    /// full or the worker has shut down.
    pub fn dispatch(&self, job: PredictJob) -> bool {
        match &self.job_tx {
            Some(tx) => tx.try_send(job).is_ok(),
            None => false,
        }
    }

    /// Collects every outcome that has completed so far.
    pub fn drain(&self) -> Vec<PredictOutcome> {
        self.outcome_rx.try_iter().collect()
    }

    /// Blocks up to `timeout` for the next outcome.
    pub fn next_outcome(&self, timeout: Duration) -> Option<PredictOutcome> {
        self.outcome_rx.recv_timeout(timeout).ok()
    }

    /// Stops accepting jobs and waits for in-flight work to finish.
    pub fn shutdown(&mut self) {
        self.job_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PredictWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
