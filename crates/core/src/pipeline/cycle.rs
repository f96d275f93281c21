use std::time::Duration;

use crate::prediction::domain::prediction_client::Prediction;
use crate::prediction::infrastructure::predict_worker::PredictOutcome;
use crate::shared::face_box::PixelRegion;

/// Sampling cadence: one explicit policy, chosen at startup.
///
/// `EveryFrame` runs a cycle as fast as the source produces frames;
/// `Interval` paces cycles to a fixed period. The two are alternatives,
/// never combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cadence {
    EveryFrame,
    Interval(Duration),
}

impl Cadence {
    /// `0` selects per-frame sampling; anything else a fixed interval.
    pub fn from_interval_ms(ms: u64) -> Self {
        if ms == 0 {
            Cadence::EveryFrame
        } else {
            Cadence::Interval(Duration::from_millis(ms))
        }
    }
}

/// What a cycle did after locating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleAction {
    /// No detection; status goes neutral, nothing dispatched.
    NoFace,
    /// Detection collapsed to a zero-area region; nothing dispatched.
    EmptyRegion,
    /// A still was queued for prediction.
    Dispatched,
    /// The worker queue was full; this cycle skipped prediction.
    DispatchSkipped,
    /// The locator errored; treated as no detection for the cycle.
    LocateFailed,
}

/// Per-cycle result object handed to observers.
///
/// Replaces shared "last known" globals: everything a cycle produced
/// travels together, so nothing is read across asynchronous boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleReport {
    pub cycle: u64,
    pub region: Option<PixelRegion>,
    pub action: CycleAction,
}

/// Outcome of offering a completed prediction to [`LatestPrediction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    /// A newer cycle was already applied; this response is discarded.
    Stale,
    /// The attempt failed; prior state persists.
    Failed,
}

/// The newest applied classification, guarded by cycle number.
///
/// Prediction responses can finish out of order once requests overlap. A
/// response is applied only if its originating cycle is newer than the last
/// one applied, so a slow response from an earlier cycle can never
/// overwrite a newer cycle's result.
#[derive(Debug, Default)]
pub struct LatestPrediction {
    applied_cycle: Option<u64>,
    value: Option<Prediction>,
}

impl LatestPrediction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, outcome: &PredictOutcome) -> ApplyResult {
        if let Some(applied) = self.applied_cycle {
            if outcome.cycle <= applied {
                return ApplyResult::Stale;
            }
        }
        match &outcome.result {
            Ok(prediction) => {
                self.applied_cycle = Some(outcome.cycle);
                self.value = Some(prediction.clone());
                ApplyResult::Applied
            }
            Err(_) => ApplyResult::Failed,
        }
    }

    pub fn value(&self) -> Option<&Prediction> {
        self.value.as_ref()
    }

    pub fn applied_cycle(&self) -> Option<u64> {
        self.applied_cycle
    }
}
