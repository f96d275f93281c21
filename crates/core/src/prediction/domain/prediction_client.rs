use serde::{Deserialize, Serialize};

use crate::sampling::frame_sampler::EncodedStill;
use crate::shared::constants::POSITIVE_LABEL;

/// Request body for the classification endpoint.
///
/// The single `image` field carries the data-URL-encoded JPEG. Field name
/// is fixed by the backend contract.
#[derive(Serialize, Debug)]
pub struct PredictRequest<'a> {
    pub image: &'a str,
}

/// Classification returned by the endpoint.
///
/// Wire field names (`result`, `confidence`) are fixed by the backend
/// contract; `confidence` is a percentage.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Prediction {
    #[serde(rename = "result")]
    pub label: String,
    pub confidence: f64,
}

impl Prediction {
    /// Whether the label is the positive ("safe") class.
    pub fn is_positive(&self) -> bool {
        self.label == POSITIVE_LABEL
    }
}

/// Domain interface for the remote classifier.
///
/// One request per call; implementations decide transport. Failures are
/// per-cycle events: the monitor drops them and keeps the prior display
/// state.
pub trait PredictionClient: Send {
    fn predict(&self, still: &EncodedStill) -> Result<Prediction, Box<dyn std::error::Error>>;
}
