use std::time::Duration;

use thiserror::Error;

use crate::prediction::domain::prediction_client::{PredictRequest, Prediction, PredictionClient};
use crate::sampling::frame_sampler::EncodedStill;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode prediction response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Blocking HTTP implementation of [`PredictionClient`].
///
/// One `POST` per prediction, JSON in and out, with a hard request timeout
/// so a stalled backend cannot wedge the worker thread.
pub struct HttpPredictionClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpPredictionClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PredictError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PredictError::Client)?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PredictionClient for HttpPredictionClient {
    fn predict(&self, still: &EncodedStill) -> Result<Prediction, Box<dyn std::error::Error>> {
        let request = PredictRequest {
            image: &still.data_url,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .map_err(|e| PredictError::Transport {
                url: self.url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Status {
                url: self.url.clone(),
                status,
            }
            .into());
        }

        let prediction = response.json::<Prediction>().map_err(PredictError::Decode)?;
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_keeps_url() {
        let client =
            HttpPredictionClient::new("http://localhost:5000/predict", Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.url(), "http://localhost:5000/predict");
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        // Port 1 is reserved; nothing listens there
        let client =
            HttpPredictionClient::new("http://127.0.0.1:1/predict", Duration::from_millis(250))
                .unwrap();
        let still = EncodedStill {
            data_url: "data:image/jpeg;base64,AAAA".to_string(),
            width: 1,
            height: 1,
        };
        let err = client.predict(&still).unwrap_err();
        assert!(err.to_string().contains("failed"));
    }
}
