//! Hugging Face style inference client.
//!
//! Sends `{"inputs": text}` with a bearer credential and accepts either a flat
//! list of `{label, score}` candidates or a list nested one level deeper, which
//! is what text-classification endpoints return. The best-scoring candidate
//! wins.
//!
//! One attempt per call, bounded by the client timeout.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{Prediction, PredictionSource, SentimentSource};
use crate::error::{AegisError, Result};

/// Default inference endpoint (five-class star rating model).
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/nlptown/bert-base-multilingual-uncased-sentiment";

/// Default timeout for one inference request.
pub const DEFAULT_INFERENCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the inference client.
#[derive(Clone)]
pub struct InferenceConfig {
    /// Inference endpoint URL.
    pub api_url: String,
    /// Bearer credential.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl InferenceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_INFERENCE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }

    pub fn with_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Either shape the endpoint answers with.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

impl InferenceResponse {
    fn best(self) -> Option<Prediction> {
        let candidates: Vec<Prediction> = match self {
            Self::Nested(batches) => batches.into_iter().flatten().collect(),
            Self::Flat(candidates) => candidates,
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Remote sentiment source.
pub struct InferenceClient {
    client: Client,
    config: InferenceConfig,
}

impl InferenceClient {
    #[instrument(level = "debug", skip_all, fields(
        api_url = %config.api_url,
        timeout_ms = config.timeout.as_millis() as u64
    ))]
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                warn!(error = %e, "Failed to create HTTP client");
                AegisError::InferenceError(format!("Failed to create HTTP client: {e}"))
            })?;

        info!("Inference client created");
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }
}

#[async_trait]
impl SentimentSource for InferenceClient {
    #[instrument(level = "debug", skip_all, fields(api_url = %self.config.api_url, chars = text.len()))]
    async fn predict(&self, text: &str) -> Result<Prediction> {
        let start = Instant::now();

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await
            .inspect_err(|e| {
                let latency_ms = start.elapsed().as_millis() as u64;
                warn!(error = %e, latency_ms, timeout = e.is_timeout(), "Inference request failed");
            })?;

        let status = response.status();
        debug!(status = %status, "Received inference response");

        if !status.is_success() {
            let latency_ms = start.elapsed().as_millis() as u64;
            warn!(status = %status, latency_ms, "Inference endpoint returned an error status");
            return Err(AegisError::InferenceError(format!(
                "Inference endpoint returned status: {status}"
            )));
        }

        let parsed: InferenceResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse inference response");
            AegisError::InferenceError(format!("Failed to parse inference response: {e}"))
        })?;

        let prediction = parsed.best().ok_or_else(|| {
            AegisError::InferenceError("Inference response contained no predictions".into())
        })?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            label = %prediction.label,
            score = prediction.score,
            "Inference completed"
        );

        Ok(prediction)
    }

    fn source_id(&self) -> PredictionSource {
        PredictionSource::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_of_nested_response() {
        let json = r#"[[{"label":"1 star","score":0.1},{"label":"5 stars","score":0.7},{"label":"3 stars","score":0.2}]]"#;
        let parsed: InferenceResponse = serde_json::from_str(json).unwrap();
        let best = parsed.best().unwrap();
        assert_eq!(best.label, "5 stars");
    }

    #[test]
    fn test_best_of_flat_response() {
        let json = r#"[{"label":"NEGATIVE","score":0.95},{"label":"POSITIVE","score":0.05}]"#;
        let parsed: InferenceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.best().unwrap().label, "NEGATIVE");
    }

    #[test]
    fn test_empty_response_has_no_best() {
        let parsed: InferenceResponse = serde_json::from_str("[]").unwrap();
        assert!(parsed.best().is_none());
    }

    #[test]
    fn test_error_object_is_not_a_response() {
        let json = r#"{"error":"Model is currently loading"}"#;
        assert!(serde_json::from_str::<InferenceResponse>(json).is_err());
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = InferenceConfig::new("hf_secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
