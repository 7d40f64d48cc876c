//! Sentiment provider selection.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{InferenceClient, InferenceConfig, MockSentiment, SentimentSource, DEFAULT_INFERENCE_URL};
use crate::error::Result;

/// Which sentiment source to build.
#[derive(Debug, Clone)]
pub enum SentimentProviderConfig {
    /// Remote inference endpoint with a bearer credential.
    Remote(InferenceConfig),
    /// Fixed offline prediction.
    Mock,
}

impl SentimentProviderConfig {
    /// Remote when a non-blank credential is present, mock otherwise.
    pub fn from_credential(
        api_key: Option<String>,
        api_url: Option<String>,
        timeout: Duration,
    ) -> Self {
        match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Self::Remote(
                InferenceConfig::new(key)
                    .with_url(api_url.unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string()))
                    .with_timeout(timeout),
            ),
            None => Self::Mock,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Builds sentiment sources from configuration.
pub struct SentimentProviderFactory;

impl SentimentProviderFactory {
    pub fn create(config: SentimentProviderConfig) -> Result<Arc<dyn SentimentSource>> {
        match config {
            SentimentProviderConfig::Remote(inference) => {
                info!(api_url = %inference.api_url, "Using remote sentiment inference");
                Ok(Arc::new(InferenceClient::new(inference)?))
            }
            SentimentProviderConfig::Mock => {
                warn!("No inference credential configured, using mock sentiment predictions");
                Ok(Self::create_mock())
            }
        }
    }

    pub fn create_mock() -> Arc<dyn SentimentSource> {
        Arc::new(MockSentiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::PredictionSource;

    #[test]
    fn test_missing_credential_selects_mock() {
        let config = SentimentProviderConfig::from_credential(None, None, Duration::from_secs(1));
        assert!(!config.is_remote());

        let blank = SentimentProviderConfig::from_credential(
            Some("   ".into()),
            None,
            Duration::from_secs(1),
        );
        assert!(!blank.is_remote());

        let source = SentimentProviderFactory::create(blank).unwrap();
        assert_eq!(source.source_id(), PredictionSource::Mock);
    }

    #[test]
    fn test_credential_selects_remote() {
        let config = SentimentProviderConfig::from_credential(
            Some("hf_token".into()),
            Some("http://localhost:9/model".into()),
            Duration::from_secs(3),
        );

        match &config {
            SentimentProviderConfig::Remote(inference) => {
                assert_eq!(inference.api_url, "http://localhost:9/model");
                assert_eq!(inference.timeout, Duration::from_secs(3));
            }
            SentimentProviderConfig::Mock => panic!("expected remote provider"),
        }

        let source = SentimentProviderFactory::create(config).unwrap();
        assert_eq!(source.source_id(), PredictionSource::Remote);
    }

    #[test]
    fn test_default_url_when_unset() {
        let config =
            SentimentProviderConfig::from_credential(Some("k".into()), None, Duration::from_secs(1));
        match config {
            SentimentProviderConfig::Remote(inference) => {
                assert_eq!(inference.api_url, DEFAULT_INFERENCE_URL)
            }
            SentimentProviderConfig::Mock => panic!("expected remote provider"),
        }
    }
}
