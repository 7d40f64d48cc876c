//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use aegis_core::{FingerprintRegistry, SentimentProviderFactory, SentimentSource};

use crate::config::{AnalysisMode, Config};

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Fingerprints of every image analyzed by this server instance.
    ///
    /// In memory only: created with the router, dropped with it, never
    /// persisted. A restart forgets all previously seen images.
    pub registry: Arc<FingerprintRegistry>,
    /// Sentiment source used in sentiment mode
    pub sentiment: Arc<dyn SentimentSource>,
    /// Text analysis mode
    pub analysis_mode: AnalysisMode,
    /// Whether a remote inference credential is configured
    pub inference_configured: bool,
    /// Maximum size of a single uploaded file in bytes
    pub max_file_size: usize,
}

impl AppState {
    /// Build state from configuration with a fresh, empty registry.
    ///
    /// Falls back to mock sentiment predictions if the inference client
    /// cannot be built.
    pub fn from_config(config: &Config) -> Self {
        let provider = config.sentiment_provider();
        let inference_configured = provider.is_remote();

        let sentiment = SentimentProviderFactory::create(provider).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Inference client unavailable, using mock predictions");
            SentimentProviderFactory::create_mock()
        });

        Self {
            registry: Arc::new(FingerprintRegistry::new()),
            sentiment,
            analysis_mode: config.analysis_mode,
            inference_configured,
            max_file_size: config.max_file_size(),
        }
    }
}
