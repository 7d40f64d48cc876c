//! Server configuration module
//!
//! Handles loading configuration from environment variables with sensible defaults.

use std::net::SocketAddr;
use std::time::Duration;

use aegis_core::SentimentProviderConfig;

/// Which analysis runs on text content.
///
/// The two modes are mutually exclusive: a server either summarizes text or
/// sends it for sentiment inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    /// Synopsis, leading keywords and keyword insights.
    #[default]
    Summary,
    /// Remote sentiment inference (mock predictions without a credential).
    Sentiment,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Sentiment => "sentiment",
        }
    }

    /// Parse a mode name; unknown values fall back to `Summary`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "sentiment" => Self::Sentiment,
            "summary" => Self::Summary,
            other => {
                tracing::warn!("Unknown ANALYSIS_MODE '{}', using summary", other);
                Self::Summary
            }
        }
    }
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 8000)
    pub port: u16,
    /// Server host (default: 127.0.0.1)
    pub host: [u8; 4],
    /// Allowed CORS origins, comma-separated (default: allow all)
    pub allowed_origins: Option<Vec<String>>,
    /// Request body limit in MB (default: 50)
    pub body_limit_mb: usize,
    /// Maximum file size per upload in MB (default: 25)
    pub max_file_size_mb: usize,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Text analysis mode (default: summary)
    pub analysis_mode: AnalysisMode,
    /// Bearer credential for the inference endpoint (mock predictions when unset)
    pub inference_api_key: Option<String>,
    /// Inference endpoint URL (default: Hugging Face sentiment model)
    pub inference_url: Option<String>,
    /// Inference request timeout in seconds (default: 10)
    pub inference_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            host: [127, 0, 0, 1],
            allowed_origins: None, // None = allow all
            body_limit_mb: 50,
            max_file_size_mb: 25,
            timeout_secs: 30,
            analysis_mode: AnalysisMode::Summary,
            inference_api_key: None,
            inference_url: None,
            inference_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let host = std::env::var("HOST")
            .ok()
            .map(|h| {
                if h == "0.0.0.0" {
                    [0, 0, 0, 0]
                } else {
                    [127, 0, 0, 1]
                }
            })
            .unwrap_or([127, 0, 0, 1]);

        let allowed_origins = std::env::var("ALLOWED_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let body_limit_mb = std::env::var("BODY_LIMIT_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(25);

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let analysis_mode = std::env::var("ANALYSIS_MODE")
            .map(|v| AnalysisMode::from_name(&v))
            .unwrap_or_default();

        let inference_api_key = std::env::var("HUGGINGFACE_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let inference_url = std::env::var("INFERENCE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());

        let inference_timeout_secs = std::env::var("INFERENCE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Self {
            port,
            host,
            allowed_origins,
            body_limit_mb,
            max_file_size_mb,
            timeout_secs,
            analysis_mode,
            inference_api_key,
            inference_url,
            inference_timeout_secs,
        }
    }

    /// Get socket address from config
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }

    /// Maximum size of a single uploaded file in bytes
    pub fn max_file_size(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Sentiment provider selection derived from the credential settings
    pub fn sentiment_provider(&self) -> SentimentProviderConfig {
        SentimentProviderConfig::from_credential(
            self.inference_api_key.clone(),
            self.inference_url.clone(),
            Duration::from_secs(self.inference_timeout_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.analysis_mode, AnalysisMode::Summary);
        assert!(config.inference_api_key.is_none());
        assert_eq!(config.max_file_size(), 25 * 1024 * 1024);
    }

    #[test]
    fn test_analysis_mode_names() {
        assert_eq!(AnalysisMode::from_name("sentiment"), AnalysisMode::Sentiment);
        assert_eq!(AnalysisMode::from_name(" SENTIMENT "), AnalysisMode::Sentiment);
        assert_eq!(AnalysisMode::from_name("summary"), AnalysisMode::Summary);
        assert_eq!(AnalysisMode::from_name("both"), AnalysisMode::Summary);
        assert_eq!(AnalysisMode::Sentiment.as_str(), "sentiment");
    }

    #[test]
    fn test_sentiment_provider_without_credential_is_mock() {
        let config = Config::default();
        assert!(!config.sentiment_provider().is_remote());

        let config = Config {
            inference_api_key: Some("hf_token".into()),
            ..Config::default()
        };
        assert!(config.sentiment_provider().is_remote());
    }

    #[test]
    fn test_socket_addr() {
        let config = Config {
            host: [0, 0, 0, 0],
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
    }
}
