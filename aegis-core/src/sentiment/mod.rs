//! Remote sentiment inference.
//!
//! This is the alternate text mode: instead of a synopsis, the text is sent to
//! an external inference endpoint and the returned label and confidence are
//! rendered as a human-readable block.
//!
//! ## Providers
//!
//! - **Remote** - Hugging Face style inference endpoint with a bearer credential
//! - **Mock** - fixed prediction, used when no credential is configured
//!
//! ## Failure handling
//!
//! A failed inference call is never surfaced as an error. [`analyze`] folds it
//! into a [`SentimentReport`] with `status: failed` and an `error` marker, so
//! callers always get a formatted result. There are no retries.

mod http;
mod mock;
mod provider;

pub use http::{InferenceClient, InferenceConfig, DEFAULT_INFERENCE_TIMEOUT, DEFAULT_INFERENCE_URL};
pub use mock::{MockSentiment, MOCK_LABEL, MOCK_SCORE};
pub use provider::{SentimentProviderConfig, SentimentProviderFactory};

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classify::text::PreparedText;
use crate::classify::AnalysisStatus;
use crate::error::Result;

/// Error marker carried by a report whose inference call failed.
pub const INFERENCE_UNAVAILABLE: &str = "inference_unavailable";

/// A sentiment prediction source.
///
/// Implementations must be thread-safe (`Send + Sync`) and perform at most
/// one upstream attempt per call.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Predict the sentiment of `text`.
    async fn predict(&self, text: &str) -> Result<Prediction>;

    /// Where predictions come from.
    fn source_id(&self) -> PredictionSource;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    Remote,
    Mock,
}

impl fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote inference"),
            Self::Mock => write!(f, "mock (no credential configured)"),
        }
    }
}

/// Model output: a class label and its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// Sentiment buckets that model labels are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBucket {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
    Unrecognized,
}

impl SentimentBucket {
    /// Map a model label onto a bucket.
    ///
    /// Understands star ratings (`"1 star"` .. `"5 stars"`), plain labels
    /// (`POSITIVE`, `neg`, `Neutral`, ...) and three-class `LABEL_0..2`
    /// output (negative, neutral, positive).
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();

        if let Some(stars) = label
            .strip_suffix("stars")
            .or_else(|| label.strip_suffix("star"))
            .and_then(|n| n.trim().parse::<u8>().ok())
        {
            return match stars {
                1 => Self::VeryNegative,
                2 => Self::Negative,
                3 => Self::Neutral,
                4 => Self::Positive,
                5 => Self::VeryPositive,
                _ => Self::Unrecognized,
            };
        }

        match label.as_str() {
            "very negative" | "very_negative" => Self::VeryNegative,
            "very positive" | "very_positive" => Self::VeryPositive,
            "neg" | "label_0" => Self::Negative,
            "neu" | "label_1" => Self::Neutral,
            "pos" | "label_2" => Self::Positive,
            l if l.contains("negative") => Self::Negative,
            l if l.contains("neutral") => Self::Neutral,
            l if l.contains("positive") => Self::Positive,
            _ => Self::Unrecognized,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::VeryNegative => "Very negative",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
            Self::VeryPositive => "Very positive",
            Self::Unrecognized => "Unrecognized",
        }
    }

    fn explanation(&self, label: &str) -> String {
        match self {
            Self::VeryNegative => "The content carries a strongly negative sentiment.".into(),
            Self::Negative => "The content carries a negative sentiment.".into(),
            Self::Neutral => "The content carries a neutral sentiment.".into(),
            Self::Positive => "The content carries a positive sentiment.".into(),
            Self::VeryPositive => "The content carries a strongly positive sentiment.".into(),
            Self::Unrecognized => format!("The model classified the content as '{}'.", label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            Self::High
        } else if score > 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Render a confidence score as a percentage with one decimal (`0.8512` → `"85.1%"`).
pub fn format_confidence(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Human-readable block for a prediction.
pub fn render(prediction: &Prediction) -> String {
    let bucket = SentimentBucket::from_label(&prediction.label);
    let sentiment = match bucket {
        SentimentBucket::Unrecognized => {
            format!("{} ({})", bucket.display_name(), prediction.label.to_uppercase())
        }
        _ => bucket.display_name().to_string(),
    };

    format!(
        "Sentiment analysis result\n\
         \n\
         Sentiment: {}\n\
         Confidence: {}\n\
         Explanation: {}\n\
         \n\
         The confidence shows how certain the model is about this result.",
        sentiment,
        format_confidence(prediction.score),
        bucket.explanation(&prediction.label)
    )
}

/// Sentiment classification result.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub status: AnalysisStatus,
    pub source: PredictionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_prediction: Option<Prediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<ConfidenceLevel>,
    pub user_friendly_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub truncated: bool,
}

/// Outcome of one inference attempt.
#[derive(Debug)]
pub enum SentimentOutcome {
    Predicted(Prediction),
    Failed { reason: String },
}

impl SentimentReport {
    pub fn from_outcome(
        outcome: SentimentOutcome,
        source: PredictionSource,
        text: &PreparedText,
    ) -> Self {
        match outcome {
            SentimentOutcome::Predicted(prediction) => Self {
                status: text.status(),
                source,
                sentiment: Some(SentimentBucket::from_label(&prediction.label)),
                confidence: Some(format_confidence(prediction.score)),
                confidence_level: Some(ConfidenceLevel::from_score(prediction.score)),
                user_friendly_text: render(&prediction),
                model_prediction: Some(prediction),
                error: None,
                detail: None,
                truncated: text.truncated,
            },
            SentimentOutcome::Failed { reason } => Self {
                status: AnalysisStatus::Failed,
                source,
                model_prediction: None,
                sentiment: None,
                confidence: None,
                confidence_level: None,
                user_friendly_text: format!(
                    "Sentiment analysis is currently unavailable: {}",
                    reason
                ),
                error: Some(INFERENCE_UNAVAILABLE),
                detail: Some(reason),
                truncated: text.truncated,
            },
        }
    }
}

/// Run one inference attempt for `text` and format the result.
pub async fn analyze(source: &dyn SentimentSource, text: &PreparedText) -> SentimentReport {
    let outcome = match source.predict(&text.text).await {
        Ok(prediction) => SentimentOutcome::Predicted(prediction),
        Err(e) => {
            warn!(error = %e, source = %source.source_id(), "Sentiment inference failed");
            SentimentOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    SentimentReport::from_outcome(outcome, source.source_id(), text)
}
