//! Offline sentiment source.

use async_trait::async_trait;

use super::{Prediction, PredictionSource, SentimentSource};
use crate::error::Result;

/// Label returned by [`MockSentiment`].
pub const MOCK_LABEL: &str = "4 stars";

/// Score returned by [`MockSentiment`].
pub const MOCK_SCORE: f64 = 0.85;

/// Fixed prediction used when no inference credential is configured.
///
/// Keeps the formatting path exercised end to end without network access.
/// The prediction does not depend on the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSentiment;

#[async_trait]
impl SentimentSource for MockSentiment {
    async fn predict(&self, _text: &str) -> Result<Prediction> {
        Ok(Prediction {
            label: MOCK_LABEL.to_string(),
            score: MOCK_SCORE,
        })
    }

    fn source_id(&self) -> PredictionSource {
        PredictionSource::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_prediction_is_fixed() {
        let a = MockSentiment.predict("great").await.unwrap();
        let b = MockSentiment.predict("terrible").await.unwrap();

        assert_eq!(a, b);
        assert_eq!(a.label, MOCK_LABEL);
        assert_eq!(MockSentiment.source_id(), PredictionSource::Mock);
    }
}
