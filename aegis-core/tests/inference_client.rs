//! Remote sentiment inference tests against a mock HTTP endpoint.

#![cfg(feature = "network")]

use std::time::Duration;

use aegis_core::classify::text::prepare;
use aegis_core::sentiment::{
    analyze, InferenceClient, InferenceConfig, SentimentBucket, INFERENCE_UNAVAILABLE,
};
use aegis_core::{AegisError, AnalysisStatus, PredictionSource, SentimentSource};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/sentiment";

fn client_for(server: &MockServer, timeout: Duration) -> InferenceClient {
    let config = InferenceConfig::new("hf_test_token")
        .with_url(format!("{}{}", server.uri(), MODEL_PATH))
        .with_timeout(timeout);
    InferenceClient::new(config).expect("client should build")
}

#[tokio::test]
async fn test_prediction_sent_with_bearer_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("authorization", "Bearer hf_test_token"))
        .and(body_json(serde_json::json!({ "inputs": "What a great day" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
            { "label": "5 stars", "score": 0.8123 },
            { "label": "4 stars", "score": 0.1500 },
            { "label": "1 star", "score": 0.0377 }
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let text = prepare(b"What a great day", None, "text/plain");
    let report = analyze(&client, &text).await;

    assert_eq!(report.status, AnalysisStatus::Complete);
    assert_eq!(report.source, PredictionSource::Remote);
    assert_eq!(report.sentiment, Some(SentimentBucket::VeryPositive));
    assert_eq!(report.confidence.as_deref(), Some("81.2%"));
    assert!(report.user_friendly_text.contains("Very positive"));
}

#[tokio::test]
async fn test_error_status_becomes_marked_report() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": "Model is currently loading" })),
        )
        // A single attempt, no retries.
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let text = prepare(b"anything", None, "text/plain");
    let report = analyze(&client, &text).await;

    assert_eq!(report.status, AnalysisStatus::Failed);
    assert_eq!(report.error, Some(INFERENCE_UNAVAILABLE));
    assert!(report.detail.as_deref().unwrap().contains("503"));
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let result = client.predict("hello").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_slow_upstream_is_bounded_by_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "label": "POSITIVE", "score": 0.9 }]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    let started = std::time::Instant::now();
    let text = prepare(b"hello", None, "text/plain");
    let report = analyze(&client, &text).await;

    assert_eq!(report.status, AnalysisStatus::Failed);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_reported() {
    let config = InferenceConfig::new("hf_test_token")
        .with_url("http://127.0.0.1:9/models/sentiment")
        .with_timeout(Duration::from_secs(2));
    let client = InferenceClient::new(config).unwrap();

    let text = prepare(b"hello", None, "text/plain");
    let report = analyze(&client, &text).await;

    assert_eq!(report.error, Some(INFERENCE_UNAVAILABLE));
    assert!(report.model_prediction.is_none());
    assert!(report.detail.as_deref().unwrap().starts_with("HTTP request error"));
}

#[tokio::test]
async fn test_transport_failure_keeps_reqwest_error() {
    let config = InferenceConfig::new("hf_test_token")
        .with_url("http://127.0.0.1:9/models/sentiment")
        .with_timeout(Duration::from_secs(2));
    let client = InferenceClient::new(config).unwrap();

    let err = client.predict("hello").await.unwrap_err();

    assert!(matches!(err, AegisError::HttpError(_)));
}
