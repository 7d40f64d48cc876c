//! Aegis Core - content fingerprinting and shallow classification
//!
//! This crate provides the analysis primitives behind the Aegis Digital upload
//! analyzer.
//!
//! # Features
//!
//! - SHA3-256 content fingerprints with an in-memory duplicate registry
//! - Image metadata heuristics (resolution, color mode, thumbnail size)
//! - Text synopsis, leading keywords and keyword insights
//! - Remote sentiment inference with an offline mock fallback (`network`)
//!
//! # Example
//!
//! ```
//! use aegis_core::{classify, Classification, FingerprintRegistry, Upload};
//!
//! let registry = FingerprintRegistry::new();
//! let upload = Upload::new(b"Hello world. This is a test. Extra sentence.", "text/plain");
//!
//! match classify(upload, &registry) {
//!     Classification::Text(report) => assert_eq!(report.summary, "Hello world. This is a test..."),
//!     other => panic!("unexpected classification: {}", other.kind()),
//! }
//! ```

pub mod classify;
pub mod error;
pub mod fingerprint;
#[cfg(feature = "network")]
pub mod sentiment;

// Re-export main types for convenience
pub use classify::{
    classify, AnalysisStatus, Classification, ImageReport, MediaCategory, TextReport,
    UnsupportedReport, Upload,
};
pub use error::{AegisError, Result};
pub use fingerprint::{Fingerprint, FingerprintRegistry};

#[cfg(feature = "network")]
pub use sentiment::{
    MockSentiment, Prediction, PredictionSource, SentimentProviderConfig,
    SentimentProviderFactory, SentimentReport, SentimentSource,
};
