//! Shallow, deterministic content classification.
//!
//! Dispatch is decided once from the caller-declared media type (never from
//! sniffing the bytes) and each category has its own pure analysis function:
//!
//! - **image**: decoded metadata heuristics plus duplicate detection
//! - **text**: synopsis, leading keywords and keyword insights
//! - **other**: a fixed "not supported" answer
//!
//! Failures inside an analysis are reported as an [`AnalysisStatus`] on the
//! result instead of an error, so classification itself never fails.

pub mod image;
pub mod insights;
pub mod text;

use serde::Serialize;

use crate::fingerprint::FingerprintRegistry;

pub use self::image::{ColorMode, ImageOutcome, ImageReport, ImageTag, ImageTraits, SizeTier};
pub use self::insights::Insights;
pub use self::text::{PreparedText, TextReport, TextSource};

#[cfg(feature = "network")]
use crate::sentiment::SentimentReport;

/// Declared type used when the caller did not send one.
pub const DEFAULT_DECLARED_TYPE: &str = "application/octet-stream";

/// Answer for media categories that have no analysis path.
pub const UNSUPPORTED_MESSAGE: &str = "File type not supported for AI analysis.";

/// Media category resolved from a declared MIME-like type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCategory {
    Image,
    Text,
    /// Anything else; keeps the declared string for the response.
    Other(String),
}

impl MediaCategory {
    /// Resolve the category from the primary part of a declared type
    /// (`"image/png"` → `Image`). Case-insensitive; parameters are ignored.
    pub fn from_declared(declared: &str) -> Self {
        let primary = declared
            .split('/')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match primary.as_str() {
            "image" => Self::Image,
            "text" => Self::Text,
            _ => Self::Other(normalize_declared(declared)),
        }
    }
}

/// Fall back to [`DEFAULT_DECLARED_TYPE`] for a missing or blank type.
pub fn normalize_declared(declared: &str) -> String {
    let trimmed = declared.trim();
    if trimmed.is_empty() {
        DEFAULT_DECLARED_TYPE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// How far an analysis got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// Full analysis of the submitted content.
    Complete,
    /// Analysis ran on a substitute of the content.
    Degraded,
    /// Analysis could not run; the result carries a marker instead.
    Failed,
}

/// Result for a category without an analysis path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedReport {
    pub message: &'static str,
    pub file_type: String,
}

impl UnsupportedReport {
    pub fn new(declared: &str) -> Self {
        Self {
            message: UNSUPPORTED_MESSAGE,
            file_type: normalize_declared(declared),
        }
    }
}

/// Classification of one submission, tagged by the path that produced it.
///
/// The `sentiment` variant exists only with the `network` feature.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Classification {
    Image(ImageReport),
    Text(TextReport),
    Unsupported(UnsupportedReport),
    #[cfg(feature = "network")]
    Sentiment(SentimentReport),
}

impl Classification {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Text(_) => "text",
            Self::Unsupported(_) => "unsupported",
            #[cfg(feature = "network")]
            Self::Sentiment(_) => "sentiment",
        }
    }
}

/// A submission as seen by the classifier.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub bytes: &'a [u8],
    pub declared_type: &'a str,
    pub filename: Option<&'a str>,
}

impl<'a> Upload<'a> {
    pub fn new(bytes: &'a [u8], declared_type: &'a str) -> Self {
        Self {
            bytes,
            declared_type,
            filename: None,
        }
    }

    pub fn with_filename(mut self, filename: Option<&'a str>) -> Self {
        self.filename = filename;
        self
    }

    pub fn category(&self) -> MediaCategory {
        MediaCategory::from_declared(self.declared_type)
    }
}

/// Classify a submission in keyword/summary mode.
///
/// Images are fingerprinted and checked against `registry`; text and other
/// categories never touch it.
pub fn classify(upload: Upload<'_>, registry: &FingerprintRegistry) -> Classification {
    match upload.category() {
        MediaCategory::Image => Classification::Image(image::analyze(upload.bytes, registry)),
        MediaCategory::Text => Classification::Text(text::analyze(
            upload.bytes,
            upload.filename,
            upload.declared_type,
        )),
        MediaCategory::Other(declared) => {
            Classification::Unsupported(UnsupportedReport::new(&declared))
        }
    }
}
