//! Text synopsis and keyword extraction.

use serde::Serialize;
use tracing::{debug, warn};

use super::insights::{self, Insights};
use super::AnalysisStatus;

/// Content beyond this many characters is cut before analysis.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Appended to content that was cut at [`MAX_TEXT_CHARS`].
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Synopsis for empty content.
pub const EMPTY_SUMMARY: &str = "No content to summarize.";

/// Number of leading tokens returned as keywords.
pub const KEYWORD_LIMIT: usize = 5;

/// Where the analyzed text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// The payload decoded as UTF-8.
    Decoded,
    /// The payload was not UTF-8; a description of it was used instead.
    Fallback,
}

/// Text ready for analysis: decoded (or substituted) and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    pub text: String,
    pub source: TextSource,
    pub truncated: bool,
}

impl PreparedText {
    pub fn status(&self) -> AnalysisStatus {
        match self.source {
            TextSource::Decoded => AnalysisStatus::Complete,
            TextSource::Fallback => AnalysisStatus::Degraded,
        }
    }
}

/// Decode `bytes` as UTF-8, or describe the payload when it is not text.
pub fn decode(bytes: &[u8], filename: Option<&str>, declared_type: &str) -> (String, TextSource) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_owned(), TextSource::Decoded),
        Err(e) => {
            warn!(
                error = %e,
                bytes = bytes.len(),
                declared_type,
                "Text payload is not valid UTF-8, using description"
            );
            (
                fallback_description(filename, bytes.len(), declared_type),
                TextSource::Fallback,
            )
        }
    }
}

fn fallback_description(filename: Option<&str>, len: usize, declared_type: &str) -> String {
    format!(
        "Binary or non-UTF-8 content in '{}' ({} bytes, declared as {})",
        filename.unwrap_or("unnamed"),
        len,
        declared_type
    )
}

/// Cut `text` to [`MAX_TEXT_CHARS`] characters, appending the marker when cut.
pub fn truncate(text: String) -> (String, bool) {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((cut, _)) => {
            let mut bounded = text[..cut].to_owned();
            bounded.push_str(TRUNCATION_MARKER);
            (bounded, true)
        }
        None => (text, false),
    }
}

/// Decode and bound a text payload.
pub fn prepare(bytes: &[u8], filename: Option<&str>, declared_type: &str) -> PreparedText {
    let (text, source) = decode(bytes, filename, declared_type);
    let (text, truncated) = truncate(text);
    PreparedText {
        text,
        source,
        truncated,
    }
}

/// Two-sentence synopsis.
///
/// The text is split on `.` into trimmed, non-empty segments. With more than
/// two segments the synopsis is the first two joined by `". "` and followed by
/// `"..."`; otherwise the text is returned unchanged.
pub fn summarize(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.len() > 2 {
        format!("{}. {}...", sentences[0], sentences[1])
    } else {
        text.to_string()
    }
}

/// First [`KEYWORD_LIMIT`] whitespace-separated tokens, in order.
pub fn keywords(text: &str) -> Vec<String> {
    text.split_whitespace()
        .take(KEYWORD_LIMIT)
        .map(str::to_owned)
        .collect()
}

/// Text classification result.
#[derive(Debug, Clone, Serialize)]
pub struct TextReport {
    pub status: AnalysisStatus,
    pub summary: String,
    pub keywords: Vec<String>,
    pub insights: Insights,
    pub truncated: bool,
}

/// Summarize a text payload.
///
/// Keyword insights are taken from the full decoded text; the synopsis and
/// keywords from the bounded text.
pub fn analyze(bytes: &[u8], filename: Option<&str>, declared_type: &str) -> TextReport {
    let (text, source) = decode(bytes, filename, declared_type);
    let insights = insights::scan(&text);
    let (text, truncated) = truncate(text);

    let prepared = PreparedText {
        text,
        source,
        truncated,
    };

    debug!(
        chars = prepared.text.chars().count(),
        truncated,
        fallback = (source == TextSource::Fallback),
        "Text analyzed"
    );

    TextReport {
        status: prepared.status(),
        summary: summarize(&prepared.text),
        keywords: keywords(&prepared.text),
        insights,
        truncated: prepared.truncated,
    }
}
