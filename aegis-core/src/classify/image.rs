//! Image metadata heuristics.
//!
//! The image is decoded only to read its dimensions and color type. Tagging
//! rules are evaluated independently and every applicable tag is emitted:
//!
//! | Rule                                | Tag               |
//! |-------------------------------------|-------------------|
//! | width > 1000 and height > 1000      | `high_resolution` |
//! | color type has color channels       | `color_image`     |
//! | otherwise                           | `grayscale_image` |
//! | width < 100 or height < 100         | `thumbnail_size`  |
//!
//! Undecodable bytes produce the single tag `analysis_failed`.

use serde::Serialize;
use tracing::{debug, warn};

use super::AnalysisStatus;
use crate::error::AegisError;
use crate::fingerprint::{Fingerprint, FingerprintRegistry};

/// Both sides must exceed this for `high_resolution`.
pub const HIGH_RESOLUTION_MIN: u32 = 1000;

/// Either side below this gives `thumbnail_size`.
pub const THUMBNAIL_MAX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageTag {
    HighResolution,
    ColorImage,
    GrayscaleImage,
    ThumbnailSize,
    AnalysisFailed,
}

impl ImageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighResolution => "high_resolution",
            Self::ColorImage => "color_image",
            Self::GrayscaleImage => "grayscale_image",
            Self::ThumbnailSize => "thumbnail_size",
            Self::AnalysisFailed => "analysis_failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Color,
    Grayscale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeTier {
    HighResolution,
    Standard,
    Thumbnail,
}

/// Decoded image properties the heuristics work on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTraits {
    pub width: u32,
    pub height: u32,
    pub color_mode: ColorMode,
}

impl ImageTraits {
    pub fn size_tier(&self) -> SizeTier {
        if self.width > HIGH_RESOLUTION_MIN && self.height > HIGH_RESOLUTION_MIN {
            SizeTier::HighResolution
        } else if self.width < THUMBNAIL_MAX || self.height < THUMBNAIL_MAX {
            SizeTier::Thumbnail
        } else {
            SizeTier::Standard
        }
    }

    pub fn tags(&self) -> Vec<ImageTag> {
        let mut tags = Vec::with_capacity(3);

        if self.width > HIGH_RESOLUTION_MIN && self.height > HIGH_RESOLUTION_MIN {
            tags.push(ImageTag::HighResolution);
        }

        tags.push(match self.color_mode {
            ColorMode::Color => ImageTag::ColorImage,
            ColorMode::Grayscale => ImageTag::GrayscaleImage,
        });

        if self.width < THUMBNAIL_MAX || self.height < THUMBNAIL_MAX {
            tags.push(ImageTag::ThumbnailSize);
        }

        tags
    }
}

/// Outcome of decoding an image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Analyzed(ImageTraits),
    Failed { reason: String },
}

/// Decode `bytes` and read the traits used for tagging.
pub fn inspect(bytes: &[u8]) -> ImageOutcome {
    match ::image::load_from_memory(bytes) {
        Ok(decoded) => {
            let color_mode = if decoded.color().has_color() {
                ColorMode::Color
            } else {
                ColorMode::Grayscale
            };
            ImageOutcome::Analyzed(ImageTraits {
                width: decoded.width(),
                height: decoded.height(),
                color_mode,
            })
        }
        Err(e) => {
            let err = AegisError::ImageDecode(e.to_string());
            warn!(error = %err, bytes = bytes.len(), "Failed to decode image");
            ImageOutcome::Failed {
                reason: err.to_string(),
            }
        }
    }
}

/// Image classification result.
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    pub status: AnalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_tier: Option<SizeTier>,
    pub tags: Vec<ImageTag>,
    pub is_duplicate: bool,
    pub fingerprint: Fingerprint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ImageReport {
    /// Assemble the report for an already-decoded outcome.
    pub fn from_outcome(outcome: ImageOutcome, fingerprint: Fingerprint, is_duplicate: bool) -> Self {
        match outcome {
            ImageOutcome::Analyzed(traits) => Self {
                status: AnalysisStatus::Complete,
                width: Some(traits.width),
                height: Some(traits.height),
                color_mode: Some(traits.color_mode),
                size_tier: Some(traits.size_tier()),
                tags: traits.tags(),
                is_duplicate,
                fingerprint,
                detail: None,
            },
            ImageOutcome::Failed { reason } => Self {
                status: AnalysisStatus::Failed,
                width: None,
                height: None,
                color_mode: None,
                size_tier: None,
                tags: vec![ImageTag::AnalysisFailed],
                is_duplicate,
                fingerprint,
                detail: Some(reason),
            },
        }
    }
}

/// Fingerprint the payload, record it in `registry`, then tag it.
///
/// The duplicate check runs on the raw bytes, so undecodable payloads are
/// still registered.
pub fn analyze(bytes: &[u8], registry: &FingerprintRegistry) -> ImageReport {
    let fingerprint = Fingerprint::of(bytes);
    let is_duplicate = registry.check_and_register(fingerprint);
    let outcome = inspect(bytes);

    debug!(
        fingerprint = %fingerprint,
        is_duplicate,
        decoded = matches!(outcome, ImageOutcome::Analyzed(_)),
        "Image analyzed"
    );

    ImageReport::from_outcome(outcome, fingerprint, is_duplicate)
}
