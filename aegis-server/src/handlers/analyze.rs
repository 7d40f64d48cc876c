//! File analysis handler
//!
//! Handles POST /analyze-file requests carrying either a multipart upload or a
//! JSON body with raw text.

use std::sync::Arc;

use aegis_core::classify::{normalize_declared, text, MediaCategory};
use aegis_core::{classify, sentiment, Classification, FingerprintRegistry, Upload};
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AnalysisMode;
use crate::error::ApiError;
use crate::multipart::MultipartFields;
use crate::state::AppState;
use crate::validation::{sanitize_filename, validate_file_size};

/// Declared type for raw text submissions.
pub const TEXT_DECLARED_TYPE: &str = "text/plain";

/// JSON body carrying raw text
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeTextRequest {
    /// Text to analyze
    #[schema(example = "Hello world. This is a test. Extra sentence.")]
    pub content: String,
    /// Optional name reported back in the response
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response envelope for an analysis
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Uploaded filename, when one was sent
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "photo.png")]
    pub filename: Option<String>,
    /// Declared media type of the submission
    #[schema(example = "image/png")]
    pub file_type: String,
    /// Analysis result; its shape depends on the `kind` field
    /// (`image`, `text`, `unsupported` or `sentiment`)
    #[schema(value_type = Object)]
    pub ai_analysis: Classification,
}

/// Content submitted for analysis, whatever the request encoding.
#[derive(Debug)]
struct Submission {
    bytes: Vec<u8>,
    declared_type: String,
    filename: Option<String>,
}

/// Analyze an uploaded file or raw text
///
/// Accepts either:
/// - **multipart/form-data** with a `file` part (its Content-Type is the declared
///   type) or a `content` text field
/// - **application/json** with `{"content": "...", "filename"?: "..."}`
///
/// Dispatch follows the declared type:
/// - `image/*`: resolution, color mode and size tags plus a duplicate flag
/// - `text/*`: synopsis and keywords, or sentiment when the server runs in
///   sentiment mode
/// - anything else: a fixed "not supported" message
#[utoipa::path(
    post,
    path = "/analyze-file",
    tag = "Analysis",
    request_body(
        content_type = "multipart/form-data",
        description = "File to analyze (a JSON body with `content` is also accepted)"
    ),
    responses(
        (status = 200, description = "Analysis completed", body = AnalyzeResponse),
        (status = 400, description = "Invalid request (no file, malformed body)"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Body is neither multipart nor JSON"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn analyze_file_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Submission {
        bytes,
        declared_type,
        filename,
    } = read_submission(&state, request).await?;
    let file_type = normalize_declared(&declared_type);
    let size = bytes.len();

    let ai_analysis = run_analysis(&state, bytes, filename.clone(), &file_type).await?;

    tracing::info!(
        filename = filename.as_deref().unwrap_or("-"),
        file_type = %file_type,
        bytes = size,
        kind = ai_analysis.kind(),
        "File analyzed"
    );

    Ok(Json(AnalyzeResponse {
        filename,
        file_type,
        ai_analysis,
    }))
}

async fn read_submission(state: &AppState, request: Request) -> Result<Submission, ApiError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart request: {}", e)))?;
        let mut fields = MultipartFields::parse(&mut multipart, state.max_file_size).await?;

        if let Some(file) = fields.take_file() {
            return Ok(Submission {
                bytes: file.data,
                declared_type: file.content_type.unwrap_or_default(),
                filename: file.file_name,
            });
        }

        let content = fields.take_text("content").ok_or_else(|| {
            ApiError::bad_request("No file provided. Use 'file' field in multipart form.")
        })?;
        validate_file_size(content.len(), state.max_file_size)?;

        Ok(Submission {
            bytes: content.into_bytes(),
            declared_type: TEXT_DECLARED_TYPE.to_string(),
            filename: sanitize_filename(fields.get_text("filename")),
        })
    } else if content_type.starts_with("application/json") {
        let Json(body) = Json::<AnalyzeTextRequest>::from_request(request, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e.body_text())))?;
        validate_file_size(body.content.len(), state.max_file_size)?;

        Ok(Submission {
            bytes: body.content.into_bytes(),
            declared_type: TEXT_DECLARED_TYPE.to_string(),
            filename: sanitize_filename(body.filename.as_deref()),
        })
    } else {
        Err(ApiError::unsupported_media_type(format!(
            "Expected multipart/form-data or application/json, got '{}'",
            content_type
        )))
    }
}

async fn run_analysis(
    state: &AppState,
    bytes: Vec<u8>,
    filename: Option<String>,
    file_type: &str,
) -> Result<Classification, ApiError> {
    let category = MediaCategory::from_declared(file_type);

    if category == MediaCategory::Text && state.analysis_mode == AnalysisMode::Sentiment {
        let prepared = text::prepare(&bytes, filename.as_deref(), file_type);
        let report = sentiment::analyze(state.sentiment.as_ref(), &prepared).await;
        return Ok(Classification::Sentiment(report));
    }

    // Image decoding is CPU-bound; keep it off the async workers.
    let registry: Arc<FingerprintRegistry> = Arc::clone(&state.registry);
    let declared_type = file_type.to_string();

    tokio::task::spawn_blocking(move || {
        let upload = Upload::new(&bytes, &declared_type).with_filename(filename.as_deref());
        classify(upload, &registry)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Analysis task failed: {}", e)))
}
