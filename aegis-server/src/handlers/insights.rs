//! Keyword insights handler
//!
//! Handles POST /api/analyze-file requests that carry file content as JSON text
//! and only need the keyword scan.

use aegis_core::classify::{insights, Insights};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request carrying file content as text
#[derive(Debug, Deserialize, ToSchema)]
pub struct InsightsRequest {
    /// File content to scan
    #[schema(example = "Invoice #42: payment due, password in attachment")]
    pub content: String,
}

/// Keyword insights response
#[derive(Debug, Serialize, ToSchema)]
pub struct InsightsResponse {
    #[schema(example = "success")]
    pub status: &'static str,
    #[schema(example = "File analyzed successfully.")]
    pub message: &'static str,
    /// Findings keyed by `security_alert`, `category` and `length`; absent
    /// findings are omitted
    #[schema(value_type = Object)]
    pub analysis: Insights,
}

/// Scan file content for sensitive, financial or oversized material
#[utoipa::path(
    post,
    path = "/api/analyze-file",
    tag = "Analysis",
    request_body = InsightsRequest,
    responses(
        (status = 200, description = "Content scanned", body = InsightsResponse),
        (status = 400, description = "Malformed JSON body")
    )
)]
pub async fn insights_handler(Json(request): Json<InsightsRequest>) -> Json<InsightsResponse> {
    let analysis = insights::scan(&request.content);

    tracing::debug!(
        chars = request.content.chars().count(),
        findings = !analysis.is_empty(),
        "Content scanned for insights"
    );

    Json(InsightsResponse {
        status: "success",
        message: "File analyzed successfully.",
        analysis,
    })
}
