//! Health check handlers
//!
//! Provides the root status message and the health endpoint used by monitoring.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Static message returned by the root endpoint.
pub const ROOT_MESSAGE: &str = "Aegis Digital AI Backend is running!";

/// Root status response
#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    #[schema(example = "Aegis Digital AI Backend is running!")]
    pub message: &'static str,
}

/// GET / - Root endpoint to check that the API is up
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = RootResponse))
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
    })
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Server version from Cargo.toml
    pub version: &'static str,
    /// Service name
    pub service: &'static str,
    /// Text analysis mode: "summary" or "sentiment"
    pub analysis_mode: &'static str,
    /// Whether a remote inference credential is configured
    pub inference_configured: bool,
    /// Distinct image fingerprints seen since startup
    pub registered_fingerprints: usize,
}

/// GET /health - Health check endpoint
///
/// Returns JSON with service status, version and analysis configuration.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service health", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "aegis-server",
        analysis_mode: state.analysis_mode.as_str(),
        inference_configured: state.inference_configured,
        registered_fingerprints: state.registry.len(),
    })
}
