//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod analyze;
pub mod health;
pub mod insights;

pub use crate::state::AppState;
pub use analyze::{analyze_file_handler, AnalyzeResponse, AnalyzeTextRequest};
pub use health::{health, root, HealthResponse, RootResponse};
pub use insights::{insights_handler, InsightsRequest, InsightsResponse};
