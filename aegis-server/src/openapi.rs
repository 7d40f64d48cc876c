//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3.0 document for the Aegis Digital analysis API.

use utoipa::OpenApi;

use crate::handlers::{
    AnalyzeResponse, AnalyzeTextRequest, HealthResponse, InsightsRequest, InsightsResponse,
    RootResponse,
};

/// Aegis Digital AI Backend - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Aegis Digital - AI Backend",
        version = "0.1.0",
        description = r#"
## Shallow Content Analysis for Uploaded Files

Aegis Digital inspects uploads and returns a quick analysis keyed on the
declared media type:

- **Images** - resolution, color mode and size tier tags, plus a duplicate flag
  from SHA3-256 content fingerprints
- **Text** - a two-sentence synopsis and the first five words, or a sentiment
  rating when the server runs in sentiment mode
- **Keyword insights** - sensitive, financial and oversized content flags

Duplicate detection is per process: fingerprints live in memory only and are
forgotten on restart.
"#,
        license(name = "MIT OR Apache-2.0")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    tags(
        (name = "Analysis", description = "Analyze uploaded files and text"),
        (name = "Health", description = "Service health endpoints")
    ),
    paths(
        crate::handlers::health::root,
        crate::handlers::health::health,
        crate::handlers::analyze::analyze_file_handler,
        crate::handlers::insights::insights_handler,
    ),
    components(
        schemas(
            RootResponse,
            HealthResponse,
            AnalyzeTextRequest,
            AnalyzeResponse,
            InsightsRequest,
            InsightsResponse,
        )
    )
)]
pub struct ApiDoc;
