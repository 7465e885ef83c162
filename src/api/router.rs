//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Document, lead, email, and LLM routes live under `/api/`; health probes
//! at the root. CORS is wide open (browser frontend on a different port)
//! and bodies are capped at the advertised 10 MB upload limit.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Upload cap, matching the `/api/supported-formats` payload.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the full API router from pre-constructed dependencies.
pub fn api_router(ctx: ApiContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(endpoints::health::root))
        .route("/health", get(endpoints::health::detailed))
        .route(
            "/api/process-document-enhanced",
            post(endpoints::documents::process_enhanced),
        )
        .route(
            "/api/process-document",
            post(endpoints::documents::process_basic),
        )
        .route(
            "/api/supported-formats",
            get(endpoints::documents::supported_formats),
        )
        .route("/api/create-lead", post(endpoints::leads::create))
        .route("/api/email/configure", post(endpoints::email::configure))
        .route("/api/email/send", post(endpoints::email::send))
        .route("/api/email/test", post(endpoints::email::test))
        .route("/api/llm/chat", post(endpoints::llm::chat))
        .route("/api/llm/analyze-lead", post(endpoints::llm::analyze_lead))
        .route("/api/llm/status", get(endpoints::llm::status))
        .with_state(ctx)
        // axum's built-in 2 MB cap would reject valid uploads before the
        // tower-http layer sees them.
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
}
