//! Health check endpoints.

use axum::extract::State;
use axum::Json;

use crate::api::types::ApiContext;
use crate::config::APP_VERSION;
use crate::models::HealthResponse;

/// `GET /` — liveness check.
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("Piazza CRM backend is running"))
}

/// `GET /health` — detailed check including the extraction engine.
///
/// Never errors: an unreachable engine degrades the payload to
/// `status: "unhealthy"` instead of failing the probe.
pub async fn detailed(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    match ctx.gateway.engine().health_check().await {
        Ok(engine_status) => {
            let details = serde_json::json!({
                "ocr_processor": engine_status,
                "upload_dir": ctx.settings.upload_dir.display().to_string(),
                "api_version": APP_VERSION,
            });
            Json(HealthResponse::healthy("All systems operational").with_details(details))
        }
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Json(HealthResponse::unhealthy(&format!("System error: {e}")))
        }
    }
}
