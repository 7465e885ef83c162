//! LLM endpoints — lead chat, lead analysis, availability.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{AnalyzeResponse, ChatRequest, ChatResponse, LeadContext, LlmStatusResponse};

/// `POST /api/llm/chat` — conversational reply about a lead.
pub async fn chat(
    State(ctx): State<ApiContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".into()));
    }
    if req.lead_data.is_empty() {
        return Err(ApiError::BadRequest("Lead data is required".into()));
    }

    let response = ctx
        .llm
        .generate_response(&req.message, &req.lead_data, &req.conversation_history)
        .await?;

    Ok(Json(ChatResponse {
        success: true,
        message: "Response generated successfully".into(),
        response,
    }))
}

/// `POST /api/llm/analyze-lead` — structured insights for the sales team.
pub async fn analyze_lead(
    State(ctx): State<ApiContext>,
    Json(lead): Json<LeadContext>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    if lead.is_empty() {
        return Err(ApiError::BadRequest("Lead data is required".into()));
    }

    let insights = ctx.llm.analyze_lead(&lead).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        insights,
    }))
}

/// `GET /api/llm/status` — availability probe. Never errors.
pub async fn status(State(ctx): State<ApiContext>) -> Json<LlmStatusResponse> {
    let available = ctx.llm.is_available();
    Json(LlmStatusResponse {
        available,
        message: if available {
            "LLM service is available".into()
        } else {
            "LLM service is not available".into()
        },
    })
}
