//! Lead creation endpoint (simulated persistence).

use axum::Json;

use crate::api::error::ApiError;
use crate::models::{CreateLeadResponse, LeadData, LeadRecord};

/// `POST /api/create-lead` — echo a new lead with generated id.
///
/// No durable store exists behind this; the record lives only in the
/// response.
pub async fn create(Json(data): Json<LeadData>) -> Result<Json<CreateLeadResponse>, ApiError> {
    if data.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Lead name is required".into()));
    }

    let lead = LeadRecord::from_data(data);
    tracing::info!(lead_id = %lead.id, name = %lead.name, "Created lead");

    Ok(Json(CreateLeadResponse {
        success: true,
        message: "Lead created successfully".into(),
        lead,
    }))
}
