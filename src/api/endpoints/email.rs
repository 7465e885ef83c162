//! Email endpoints — thin wrappers over `EmailService`.
//!
//! Collaborator failures come back as 500 with the structured
//! `{message, detail, help}` body so the operator can diagnose SMTP
//! misconfiguration from the response alone.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{ConfigureResponse, EmailConfigureRequest, EmailSendRequest};
use crate::services::email::{ConnectionOutcome, SendOutcome};

/// `POST /api/email/configure` — set sender credentials.
pub async fn configure(
    State(ctx): State<ApiContext>,
    Json(req): Json<EmailConfigureRequest>,
) -> Result<Json<ConfigureResponse>, ApiError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let name = req.name.as_deref().unwrap_or("Piazza CRM");
    ctx.email.configure(&req.email, &req.password, name);

    Ok(Json(ConfigureResponse {
        success: true,
        message: "Email configuration saved successfully".into(),
    }))
}

/// `POST /api/email/send` — send one message over SMTP.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<EmailSendRequest>,
) -> Result<Json<SendOutcome>, ApiError> {
    if req.to_email.trim().is_empty()
        || req.to_name.trim().is_empty()
        || req.subject.trim().is_empty()
        || req.message.trim().is_empty()
    {
        return Err(ApiError::BadRequest("All email fields are required".into()));
    }

    let outcome = ctx
        .email
        .send(&req.to_email, &req.to_name, &req.subject, &req.message)
        .await?;
    Ok(Json(outcome))
}

/// `POST /api/email/test` — connect + STARTTLS + authenticate.
pub async fn test(
    State(ctx): State<ApiContext>,
) -> Result<Json<ConnectionOutcome>, ApiError> {
    let outcome = ctx.email.test_connection().await?;
    Ok(Json(outcome))
}
