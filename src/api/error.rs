//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::PipelineError;
use crate::services::{EmailError, LlmError};

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
    /// A collaborator (SMTP, LLM) failed; the structured failure is
    /// re-surfaced with its detail and help text for operator diagnosis.
    #[error("{message}")]
    ServiceFailure {
        message: String,
        detail: String,
        help: Option<String>,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, detail, help) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None, None)
            }
            ApiError::Internal(msg) => {
                tracing::error!(detail = %msg, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    msg,
                    None,
                    None,
                )
            }
            ApiError::ServiceFailure {
                message,
                detail,
                help,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERVICE_FAILURE",
                message,
                Some(detail),
                help,
            ),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                detail,
                help,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Rejected(msg) => ApiError::BadRequest(msg),
            PipelineError::Staging(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::ServiceFailure {
            message: err.to_string(),
            detail: err.detail(),
            help: err.help().map(str::to_string),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        ApiError::ServiceFailure {
            message: err.to_string(),
            detail: err.to_string(),
            help: None,
        }
    }
}
