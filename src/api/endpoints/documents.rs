//! Document processing endpoints.
//!
//! `POST /api/process-document-enhanced` — multipart upload → full
//! `ExtractionResult` (enhanced shape).
//! `POST /api/process-document` — same pipeline, reduced "basic" projection.
//! `GET /api/supported-formats` — static format metadata.
//!
//! Both processing endpoints return 200 even when extraction degraded
//! (`success: false` body); 4xx/5xx are reserved for validation and staging
//! failures.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::SupportedFormats;
use crate::pipeline::{self, ExtractionResult, ProcessingResponse, ReceivedUpload};

/// `POST /api/process-document-enhanced` — enhanced shape with preview and
/// processing metadata.
pub async fn process_enhanced(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ExtractionResult>, ApiError> {
    let upload = read_upload(multipart).await?;
    let result =
        pipeline::process_upload(&ctx.gateway, &ctx.settings.upload_dir, upload).await?;
    Ok(Json(result))
}

/// `POST /api/process-document` — basic shape. Same pipeline, narrower view.
pub async fn process_basic(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<ProcessingResponse>, ApiError> {
    let upload = read_upload(multipart).await?;
    let result =
        pipeline::process_upload(&ctx.gateway, &ctx.settings.upload_dir, upload).await?;
    Ok(Json(result.to_basic()))
}

/// `GET /api/supported-formats` — descriptive payload, no logic.
pub async fn supported_formats() -> Json<SupportedFormats> {
    Json(SupportedFormats::current())
}

/// Pull the uploaded file out of the multipart body.
///
/// Accepts the conventional `file` field, or the first field that carries a
/// filename. A body without a file part is a client error.
async fn read_upload(mut multipart: Multipart) -> Result<ReceivedUpload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let is_file = field.name() == Some("file") || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

        tracing::info!(
            filename = %filename,
            content_type = %content_type,
            bytes = bytes.len(),
            "Received file"
        );

        return Ok(ReceivedUpload {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::BadRequest("No file provided".into()))
}
