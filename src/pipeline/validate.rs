//! Upload validation — two-tier accept policy.
//!
//! Declared content type is checked against the MIME allow-list first; when
//! it disagrees, the filename extension acts as a fallback. A mismatch is
//! tolerated with a warning rather than rejected (intentional permissiveness,
//! matching the frontend's loose content-type reporting).

use std::path::Path;

use super::PipelineError;

/// MIME types accepted without looking at the filename.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/jpg",
];

/// Extensions accepted as a fallback when the declared type is off.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".png", ".jpg", ".jpeg"];

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    /// Declared content type is in the allow-list.
    Accepted,
    /// Content type was off, but the extension is acceptable.
    AcceptedWithWarning { declared_type: String, extension: String },
}

/// Validate an upload before anything touches disk.
///
/// Pure and synchronous — no side effects beyond a warn log for the
/// type/extension mismatch case.
pub fn validate_upload(filename: &str, content_type: &str) -> Result<Validation, PipelineError> {
    if filename.is_empty() {
        return Err(PipelineError::Rejected("No file provided".into()));
    }

    if ALLOWED_MIME_TYPES.contains(&content_type) {
        return Ok(Validation::Accepted);
    }

    let extension = Path::new(filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        tracing::warn!(
            content_type,
            extension = %extension,
            "Content type not in allow-list, accepting on extension"
        );
        return Ok(Validation::AcceptedWithWarning {
            declared_type: content_type.to_string(),
            extension,
        });
    }

    Err(PipelineError::Rejected(format!(
        "Unsupported file type: {content_type}. Supported: PDF, PNG, JPG"
    )))
}
