use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Contact fields extracted from a lead document.
///
/// Every field is always present — callers never branch on absence.
/// Unknown engine fields (company, title, ...) ride along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: "N/A".to_string(),
            extra: BTreeMap::new(),
        }
    }
}

/// How the extraction ran, carried alongside the fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    pub document_type: String,
    pub processing_time_seconds: f32,
    pub methods_used: Vec<String>,
}

impl Default for ProcessingMetadata {
    fn default() -> Self {
        Self {
            document_type: "unknown".to_string(),
            processing_time_seconds: 0.0,
            methods_used: Vec::new(),
        }
    }
}

/// The single stable outcome of the extraction pipeline.
///
/// Produced for every upload that reaches the extraction stage, whether the
/// engine succeeded, returned partial data, or failed outright. All fields
/// carry well-typed defaults so response shapes can be projected without
/// presence checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub extracted_data: ExtractedFields,
    pub confidence_score: f32,
    pub document_preview: Option<serde_json::Value>,
    pub processing_metadata: ProcessingMetadata,
    pub message: String,
}

impl ExtractionResult {
    /// Project the reduced "basic" response shape.
    ///
    /// The basic endpoint is a narrower view over the same result — there is
    /// no separate extraction path for it.
    pub fn to_basic(&self) -> ProcessingResponse {
        ProcessingResponse {
            success: self.success,
            extracted_data: self.extracted_data.clone(),
            confidence_score: self.confidence_score,
            message: self.message.clone(),
        }
    }
}

/// Reduced projection returned by `POST /api/process-document`.
/// Drops the preview and processing metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResponse {
    pub success: bool,
    pub extracted_data: ExtractedFields,
    pub confidence_score: f32,
    pub message: String,
}
