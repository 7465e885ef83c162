//! Wire schemas for the HTTP surface.
//!
//! Every request body is a typed struct rather than a raw map, so
//! required-field checks happen structurally at deserialization.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Health ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HealthResponse {
    pub fn healthy(message: &str) -> Self {
        Self {
            status: "healthy",
            message: message.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            details: None,
        }
    }

    pub fn unhealthy(message: &str) -> Self {
        Self {
            status: "unhealthy",
            message: message.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

// ── Leads ───────────────────────────────────────────────────────────────────

/// Incoming lead creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub source: String,
    #[serde(default)]
    pub confidence_score: Option<f32>,
}

/// Simulated persisted lead. Not backed by durable storage.
#[derive(Debug, Clone, Serialize)]
pub struct LeadRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub source: String,
    pub created_at: String,
    pub confidence_score: Option<f32>,
}

impl LeadRecord {
    /// Echo a new lead with generated id and timestamps.
    pub fn from_data(data: LeadData) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            phone: data.phone.unwrap_or_else(|| "N/A".to_string()),
            status: "new".to_string(),
            source: data.source,
            created_at: Utc::now().to_rfc3339(),
            confidence_score: data.confidence_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateLeadResponse {
    pub success: bool,
    pub message: String,
    pub lead: LeadRecord,
}

// ── Email ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EmailConfigureRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailSendRequest {
    pub to_email: String,
    pub to_name: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigureResponse {
    pub success: bool,
    pub message: String,
}

// ── LLM chat / analysis ─────────────────────────────────────────────────────

/// Lead fields the LLM prompts are built from. Everything optional —
/// prompt construction substitutes "Unknown"/"N/A".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LeadContext {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl LeadContext {
    /// True when no field carries data — treated as "lead data missing".
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.status.is_none()
            && self.source.is_none()
            && self.created_at.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatTurn {
    pub sender: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub lead_data: LeadContext,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub message: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub insights: crate::services::LeadInsights,
}

#[derive(Debug, Serialize)]
pub struct LlmStatusResponse {
    pub available: bool,
    pub message: String,
}

// ── Supported formats (static metadata) ─────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SupportedFormats {
    pub formats: Vec<FormatInfo>,
    pub max_file_size: &'static str,
    pub processing_features: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct FormatInfo {
    #[serde(rename = "type")]
    pub format_type: &'static str,
    pub mime_types: Vec<&'static str>,
    pub extensions: Vec<&'static str>,
    pub description: &'static str,
}

impl SupportedFormats {
    pub fn current() -> Self {
        Self {
            formats: vec![
                FormatInfo {
                    format_type: "PDF",
                    mime_types: vec!["application/pdf"],
                    extensions: vec![".pdf"],
                    description: "Portable Document Format",
                },
                FormatInfo {
                    format_type: "PNG",
                    mime_types: vec!["image/png"],
                    extensions: vec![".png"],
                    description: "Portable Network Graphics",
                },
                FormatInfo {
                    format_type: "JPEG",
                    mime_types: vec!["image/jpeg", "image/jpg"],
                    extensions: vec![".jpg", ".jpeg"],
                    description: "JPEG Image Format",
                },
            ],
            max_file_size: "10MB",
            processing_features: vec![
                "Text extraction",
                "Name detection",
                "Email extraction",
                "Phone number detection",
                "Confidence scoring",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_record_defaults_phone_and_status() {
        let record = LeadRecord::from_data(LeadData {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: None,
            source: "scan".into(),
            confidence_score: Some(0.9),
        });
        assert_eq!(record.phone, "N/A");
        assert_eq!(record.status, "new");
        assert_eq!(record.confidence_score, Some(0.9));
    }

    #[test]
    fn lead_data_requires_name_email_source() {
        let err = serde_json::from_str::<LeadData>(r#"{"name": "Ada"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn lead_context_accepts_camel_case_created_at() {
        let ctx: LeadContext =
            serde_json::from_str(r#"{"name": "Ada", "createdAt": "2026-01-01"}"#).unwrap();
        assert_eq!(ctx.created_at.as_deref(), Some("2026-01-01"));
        assert!(!ctx.is_empty());
    }

    #[test]
    fn empty_lead_context_is_empty() {
        let ctx: LeadContext = serde_json::from_str("{}").unwrap();
        assert!(ctx.is_empty());
    }

    #[test]
    fn supported_formats_list_matches_validator_allow_lists() {
        let formats = SupportedFormats::current();
        let mimes: Vec<&str> = formats
            .formats
            .iter()
            .flat_map(|f| f.mime_types.iter().copied())
            .collect();
        for mime in crate::pipeline::validate::ALLOWED_MIME_TYPES {
            assert!(mimes.contains(mime), "missing {mime}");
        }
        let exts: Vec<&str> = formats
            .formats
            .iter()
            .flat_map(|f| f.extensions.iter().copied())
            .collect();
        for ext in crate::pipeline::validate::ALLOWED_EXTENSIONS {
            assert!(exts.contains(ext), "missing {ext}");
        }
    }
}
