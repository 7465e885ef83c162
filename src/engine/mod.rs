//! Extraction engine boundary.
//!
//! The engine that turns a document into contact fields is a black box to
//! this backend. Everything behind `ExtractionEngine` is external; the
//! pipeline only depends on this narrow seam, which also lets tests inject
//! fakes without touching process-wide state.

pub mod http;

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpOcrEngine;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Cannot reach extraction engine at {0}")]
    Connection(String),

    #[error("Extraction engine timed out after {0}s")]
    Timeout(u64),

    #[error("Extraction engine returned HTTP {status}: {body}")]
    Failed { status: u16, body: String },

    #[error("Could not parse engine response: {0}")]
    ResponseParsing(String),

    #[error("Could not read staged document: {0}")]
    DocumentRead(#[from] std::io::Error),
}

/// Engine output before the gateway normalizes it.
///
/// Every field defaults — real engines routinely omit pieces of this shape,
/// and partial output must not fail deserialization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawExtraction {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub extracted_data: BTreeMap<String, String>,
    #[serde(default)]
    pub confidence_score: f32,
    #[serde(default)]
    pub document_preview: Option<serde_json::Value>,
    #[serde(default)]
    pub processing_metadata: Option<RawMetadata>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default, alias = "processing_time")]
    pub processing_time_seconds: Option<f32>,
    #[serde(default)]
    pub methods_used: Option<Vec<String>>,
}

/// Engine status as reported by its health probe.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineHealth {
    pub status: String,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// The capability contract the pipeline requires from any extraction engine.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Run enhanced processing on a staged document. May fail; the gateway
    /// owns converting failures into a degraded result.
    async fn process_enhanced(&self, path: &Path) -> Result<RawExtraction, EngineError>;

    /// Probe engine availability.
    async fn health_check(&self) -> Result<EngineHealth, EngineError>;
}
