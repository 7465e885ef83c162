//! Extraction gateway — the boundary past which the engine cannot fail.
//!
//! Whatever the engine does (succeeds, returns partial data, errors out),
//! callers receive one fully-populated `ExtractionResult`. An engine crash
//! and an engine returning no match are indistinguishable downstream: both
//! arrive as a structurally valid result, differing only in `success` and
//! `message`.

use std::sync::Arc;

use crate::engine::{ExtractionEngine, RawExtraction};

use super::staging::StagedUpload;
use super::types::{ExtractedFields, ExtractionResult, ProcessingMetadata};

pub struct ExtractionGateway {
    engine: Arc<dyn ExtractionEngine>,
}

impl ExtractionGateway {
    pub fn new(engine: Arc<dyn ExtractionEngine>) -> Self {
        Self { engine }
    }

    /// Run enhanced extraction on a staged upload. Infallible by contract.
    pub async fn extract(&self, staged: &StagedUpload) -> ExtractionResult {
        match self.engine.process_enhanced(staged.path()).await {
            Ok(raw) => {
                let result = coerce(raw);
                if result.success {
                    tracing::info!(
                        original = staged.original_filename(),
                        confidence = result.confidence_score,
                        methods = ?result.processing_metadata.methods_used,
                        "Extraction completed"
                    );
                } else {
                    tracing::warn!(
                        original = staged.original_filename(),
                        message = %result.message,
                        "Extraction reported failure"
                    );
                }
                result
            }
            Err(e) => {
                // Detail goes to the log; the caller gets a summary, not a trace.
                tracing::error!(
                    original = staged.original_filename(),
                    error = %e,
                    "Extraction engine error, returning degraded result"
                );
                degraded_result(&e.to_string())
            }
        }
    }

    /// Engine reference, for the health endpoint.
    pub fn engine(&self) -> &Arc<dyn ExtractionEngine> {
        &self.engine
    }
}

/// Fill in the documented defaults for everything the engine left out.
fn coerce(raw: RawExtraction) -> ExtractionResult {
    let mut fields = ExtractedFields::default();
    for (key, value) in raw.extracted_data {
        match key.as_str() {
            "name" => fields.name = value,
            "email" => fields.email = value,
            "phone" if !value.is_empty() => fields.phone = value,
            "phone" => {}
            _ => {
                fields.extra.insert(key, value);
            }
        }
    }

    let meta = raw.processing_metadata.unwrap_or_default();
    let processing_metadata = ProcessingMetadata {
        document_type: meta.document_type.unwrap_or_else(|| "unknown".to_string()),
        processing_time_seconds: meta.processing_time_seconds.unwrap_or(0.0),
        methods_used: meta.methods_used.unwrap_or_default(),
    };

    ExtractionResult {
        success: raw.success,
        extracted_data: fields,
        confidence_score: raw.confidence_score.clamp(0.0, 1.0),
        document_preview: raw.document_preview,
        processing_metadata,
        message: raw
            .message
            .unwrap_or_else(|| "Processing completed".to_string()),
    }
}

/// The synthesized result for an engine that threw instead of answering.
fn degraded_result(detail: &str) -> ExtractionResult {
    ExtractionResult {
        success: false,
        extracted_data: ExtractedFields::default(),
        confidence_score: 0.0,
        document_preview: None,
        processing_metadata: ProcessingMetadata {
            document_type: "unknown".to_string(),
            processing_time_seconds: 0.0,
            methods_used: vec!["Failed".to_string()],
        },
        message: format!("OCR processing failed: {detail}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;

    use async_trait::async_trait;

    use crate::engine::{EngineError, EngineHealth, RawMetadata};

    use super::*;

    struct FailingEngine;

    #[async_trait]
    impl ExtractionEngine for FailingEngine {
        async fn process_enhanced(&self, _: &Path) -> Result<RawExtraction, EngineError> {
            Err(EngineError::Connection("http://localhost:8090".into()))
        }
        async fn health_check(&self) -> Result<EngineHealth, EngineError> {
            Err(EngineError::Connection("http://localhost:8090".into()))
        }
    }

    struct SparseEngine;

    #[async_trait]
    impl ExtractionEngine for SparseEngine {
        async fn process_enhanced(&self, _: &Path) -> Result<RawExtraction, EngineError> {
            let mut data = BTreeMap::new();
            data.insert("name".to_string(), "Grace Hopper".to_string());
            data.insert("company".to_string(), "Navy".to_string());
            Ok(RawExtraction {
                success: true,
                extracted_data: data,
                confidence_score: 0.8,
                ..Default::default()
            })
        }
        async fn health_check(&self) -> Result<EngineHealth, EngineError> {
            Ok(EngineHealth {
                status: "ok".into(),
                detail: None,
            })
        }
    }

    async fn staged() -> (tempfile::TempDir, StagedUpload) {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedUpload::acquire(dir.path(), "lead.pdf", "application/pdf", b"%PDF-")
            .await
            .unwrap();
        (dir, staged)
    }

    #[tokio::test]
    async fn engine_error_becomes_degraded_result() {
        let gateway = ExtractionGateway::new(Arc::new(FailingEngine));
        let (_dir, staged) = staged().await;

        let result = gateway.extract(&staged).await;
        assert!(!result.success);
        assert_eq!(result.confidence_score, 0.0);
        assert_eq!(result.processing_metadata.methods_used, vec!["Failed"]);
        assert_eq!(result.extracted_data.name, "");
        assert_eq!(result.extracted_data.phone, "N/A");
        assert!(result.message.starts_with("OCR processing failed"));
        staged.release().await;
    }

    #[tokio::test]
    async fn sparse_engine_output_gets_defaults() {
        let gateway = ExtractionGateway::new(Arc::new(SparseEngine));
        let (_dir, staged) = staged().await;

        let result = gateway.extract(&staged).await;
        assert!(result.success);
        assert_eq!(result.extracted_data.name, "Grace Hopper");
        assert_eq!(result.extracted_data.email, "");
        assert_eq!(result.extracted_data.phone, "N/A");
        assert_eq!(result.extracted_data.extra["company"], "Navy");
        assert_eq!(result.processing_metadata.document_type, "unknown");
        assert!(result.processing_metadata.methods_used.is_empty());
        staged.release().await;
    }

    #[test]
    fn coerce_clamps_confidence_into_unit_range() {
        let raw = RawExtraction {
            confidence_score: 3.2,
            ..Default::default()
        };
        assert_eq!(coerce(raw).confidence_score, 1.0);
    }

    #[test]
    fn coerce_keeps_full_metadata_when_present() {
        let raw = RawExtraction {
            success: true,
            processing_metadata: Some(RawMetadata {
                document_type: Some("pdf".into()),
                processing_time_seconds: Some(1.25),
                methods_used: Some(vec!["pdf_text".into()]),
            }),
            message: Some("done".into()),
            ..Default::default()
        };
        let result = coerce(raw);
        assert_eq!(result.processing_metadata.document_type, "pdf");
        assert_eq!(result.processing_metadata.processing_time_seconds, 1.25);
        assert_eq!(result.message, "done");
    }

    #[test]
    fn coerce_preserves_nonempty_phone() {
        let mut data = BTreeMap::new();
        data.insert("phone".to_string(), "555-0100".to_string());
        let raw = RawExtraction {
            extracted_data: data,
            ..Default::default()
        };
        assert_eq!(coerce(raw).extracted_data.phone, "555-0100");
    }
}
