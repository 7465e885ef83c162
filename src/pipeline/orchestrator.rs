//! Request orchestration: validate → stage → extract → clean up.
//!
//! One pass per request, strictly in order, no branching back. Validation
//! and staging failures are fatal (fail fast); engine failures degrade into
//! a structured result at the gateway (fail soft); cleanup failures are
//! logged and swallowed (best effort).

use std::path::Path;

use super::gateway::ExtractionGateway;
use super::staging::StagedUpload;
use super::types::ExtractionResult;
use super::validate::validate_upload;
use super::PipelineError;

/// A fully-received multipart upload, before any pipeline stage has run.
#[derive(Debug)]
pub struct ReceivedUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Drive one upload through the full pipeline.
///
/// Invariant: every upload that stages successfully is released exactly once
/// before this function returns — including when extraction degraded. If the
/// task is cancelled mid-extraction, the `StagedUpload` drop guard still
/// removes the artifact.
pub async fn process_upload(
    gateway: &ExtractionGateway,
    upload_dir: &Path,
    upload: ReceivedUpload,
) -> Result<ExtractionResult, PipelineError> {
    tracing::info!(
        filename = %upload.filename,
        content_type = %upload.content_type,
        bytes = upload.bytes.len(),
        "Document processing started"
    );

    // Reject before anything touches disk.
    validate_upload(&upload.filename, &upload.content_type)?;

    let staged = StagedUpload::acquire(
        upload_dir,
        &upload.filename,
        &upload.content_type,
        &upload.bytes,
    )
    .await?;

    // Cannot fail: the gateway converts engine errors into degraded results.
    let result = gateway.extract(&staged).await;

    staged.release().await;

    tracing::info!(
        filename = %upload.filename,
        success = result.success,
        "Document processing completed"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::engine::{EngineError, EngineHealth, ExtractionEngine, RawExtraction};

    use super::*;

    /// Engine double that counts invocations and checks the artifact exists
    /// at call time.
    struct RecordingEngine {
        calls: AtomicUsize,
        fail: bool,
    }

    impl RecordingEngine {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }
        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl ExtractionEngine for RecordingEngine {
        async fn process_enhanced(&self, path: &Path) -> Result<RawExtraction, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(path.exists(), "artifact must exist while engine runs");
            if self.fail {
                return Err(EngineError::Failed {
                    status: 500,
                    body: "boom".into(),
                });
            }
            let mut data = BTreeMap::new();
            data.insert("name".into(), "Ada".into());
            data.insert("email".into(), "ada@example.com".into());
            Ok(RawExtraction {
                success: true,
                extracted_data: data,
                confidence_score: 0.9,
                message: Some("ok".into()),
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

    fn upload(filename: &str, content_type: &str) -> ReceivedUpload {
        ReceivedUpload {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: b"%PDF-1.4 test".to_vec(),
        }
    }

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).map(|mut d| d.next().is_none()).unwrap_or(true)
    }

    #[tokio::test]
    async fn happy_path_extracts_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let engine = RecordingEngine::ok();
        let gateway = ExtractionGateway::new(engine.clone());

        let result = process_upload(&gateway, dir.path(), upload("lead.pdf", "application/pdf"))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.extracted_data.name, "Ada");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
        assert!(dir_is_empty(dir.path()), "artifact released after request");
    }

    #[tokio::test]
    async fn reject_creates_no_artifact_and_skips_engine() {
        let dir = tempfile::tempdir().unwrap();
        let engine = RecordingEngine::ok();
        let gateway = ExtractionGateway::new(engine.clone());

        let err = process_upload(&gateway, dir.path(), upload("doc.exe", "application/x-msdownload"))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Rejected(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn empty_filename_rejected_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let engine = RecordingEngine::ok();
        let gateway = ExtractionGateway::new(engine.clone());

        let err = process_upload(&gateway, dir.path(), upload("", "application/pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Rejected(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn extension_fallback_proceeds_normally() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = ExtractionGateway::new(RecordingEngine::ok());

        let result = process_upload(
            &gateway,
            dir.path(),
            upload("scan.png", "application/octet-stream"),
        )
        .await
        .unwrap();

        assert!(result.success);
        assert!(dir_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn engine_failure_degrades_but_still_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let engine = RecordingEngine::failing();
        let gateway = ExtractionGateway::new(engine.clone());

        let result = process_upload(&gateway, dir.path(), upload("lead.pdf", "application/pdf"))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.processing_metadata.methods_used, vec!["Failed"]);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
        assert!(dir_is_empty(dir.path()), "artifact released even when engine failed");
    }

    #[tokio::test]
    async fn staging_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = ExtractionGateway::new(RecordingEngine::ok());

        let err = process_upload(
            &gateway,
            dir.path(),
            ReceivedUpload {
                filename: "lead.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: Vec::new(), // empty body fails post-write verification
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::Staging(_)));
        assert!(dir_is_empty(dir.path()));
    }
}
