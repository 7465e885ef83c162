//! HTTP client for the hybrid OCR sidecar.
//!
//! The sidecar exposes `POST /process-enhanced` (multipart document upload)
//! and `GET /health`. This client is the only code that knows its wire
//! format; the rest of the backend sees `ExtractionEngine`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use super::{EngineError, EngineHealth, ExtractionEngine, RawExtraction};

/// Default per-document processing timeout. OCR on multi-page PDFs is slow.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub struct HttpOcrEngine {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpOcrEngine {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Engine at its default local address with the default timeout.
    pub fn default_local() -> Self {
        Self::new("http://localhost:8090", DEFAULT_TIMEOUT_SECS)
    }

    fn map_send_error(&self, e: reqwest::Error) -> EngineError {
        if e.is_connect() {
            EngineError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            EngineError::Timeout(self.timeout_secs)
        } else {
            EngineError::ResponseParsing(e.to_string())
        }
    }
}

#[async_trait]
impl ExtractionEngine for HttpOcrEngine {
    async fn process_enhanced(&self, path: &Path) -> Result<RawExtraction, EngineError> {
        let url = format!("{}/process-enhanced", self.base_url);

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Failed {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RawExtraction>()
            .await
            .map_err(|e| EngineError::ResponseParsing(e.to_string()))
    }

    async fn health_check(&self) -> Result<EngineHealth, EngineError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Failed {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<EngineHealth>()
            .await
            .map_err(|e| EngineError::ResponseParsing(e.to_string()))
    }
}
