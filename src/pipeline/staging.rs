//! Transient storage for uploaded documents.
//!
//! A `StagedUpload` owns one on-disk file for the lifetime of one request.
//! Names are collision-free (`{uuid}{original extension}`), so concurrent
//! requests never share a path and no locking is needed. `release` is the
//! normal exit; the `Drop` impl is the backstop that keeps a cancelled or
//! short-circuited request from leaking its artifact.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StagingError {
    #[error("Failed to save file: {0}")]
    Write(#[from] std::io::Error),

    #[error("File was not saved to disk: {0}")]
    VerifyFailed(String),
}

/// An uploaded document persisted under a unique transient path.
///
/// Owned exclusively by the request that created it. Deleted exactly once:
/// either by `release` or, failing that, by `Drop`.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    original_filename: String,
    content_type: String,
    byte_length: u64,
    released: bool,
}

impl StagedUpload {
    /// Write `bytes` to a fresh uniquely-named file under `upload_dir` and
    /// verify the write landed.
    ///
    /// Verification failure is fatal for the request — an upload the engine
    /// cannot read back is worse than an early 500.
    pub async fn acquire(
        upload_dir: &Path,
        original_filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<Self, StagingError> {
        tokio::fs::create_dir_all(upload_dir).await?;

        let extension = Path::new(original_filename)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let unique_name = format!("{}{}", Uuid::new_v4(), extension);
        let path = upload_dir.join(unique_name);

        tokio::fs::write(&path, bytes).await?;

        // Read back the metadata rather than trusting the write call.
        let byte_length = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.len() > 0 => meta.len(),
            Ok(_) => {
                let _ = tokio::fs::remove_file(&path).await;
                return Err(StagingError::VerifyFailed("file is empty".into()));
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&path).await;
                return Err(StagingError::VerifyFailed(e.to_string()));
            }
        };

        tracing::info!(
            path = %path.display(),
            bytes = byte_length,
            original = original_filename,
            "Upload staged"
        );

        Ok(Self {
            path,
            original_filename: original_filename.to_string(),
            content_type: content_type.to_string(),
            byte_length,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn byte_length(&self) -> u64 {
        self.byte_length
    }

    /// Delete the transient file.
    ///
    /// Never fails the request — by the time cleanup runs, the response has
    /// already been computed. Deletion failures are logged and dropped.
    pub async fn release(mut self) {
        self.released = true;
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to clean up staged upload");
        } else {
            tracing::debug!(path = %self.path.display(), "Staged upload cleaned up");
        }
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // Reached only when a request bails or is cancelled before `release`.
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "Drop cleanup of staged upload failed");
        }
    }
}
