//! Document-ingestion and extraction-orchestration pipeline.
//!
//! One request moves through validate → stage → extract → normalize →
//! clean up, in that order. The stages live in their own modules; errors
//! that can end a request early are collected here.

pub mod gateway;
pub mod orchestrator;
pub mod staging;
pub mod types;
pub mod validate;

pub use gateway::ExtractionGateway;
pub use orchestrator::{process_upload, ReceivedUpload};
pub use staging::{StagedUpload, StagingError};
pub use types::{ExtractedFields, ExtractionResult, ProcessingMetadata, ProcessingResponse};
pub use validate::{validate_upload, Validation};

use thiserror::Error;

/// Errors that end a request before a result exists.
///
/// Engine failures are deliberately absent — they degrade into a valid
/// `ExtractionResult` at the gateway instead of propagating.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Client sent something we will not process. Maps to 400.
    #[error("{0}")]
    Rejected(String),

    /// Transient storage failed. Maps to 500.
    #[error(transparent)]
    Staging(#[from] StagingError),
}
