//! External collaborators: SMTP delivery and LLM assistance.
//!
//! The pipeline's results feed into these; neither participates in the
//! ingestion pipeline itself. Both are constructed once at startup and
//! injected through `ApiContext`.

pub mod email;
pub mod llm;

pub use email::{EmailError, EmailService};
pub use llm::{LeadInsights, LlmError, LlmService};
