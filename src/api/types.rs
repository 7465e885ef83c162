//! Shared state for the API layer.

use std::sync::Arc;

use crate::config::Settings;
use crate::engine::ExtractionEngine;
use crate::pipeline::ExtractionGateway;
use crate::services::{EmailService, LlmService};

/// Dependency handles for all routes, constructed once at startup and
/// injected via axum state. Tests substitute fakes here instead of touching
/// process-wide globals.
#[derive(Clone)]
pub struct ApiContext {
    pub settings: Arc<Settings>,
    pub gateway: Arc<ExtractionGateway>,
    pub email: Arc<EmailService>,
    pub llm: Arc<LlmService>,
}

impl ApiContext {
    pub fn new(settings: Settings, engine: Arc<dyn ExtractionEngine>) -> Self {
        let email = EmailService::new(
            &settings.smtp_server,
            settings.smtp_port,
            &settings.sender_email,
            &settings.sender_password,
            &settings.sender_name,
        );
        let llm = LlmService::new(&settings.groq_base_url, settings.groq_api_key.clone());

        Self {
            settings: Arc::new(settings),
            gateway: Arc::new(ExtractionGateway::new(engine)),
            email: Arc::new(email),
            llm: Arc::new(llm),
        }
    }
}
