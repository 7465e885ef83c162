//! LLM assistance for lead chat and analysis.
//!
//! Talks to Groq's OpenAI-compatible chat-completions API. Availability is
//! determined by API-key presence at construction; every endpoint degrades
//! to a structured failure when the key is missing or the call fails.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ChatTurn, LeadContext};

const CHAT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

const CHAT_SYSTEM_PROMPT: &str = "You are a helpful CRM assistant. Provide professional, \
     actionable advice about leads and sales processes.";
const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are a sales analyst. Provide data-driven insights about leads.";

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM service not available")]
    Unavailable,

    #[error("Cannot reach LLM API at {0}")]
    Connection(String),

    #[error("LLM API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Could not parse LLM response: {0}")]
    ResponseParsing(String),

    #[error("Failed to parse analysis")]
    InsightsParsing,
}

/// Structured lead analysis parsed from the model's JSON answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadInsights {
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub suggested_approach: String,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub opportunity_score: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct LlmService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl LlmService {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        if api_key.is_none() {
            tracing::warn!("LLM service initialized without API key — endpoints will degrade");
        }

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let key = self.api_key.as_deref().ok_or(LlmError::Unavailable)?;
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatCompletionRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    LlmError::Connection(self.base_url.clone())
                } else {
                    LlmError::ResponseParsing(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| LlmError::ResponseParsing("empty choices".into()))
    }

    /// Generate a conversational reply about a lead.
    pub async fn generate_response(
        &self,
        user_message: &str,
        lead: &LeadContext,
        history: &[ChatTurn],
    ) -> Result<String, LlmError> {
        let prompt = build_chat_prompt(user_message, lead, history);
        let response = self.complete(CHAT_SYSTEM_PROMPT, &prompt, 0.7, 500).await?;
        tracing::info!(
            lead = lead.name.as_deref().unwrap_or("Unknown"),
            "LLM chat response generated"
        );
        Ok(response)
    }

    /// Analyze a lead and return structured insights.
    pub async fn analyze_lead(&self, lead: &LeadContext) -> Result<LeadInsights, LlmError> {
        let prompt = build_analysis_prompt(lead);
        let response = self
            .complete(ANALYSIS_SYSTEM_PROMPT, &prompt, 0.3, 300)
            .await?;

        // Models sometimes wrap the JSON in fences or prose; take the first
        // object we can find.
        let json_slice = extract_json_object(&response).ok_or(LlmError::InsightsParsing)?;
        serde_json::from_str(json_slice).map_err(|_| LlmError::InsightsParsing)
    }
}

fn build_lead_context(lead: &LeadContext) -> String {
    format!(
        "Name: {}\nEmail: {}\nPhone: {}\nStatus: {}\nSource: {}\nCreated: {}\n",
        lead.name.as_deref().unwrap_or("Unknown"),
        lead.email.as_deref().unwrap_or("N/A"),
        lead.phone.as_deref().unwrap_or("N/A"),
        lead.status.as_deref().unwrap_or("Unknown"),
        lead.source.as_deref().unwrap_or("Unknown"),
        lead.created_at.as_deref().unwrap_or("Unknown"),
    )
}

fn build_history(history: &[ChatTurn]) -> String {
    if history.is_empty() {
        return "No previous conversation history.".to_string();
    }
    let start = history.len().saturating_sub(5);
    history[start..]
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            let speaker = if turn.sender == "user" { "User" } else { "Assistant" };
            format!("{}. {}: {}\n", i + 1, speaker, turn.content)
        })
        .collect()
}

fn build_chat_prompt(user_message: &str, lead: &LeadContext, history: &[ChatTurn]) -> String {
    format!(
        "You are an AI assistant for a CRM system. You're helping a sales \
         representative interact with a lead.\n\n\
         LEAD INFORMATION:\n{}\n\
         CONVERSATION HISTORY:\n{}\n\
         USER MESSAGE:\n{}\n\n\
         Instructions:\n\
         1. Provide helpful, professional responses about the lead\n\
         2. Suggest next steps, follow-up actions, or communication strategies\n\
         3. Answer questions about the lead's status, contact info, or history\n\
         4. Be conversational but professional\n\
         5. If asked about sending emails, suggest using the email feature\n\
         6. Keep responses concise but informative\n\n\
         Respond naturally as if you're a helpful CRM assistant:",
        build_lead_context(lead),
        build_history(history),
        user_message,
    )
}

fn build_analysis_prompt(lead: &LeadContext) -> String {
    format!(
        "Analyze this lead and provide actionable insights for the sales team.\n\n\
         LEAD DATA:\n{}\n\
         Provide analysis in this JSON format:\n\
         {{\n  \"priority\": \"high/medium/low\",\n  \
         \"suggested_approach\": \"Brief description of how to approach this lead\",\n  \
         \"next_steps\": [\"step1\", \"step2\", \"step3\"],\n  \
         \"risk_factors\": [\"factor1\", \"factor2\"],\n  \
         \"opportunity_score\": 0.85\n}}",
        build_lead_context(lead),
    )
}

/// Slice out the first balanced `{...}` block, if any.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    for (offset, ch) in text[start..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
