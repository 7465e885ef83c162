//! Runtime settings, read from the environment once at startup.
//!
//! `.env` files are honored via dotenvy (loaded in `main`). Every setting
//! has a workable default so a bare `cargo run` serves locally.

use std::path::PathBuf;

pub const APP_NAME: &str = "Piazza CRM Backend";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Directory for transient upload artifacts.
    pub upload_dir: PathBuf,
    /// Base URL of the hybrid OCR sidecar.
    pub engine_url: String,
    pub engine_timeout_secs: u64,
    pub groq_base_url: String,
    pub groq_api_key: Option<String>,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub sender_email: String,
    pub sender_password: String,
    pub sender_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            upload_dir: PathBuf::from("uploads"),
            engine_url: "http://localhost:8090".into(),
            engine_timeout_secs: 120,
            groq_base_url: "https://api.groq.com/openai/v1".into(),
            groq_api_key: None,
            smtp_server: "smtp.gmail.com".into(),
            smtp_port: 587,
            sender_email: "piazzacrm.demo@gmail.com".into(),
            sender_password: String::new(),
            sender_name: "Piazza CRM".into(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: var_or("HOST", defaults.host),
            port: parsed_var("PORT", defaults.port),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            engine_url: var_or("OCR_ENGINE_URL", defaults.engine_url),
            engine_timeout_secs: parsed_var("OCR_ENGINE_TIMEOUT_SECS", defaults.engine_timeout_secs),
            groq_base_url: var_or("GROQ_BASE_URL", defaults.groq_base_url),
            groq_api_key: std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            smtp_server: var_or("SMTP_SERVER", defaults.smtp_server),
            smtp_port: parsed_var("SMTP_PORT", defaults.smtp_port),
            sender_email: var_or("SENDER_EMAIL", defaults.sender_email),
            sender_password: var_or("SENDER_PASSWORD", defaults.sender_password),
            sender_name: var_or("SENDER_NAME", defaults.sender_name),
        }
    }
}

fn var_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn parsed_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
