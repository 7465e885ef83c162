//! SMTP email delivery via lettre.
//!
//! Sender credentials are reconfigurable at runtime through
//! `POST /api/email/configure`; the config sits behind a mutex so the
//! service handle can be shared across requests. Authentication failures
//! carry operator-facing help text (Gmail app-password guidance), since that
//! is by far the most common misconfiguration.

use std::sync::Mutex;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Serialize;
use thiserror::Error;

const APP_PASSWORD_HELP: &str =
    "Go to Google Account → Security → App Passwords to generate a new app password";

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Gmail authentication failed. Please check your email and app password. \
             Make sure you're using an App Password, not your regular Gmail password.")]
    Authentication { detail: String },

    #[error("SMTP error: {0}")]
    Smtp(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

impl EmailError {
    /// Raw failure detail for operator diagnosis.
    pub fn detail(&self) -> String {
        match self {
            EmailError::Authentication { detail } => detail.clone(),
            EmailError::Smtp(detail) => detail.clone(),
            EmailError::InvalidAddress(detail) => detail.clone(),
        }
    }

    /// Help text attached to the error response, when we have any.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            EmailError::Authentication { .. } => Some(APP_PASSWORD_HELP),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct SenderConfig {
    smtp_server: String,
    smtp_port: u16,
    email: String,
    password: String,
    name: String,
}

/// Successful send acknowledgement.
#[derive(Debug, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub message: String,
    pub to: String,
    pub subject: String,
}

/// Connection-test acknowledgement.
#[derive(Debug, Serialize)]
pub struct ConnectionOutcome {
    pub success: bool,
    pub message: String,
}

pub struct EmailService {
    sender: Mutex<SenderConfig>,
}

impl EmailService {
    pub fn new(
        smtp_server: &str,
        smtp_port: u16,
        sender_email: &str,
        sender_password: &str,
        sender_name: &str,
    ) -> Self {
        Self {
            sender: Mutex::new(SenderConfig {
                smtp_server: smtp_server.to_string(),
                smtp_port,
                email: sender_email.to_string(),
                password: sender_password.to_string(),
                name: sender_name.to_string(),
            }),
        }
    }

    /// Replace the sender identity. Server and port are fixed at startup.
    pub fn configure(&self, email: &str, password: &str, name: &str) {
        let mut sender = self.sender.lock().unwrap_or_else(|p| p.into_inner());
        sender.email = email.to_string();
        sender.password = password.to_string();
        sender.name = name.to_string();
        tracing::info!(email, "Email service configured");
    }

    fn snapshot(&self) -> SenderConfig {
        self.sender.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn transport(
        sender: &SenderConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&sender.smtp_server)
            .map_err(|e| EmailError::Smtp(e.to_string()))?
            .port(sender.smtp_port)
            .credentials(Credentials::new(
                sender.email.clone(),
                sender.password.clone(),
            ))
            .build();
        Ok(transport)
    }

    fn classify(e: lettre::transport::smtp::Error) -> EmailError {
        let detail = e.to_string();
        let lowered = detail.to_lowercase();
        // 535 is the SMTP auth-rejected reply; Gmail also says "username and
        // password not accepted".
        if lowered.contains("535")
            || lowered.contains("authentication")
            || lowered.contains("credentials")
            || lowered.contains("password not accepted")
        {
            EmailError::Authentication { detail }
        } else {
            EmailError::Smtp(detail)
        }
    }

    /// Send a plain-text email to one recipient.
    pub async fn send(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        body_message: &str,
    ) -> Result<SendOutcome, EmailError> {
        let sender = self.snapshot();

        let from: Mailbox = format!("{} <{}>", sender.name, sender.email)
            .parse()
            .map_err(|_| EmailError::InvalidAddress(sender.email.clone()))?;
        let to: Mailbox = format!("{to_name} <{to_email}>")
            .parse()
            .map_err(|_| EmailError::InvalidAddress(to_email.to_string()))?;

        let body = format!(
            "Hi {to_name},\n\n{body_message}\n\nBest regards,\n{}",
            sender.name
        );

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .body(body)
            .map_err(|e| EmailError::Smtp(e.to_string()))?;

        tracing::info!(
            to = to_email,
            server = %sender.smtp_server,
            port = sender.smtp_port,
            "Sending email"
        );

        let transport = Self::transport(&sender)?;
        transport.send(email).await.map_err(Self::classify)?;

        tracing::info!(to = to_email, "Email sent");

        Ok(SendOutcome {
            success: true,
            message: format!("Email sent successfully to {to_name}"),
            to: to_email.to_string(),
            subject: subject.to_string(),
        })
    }

    /// Probe the SMTP relay: connect, STARTTLS, authenticate.
    pub async fn test_connection(&self) -> Result<ConnectionOutcome, EmailError> {
        let sender = self.snapshot();
        tracing::info!(
            server = %sender.smtp_server,
            port = sender.smtp_port,
            "Testing SMTP connection"
        );

        let transport = Self::transport(&sender)?;
        let ok = transport.test_connection().await.map_err(Self::classify)?;
        if !ok {
            return Err(EmailError::Smtp("SMTP connection refused".into()));
        }

        Ok(ConnectionOutcome {
            success: true,
            message: "SMTP connection successful".into(),
        })
    }
}
