//! Notification transports

use std::io::Write;
use thiserror::Error;
use tracing::info;

/// Notification errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl From<std::io::Error> for NotifyError {
    fn from(e: std::io::Error) -> Self {
        NotifyError::Delivery(e.to_string())
    }
}

/// Anything that can deliver an alert message
pub trait Notifier: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Deliver one message
    fn send(&self, message: &str) -> Result<(), NotifyError>;
}

/// Email transport (prints the delivery)
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    recipient: String,
}

impl EmailNotifier {
    pub fn new(recipient: impl Into<String>) -> Result<Self, NotifyError> {
        let recipient = recipient.into();
        if !recipient.contains('@') {
            return Err(NotifyError::InvalidDestination(recipient));
        }
        Ok(Self { recipient })
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

impl Notifier for EmailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    fn send(&self, message: &str) -> Result<(), NotifyError> {
        writeln!(std::io::stdout().lock(), "[EMAIL to {}] {}", self.recipient, message)?;
        info!(recipient = %self.recipient, "Email notification delivered");
        Ok(())
    }
}

/// Webhook transport (prints the delivery)
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(NotifyError::InvalidDestination(url));
        }
        Ok(Self { url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    fn send(&self, message: &str) -> Result<(), NotifyError> {
        writeln!(std::io::stdout().lock(), "[WEBHOOK {}] {}", self.url, message)?;
        info!(url = %self.url, "Webhook notification delivered");
        Ok(())
    }
}

/// Writes alerts straight to stdout
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    fn send(&self, message: &str) -> Result<(), NotifyError> {
        writeln!(std::io::stdout().lock(), "[CONSOLE] {}", message)?;
        Ok(())
    }
}
