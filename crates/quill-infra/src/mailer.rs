//! Outbound mail dispatch implementations of the `Mailer` port.

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{EmailMessage, MailError, Mailer};

/// Console mailer - logs the message instead of dispatching it
/// (for development and as fallback when no webhook is configured).
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        tracing::info!(
            subject = %message.subject,
            to = ?message.to,
            reply_to = ?message.reply_to,
            body = %message.body,
            "Mail dispatch (console)"
        );
        Ok(())
    }
}

/// Webhook mailer - hands the message to a mail-gateway webhook as JSON.
#[cfg(feature = "mail-webhook")]
pub struct WebhookMailer {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "mail-webhook")]
impl WebhookMailer {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(feature = "mail-webhook")]
#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        let payload = serde_json::json!({
            "subject": message.subject,
            "body": message.body,
            "reply_to": message.reply_to,
            "to": message.to,
        });

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Dispatch(e.to_string()))?
            .error_for_status()
            .map_err(|e| MailError::Dispatch(e.to_string()))?;

        Ok(())
    }
}

/// Recording mailer for tests - keeps every message in memory.
#[derive(Default)]
pub struct InMemoryMailer {
    sent: RwLock<Vec<EmailMessage>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        self.sent.write().await.push(message);
        Ok(())
    }
}
