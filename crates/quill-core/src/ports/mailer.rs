use async_trait::async_trait;
use thiserror::Error;

/// An outbound notification message.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
    /// Sender address, attached so the recipient can reply.
    pub reply_to: Option<String>,
    pub to: Vec<String>,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Failed to dispatch mail: {0}")]
    Dispatch(String),
}

/// Outbound mail dispatch service.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}
