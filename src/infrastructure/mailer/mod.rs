use async_trait::async_trait;
use serde_json::Value;

use crate::{entities::email::OutgoingEmail, errors::MailerError};

pub mod resend;

/// Outbound email delivery. One call per message, no retries.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Returns the provider's response payload on success.
    async fn send_email(&self, email: &OutgoingEmail) -> Result<Value, MailerError>;
}
