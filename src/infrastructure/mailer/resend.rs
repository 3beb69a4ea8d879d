use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;
use zeroize::Zeroizing;

use crate::{
    entities::email::OutgoingEmail,
    errors::MailerError,
    mailer::Mailer,
    settings::AppConfig,
};

/// Sends email through the Resend HTTP API.
pub struct ResendMailer {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl ResendMailer {
    pub fn new(endpoint: Url, api_key: Zeroizing<String>, timeout: Duration) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint, api_key })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, MailerError> {
        let endpoint = Url::parse(&config.email_api_url)
            .map_err(|e| MailerError::Transport(format!("Invalid email API URL: {}", e)))?;

        Self::new(endpoint, config.resend_api_key.clone(), config.email_timeout())
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<Value, MailerError> {
        if self.api_key.trim().is_empty() {
            return Err(MailerError::MissingApiKey);
        }

        tracing::debug!(to = ?email.to, endpoint = %self.endpoint, "Posting email to provider");

        let response = self.client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        Ok(response.json::<Value>().await?)
    }
}
