//! Twilio implementation of the WhatsApp gateway.
//!
//! Posts to the Twilio Messages API with HTTP basic auth. The client is
//! built once from environment credentials and injected wherever a
//! [`WhatsAppGateway`] is needed.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::gateway::{GatewayError, SentMessage, WhatsAppGateway};

/// Timeout for a single send attempt. A timed-out send counts as a failure
/// and is retried on the next reminder tick.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Twilio credentials and sender number.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender, already in Twilio's `whatsapp:+NNN` form.
    pub whatsapp_from: String,
}

impl TwilioConfig {
    /// Load Twilio configuration from the environment.
    ///
    /// Returns `None` (and lets the caller disable reminders) when any of
    /// `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` or `TWILIO_WHATSAPP_NUMBER`
    /// is unset.
    pub fn from_env() -> Option<Self> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").ok()?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").ok()?;
        let whatsapp_from = std::env::var("TWILIO_WHATSAPP_NUMBER").ok()?;
        Some(Self {
            account_sid,
            auth_token,
            whatsapp_from,
        })
    }
}

/// Response subset of a Twilio message create call.
#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Production WhatsApp gateway backed by the Twilio REST API.
pub struct TwilioGateway {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioGateway {
    /// Create a gateway with a pre-configured HTTP client.
    pub fn new(config: TwilioConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }
}

#[async_trait]
impl WhatsAppGateway for TwilioGateway {
    async fn send(&self, to: &str, body: &str) -> Result<SentMessage, GatewayError> {
        let params = [
            ("From", self.config.whatsapp_from.as_str()),
            ("To", &format!("whatsapp:{to}")),
            ("Body", body),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let message: TwilioMessageResponse = response.json().await?;
        Ok(SentMessage {
            provider_message_id: message.sid,
        })
    }
}
