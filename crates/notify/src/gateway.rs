//! The outbound message gateway seam.
//!
//! Business logic never constructs a provider client ad hoc; it sends
//! through this trait so tests can substitute a mock and the provider can
//! be swapped without touching the reminder pass.

use async_trait::async_trait;

/// Provider acknowledgement for one accepted message.
#[derive(Debug, Clone)]
pub struct SentMessage {
    /// Provider-side message identifier (Twilio calls this the SID).
    pub provider_message_id: String,
}

/// Error sending through the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider rejected the message.
    #[error("Gateway returned HTTP {status}: {detail}")]
    Rejected { status: u16, detail: String },
}

/// Sends a WhatsApp message to a phone number.
#[async_trait]
pub trait WhatsAppGateway: Send + Sync {
    /// Send `body` to `to` (an E.164 phone number without the `whatsapp:`
    /// prefix). Returns the provider's message identifier on acceptance.
    async fn send(&self, to: &str, body: &str) -> Result<SentMessage, GatewayError>;
}
