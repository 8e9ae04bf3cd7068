mod agentmail;
mod inmemory;

pub use agentmail::AgentMailTransport;
pub use inmemory::InMemoryMailTransport;
use serde::Serialize;

/// A plain text email ready to be handed to a transport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    /// Provider assigned id, when the provider returned one
    pub message_id: Option<String>,
}

/// Outbound mail. Any error, including a timeout, is a failed delivery and
/// its message ends up as the `last_error` of the reminder.
#[async_trait::async_trait]
pub trait IMailTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<SentMessage>;
}
