use super::{IMailTransport, OutboundMessage, SentMessage};
use crate::config::MailConfig;
use anyhow::{anyhow, Context};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

/// Sends mail through the AgentMail REST api
pub struct AgentMailTransport {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default, alias = "id", alias = "messageId")]
    message_id: Option<String>,
}

impl AgentMailTransport {
    pub fn new(api_key: String, config: &MailConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.send_timeout_secs))
            .build()
            .context("Unable to build http client for AgentMail")?;
        let base_url = Url::parse(&config.agentmail_base_url)
            .with_context(|| format!("Invalid AgentMail url: {}", config.agentmail_base_url))?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// The inbox id is a single, encoded path segment
    fn send_url(&self, inbox_id: &str) -> anyhow::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("AgentMail url: {} can not have a path", self.base_url))?
            .pop_if_empty()
            .extend(["v0", "inboxes", inbox_id, "messages", "send"]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl IMailTransport for AgentMailTransport {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<SentMessage> {
        let url = self.send_url(&message.from)?;
        let body = SendMessageRequest {
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        };
        let res = self
            .client
            .post(url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] AgentMail send error. Error message: {:?}", e);
                anyhow::Error::new(e)
            })?;

        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(anyhow!("AgentMail responded with {}: {}", status, text));
        }

        let res = res.json::<SendMessageResponse>().await.map_err(|e| {
            error!(
                "[Unexpected Response] AgentMail send error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })?;
        Ok(SentMessage {
            message_id: res.message_id,
        })
    }
}
