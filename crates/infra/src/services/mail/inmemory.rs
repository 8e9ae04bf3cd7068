use super::{IMailTransport, OutboundMessage, SentMessage};
use anyhow::anyhow;
use dill_reminders_utils::create_prefixed_secret;
use std::{collections::HashMap, sync::Mutex};
use tracing::info;

/// Transport that only records what would have been sent. Used for dry runs
/// and tests, where it can be told to fail for a given recipient.
pub struct InMemoryMailTransport {
    sent: Mutex<Vec<OutboundMessage>>,
    failures: Mutex<HashMap<String, String>>,
}

impl InMemoryMailTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Every send to `to` fails with `error` until `recover` is called
    pub fn fail_for(&self, to: &str, error: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(to.to_string(), error.to_string());
    }

    pub fn recover(&self, to: &str) {
        self.failures.lock().unwrap().remove(to);
    }

    pub fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, to: &str) -> Vec<OutboundMessage> {
        self.sent_messages()
            .into_iter()
            .filter(|m| m.to == to)
            .collect()
    }
}

impl Default for InMemoryMailTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailTransport for InMemoryMailTransport {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<SentMessage> {
        if let Some(error) = self.failures.lock().unwrap().get(&message.to) {
            return Err(anyhow!("{}", error));
        }
        info!(
            "Dry run: not sending \"{}\" from {} to {}",
            message.subject, message.from, message.to
        );
        self.sent.lock().unwrap().push(message.clone());
        Ok(SentMessage {
            message_id: Some(create_prefixed_secret("msg", 16)),
        })
    }
}
