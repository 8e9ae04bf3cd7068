use super::ISendLogRepo;
use crate::repos::shared::inmemory_repo::*;
use dill_reminders_domain::{SendLogEntry, ID};

pub struct InMemorySendLogRepo {
    entries: std::sync::Mutex<Vec<SendLogEntry>>,
}

impl InMemorySendLogRepo {
    pub fn new() -> Self {
        Self {
            entries: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISendLogRepo for InMemorySendLogRepo {
    async fn append(&self, entry: &SendLogEntry) -> anyhow::Result<ID> {
        insert(entry, &self.entries);
        Ok(entry.id.clone())
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<SendLogEntry>> {
        let mut entries = find_by(&self.entries, |e| e.reminder_id.as_ref() == Some(reminder_id));
        entries.sort_by_key(|e| e.created_at);
        Ok(entries)
    }
}
