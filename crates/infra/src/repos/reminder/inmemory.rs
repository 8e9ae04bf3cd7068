use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use dill_reminders_domain::{DeliveryOutcome, ReminderRecord, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<ReminderRecord>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<ReminderRecord>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn schedule(&self, record: &ReminderRecord) -> anyhow::Result<ReminderRecord> {
        Ok(upsert(record, &self.reminders, |existing| {
            existing.refresh_schedule(record.scheduled_for, record.updated_at)
        }))
    }

    async fn record_attempt(
        &self,
        reminder_id: &ID,
        outcome: &DeliveryOutcome,
        now: i64,
    ) -> anyhow::Result<Option<ReminderRecord>> {
        Ok(update_one(reminder_id, &self.reminders, |record| {
            record.record_attempt(outcome, now)
        }))
    }

    async fn skip(
        &self,
        reminder_id: &ID,
        reason: &str,
        now: i64,
    ) -> anyhow::Result<Option<ReminderRecord>> {
        Ok(update_one(reminder_id, &self.reminders, |record| {
            record.skip(reason, now)
        }))
    }

    async fn rearm(&self, reminder_id: &ID, now: i64) -> anyhow::Result<Option<ReminderRecord>> {
        Ok(update_one(reminder_id, &self.reminders, |record| {
            record.rearm(now);
        }))
    }

    async fn find_by_trigger(&self, trigger_label: &str) -> anyhow::Result<Vec<ReminderRecord>> {
        Ok(find_by(&self.reminders, |r| r.trigger_label == trigger_label))
    }
}
