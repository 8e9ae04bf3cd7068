mod inmemory;
mod mongo;

use dill_reminders_domain::{DeliveryOutcome, ReminderRecord, ID};
pub use inmemory::InMemoryReminderRepo;
pub use mongo::MongoReminderRepo;

/// Store of `ReminderRecord`s. Every status change is a single conditional
/// update so that a sent record is never moved back, whoever writes.
#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<ReminderRecord>>;
    /// Creates the record if none exists with the same id, otherwise only
    /// refreshes `scheduled_for` and `updated_at`. Returns the stored record.
    async fn schedule(&self, record: &ReminderRecord) -> anyhow::Result<ReminderRecord>;
    /// Counts one delivery attempt and applies its outcome unless the record
    /// is already sent. Returns the record as stored afterwards.
    async fn record_attempt(
        &self,
        reminder_id: &ID,
        outcome: &DeliveryOutcome,
        now: i64,
    ) -> anyhow::Result<Option<ReminderRecord>>;
    /// Moves a pending record to skipped
    async fn skip(
        &self,
        reminder_id: &ID,
        reason: &str,
        now: i64,
    ) -> anyhow::Result<Option<ReminderRecord>>;
    /// Moves a failed or skipped record back to pending
    async fn rearm(&self, reminder_id: &ID, now: i64) -> anyhow::Result<Option<ReminderRecord>>;
    async fn find_by_trigger(&self, trigger_label: &str) -> anyhow::Result<Vec<ReminderRecord>>;
}
