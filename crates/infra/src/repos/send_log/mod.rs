mod inmemory;
mod mongo;

use dill_reminders_domain::{SendLogEntry, ID};
pub use inmemory::InMemorySendLogRepo;
pub use mongo::MongoSendLogRepo;

/// Append only audit log of delivery attempts
#[async_trait::async_trait]
pub trait ISendLogRepo: Send + Sync {
    async fn append(&self, entry: &SendLogEntry) -> anyhow::Result<ID>;
    /// Oldest first
    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<SendLogEntry>>;
}
