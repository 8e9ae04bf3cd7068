mod base;
mod reminder;
mod status;
mod summary;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use dill_reminders_api_structs::dtos::*;
pub use dill_reminders_domain::{ReminderStatus, SendStatus, TimeUnit, TriggerConfig, ID};
use reminder::ReminderClient;
pub use reminder::RequestManualReminderInput;
use status::StatusClient;
use std::sync::Arc;
use summary::SummaryClient;

// Domain
pub use dill_reminders_api_structs::dtos::ReminderRecordDTO as ReminderRecord;
pub use dill_reminders_api_structs::dtos::SendLogEntryDTO as SendLogEntry;

/// Dill Reminders Server SDK
///
/// The SDK contains methods for interacting with the reminders server API.
#[derive(Clone)]
pub struct DillSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub summary: SummaryClient,
}

impl DillSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let base = Arc::new(BaseClient::new(address, api_key.into()));
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let summary = SummaryClient::new(base);

        Self {
            reminder,
            status,
            summary,
        }
    }
}
