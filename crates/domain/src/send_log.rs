use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendStatus {
    Sent,
    Failed,
}

/// Append only audit row, one per delivery attempt outcome. Never read when
/// making dispatch decisions.
#[derive(Debug, Clone, PartialEq)]
pub struct SendLogEntry {
    pub id: ID,
    /// Absent for messages that are not reminders, e.g. daily summaries
    pub reminder_id: Option<ID>,
    pub assignment_id: Option<ID>,
    pub to_email: String,
    pub from_inbox: String,
    pub message_id: Option<String>,
    pub status: SendStatus,
    pub error: Option<String>,
    pub created_at: i64,
}

impl SendLogEntry {
    pub fn sent(to_email: &str, from_inbox: &str, message_id: Option<String>, now: i64) -> Self {
        Self {
            id: Default::default(),
            reminder_id: None,
            assignment_id: None,
            to_email: to_email.to_string(),
            from_inbox: from_inbox.to_string(),
            message_id,
            status: SendStatus::Sent,
            error: None,
            created_at: now,
        }
    }

    pub fn failed(to_email: &str, from_inbox: &str, error: &str, now: i64) -> Self {
        Self {
            id: Default::default(),
            reminder_id: None,
            assignment_id: None,
            to_email: to_email.to_string(),
            from_inbox: from_inbox.to_string(),
            message_id: None,
            status: SendStatus::Failed,
            error: Some(error.to_string()),
            created_at: now,
        }
    }

    pub fn for_reminder(mut self, reminder_id: &ID, assignment_id: &ID) -> Self {
        self.reminder_id = Some(reminder_id.clone());
        self.assignment_id = Some(assignment_id.clone());
        self
    }
}

impl Entity for SendLogEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
