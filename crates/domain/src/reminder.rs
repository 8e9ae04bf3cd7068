use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Reserved trigger label for reminders requested out of band
pub const MANUAL_TRIGGER_LABEL: &str = "manual";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Failed,
    Skipped,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReminderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            _ => Err(format!("Unknown reminder status: {}", s)),
        }
    }
}

/// Result of one delivery attempt through the mail transport
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Sent { message_id: Option<String> },
    Failed { error: String },
}

/// A `ReminderRecord` tracks the lifecycle of one reminder for one
/// (`Assignment`, trigger) pair.
///
/// The `id` is derived from the pair (see `ReminderRecord::key`) and is the
/// whole idempotency mechanism: whoever schedules the same pair again, for
/// example after a crash, addresses the same record instead of creating a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub id: ID,
    pub assignment_id: ID,
    /// E.g. `24h`, `2m` or `manual`
    pub trigger_label: String,
    /// The due date at scheduling time, or the request time for manual reminders
    pub scheduled_for: i64,
    pub status: ReminderStatus,
    /// Incremented once per delivery attempt, whatever the outcome
    pub attempts: i64,
    pub last_error: Option<String>,
    /// Provider assigned message id of the successful delivery
    pub message_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Set iff `status` is `Sent`
    pub sent_at: Option<i64>,
}

impl ReminderRecord {
    pub fn key(assignment_id: &ID, trigger_label: &str) -> ID {
        ID::from(format!("{}_{}", assignment_id, trigger_label))
    }

    pub fn new(assignment_id: ID, trigger_label: &str, scheduled_for: i64, now: i64) -> Self {
        Self {
            id: Self::key(&assignment_id, trigger_label),
            assignment_id,
            trigger_label: trigger_label.to_string(),
            scheduled_for,
            status: ReminderStatus::Pending,
            attempts: 0,
            last_error: None,
            message_id: None,
            created_at: now,
            updated_at: now,
            sent_at: None,
        }
    }

    pub fn new_manual(assignment_id: ID, now: i64) -> Self {
        Self::new(assignment_id, MANUAL_TRIGGER_LABEL, now, now)
    }

    pub fn is_manual(&self) -> bool {
        self.trigger_label == MANUAL_TRIGGER_LABEL
    }

    pub fn is_sent(&self) -> bool {
        self.status == ReminderStatus::Sent
    }

    /// Re-scheduling an existing record only touches the scheduling fields,
    /// status and attempt history are kept.
    pub fn refresh_schedule(&mut self, scheduled_for: i64, now: i64) {
        self.scheduled_for = scheduled_for;
        self.updated_at = now;
    }

    /// Applies the outcome of one delivery attempt. A sent record is terminal:
    /// later failures are not able to move it back.
    pub fn record_attempt(&mut self, outcome: &DeliveryOutcome, now: i64) {
        if self.is_sent() {
            return;
        }
        self.attempts += 1;
        self.updated_at = now;
        match outcome {
            DeliveryOutcome::Sent { message_id } => {
                self.status = ReminderStatus::Sent;
                self.sent_at = Some(now);
                if message_id.is_some() {
                    self.message_id = message_id.clone();
                }
            }
            DeliveryOutcome::Failed { error } => {
                self.status = ReminderStatus::Failed;
                self.last_error = Some(error.clone());
            }
        }
    }

    /// Marks a pending record as not deliverable without counting an attempt
    pub fn skip(&mut self, reason: &str, now: i64) {
        if self.status != ReminderStatus::Pending {
            return;
        }
        self.status = ReminderStatus::Skipped;
        self.last_error = Some(reason.to_string());
        self.updated_at = now;
    }

    /// Puts a failed or skipped record back in the queue. Returns false
    /// when the record was not re-armed.
    pub fn rearm(&mut self, now: i64) -> bool {
        match self.status {
            ReminderStatus::Failed | ReminderStatus::Skipped => {
                self.status = ReminderStatus::Pending;
                self.updated_at = now;
                true
            }
            ReminderStatus::Pending | ReminderStatus::Sent => false,
        }
    }
}

impl Entity for ReminderRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_derives_deterministic_keys() {
        let assignment_id = ID::from("A1");
        assert_eq!(ReminderRecord::key(&assignment_id, "24h"), ID::from("A1_24h"));
        assert_eq!(
            ReminderRecord::new(assignment_id.clone(), "2m", 10, 5).id,
            ReminderRecord::new(assignment_id.clone(), "2m", 20, 6).id,
        );
        assert_eq!(
            ReminderRecord::new_manual(assignment_id, 5).id,
            ID::from("A1_manual")
        );
    }

    #[test]
    fn it_starts_pending() {
        let record = ReminderRecord::new(ID::from("A1"), "24h", 100, 5);
        assert_eq!(record.status, ReminderStatus::Pending);
        assert_eq!(record.attempts, 0);
        assert_eq!(record.sent_at, None);
        assert_eq!(record.created_at, 5);
        assert!(!record.is_manual());
    }

    #[test]
    fn it_records_failure_then_success() {
        let mut record = ReminderRecord::new(ID::from("A1"), "24h", 100, 5);

        record.record_attempt(
            &DeliveryOutcome::Failed {
                error: "rate limited".into(),
            },
            10,
        );
        assert_eq!(record.status, ReminderStatus::Failed);
        assert_eq!(record.attempts, 1);
        assert_eq!(record.last_error.as_deref(), Some("rate limited"));
        assert_eq!(record.sent_at, None);

        record.record_attempt(
            &DeliveryOutcome::Sent {
                message_id: Some("msg_1".into()),
            },
            20,
        );
        assert_eq!(record.status, ReminderStatus::Sent);
        assert_eq!(record.attempts, 2);
        assert_eq!(record.sent_at, Some(20));
        assert_eq!(record.message_id.as_deref(), Some("msg_1"));
    }

    #[test]
    fn sent_is_terminal() {
        let mut record = ReminderRecord::new(ID::from("A1"), "24h", 100, 5);
        record.record_attempt(&DeliveryOutcome::Sent { message_id: None }, 10);
        record.record_attempt(
            &DeliveryOutcome::Failed {
                error: "boom".into(),
            },
            20,
        );
        record.skip("contact_opt_out", 30);
        assert!(!record.rearm(40));
        assert_eq!(record.status, ReminderStatus::Sent);
        assert_eq!(record.attempts, 1);
        assert_eq!(record.sent_at, Some(10));
        assert_eq!(record.last_error, None);
    }

    #[test]
    fn it_refreshes_schedule_without_touching_history() {
        let mut record = ReminderRecord::new(ID::from("A1"), "24h", 100, 5);
        record.record_attempt(
            &DeliveryOutcome::Failed {
                error: "boom".into(),
            },
            10,
        );
        record.refresh_schedule(200, 30);
        assert_eq!(record.scheduled_for, 200);
        assert_eq!(record.updated_at, 30);
        assert_eq!(record.status, ReminderStatus::Failed);
        assert_eq!(record.attempts, 1);
    }

    #[test]
    fn it_skips_and_rearms() {
        let mut record = ReminderRecord::new_manual(ID::from("A1"), 5);
        record.skip("assignment_completed", 10);
        assert_eq!(record.status, ReminderStatus::Skipped);
        assert_eq!(record.attempts, 0);
        assert!(record.rearm(20));
        assert_eq!(record.status, ReminderStatus::Pending);
        assert!(!record.rearm(30));
    }

    #[test]
    fn it_parses_status() {
        for status in [
            ReminderStatus::Pending,
            ReminderStatus::Sent,
            ReminderStatus::Failed,
            ReminderStatus::Skipped,
        ] {
            assert_eq!(status.as_str().parse::<ReminderStatus>(), Ok(status));
        }
        assert!("done".parse::<ReminderStatus>().is_err());
    }
}
