use dill_reminders_domain::{
    DispatchReport, DrainReport, ReminderRecord, ReminderStatus, SendLogEntry, SendStatus,
    TriggerReport, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRecordDTO {
    pub id: ID,
    pub assignment_id: ID,
    pub trigger_label: String,
    pub scheduled_for: i64,
    pub status: ReminderStatus,
    pub attempts: i64,
    pub last_error: Option<String>,
    pub message_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub sent_at: Option<i64>,
}

impl ReminderRecordDTO {
    pub fn new(record: ReminderRecord) -> Self {
        Self {
            id: record.id,
            assignment_id: record.assignment_id,
            trigger_label: record.trigger_label,
            scheduled_for: record.scheduled_for,
            status: record.status,
            attempts: record.attempts,
            last_error: record.last_error,
            message_id: record.message_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            sent_at: record.sent_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendLogEntryDTO {
    pub id: ID,
    pub reminder_id: Option<ID>,
    pub assignment_id: Option<ID>,
    pub to_email: String,
    pub from_inbox: String,
    pub message_id: Option<String>,
    pub status: SendStatus,
    pub error: Option<String>,
    pub created_at: i64,
}

impl SendLogEntryDTO {
    pub fn new(entry: SendLogEntry) -> Self {
        Self {
            id: entry.id,
            reminder_id: entry.reminder_id,
            assignment_id: entry.assignment_id,
            to_email: entry.to_email,
            from_inbox: entry.from_inbox,
            message_id: entry.message_id,
            status: entry.status,
            error: entry.error,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TriggerReportDTO {
    pub label: String,
    pub matched: usize,
    pub sent: usize,
    pub failed: usize,
    pub already_sent: usize,
    pub store_errors: usize,
}

impl TriggerReportDTO {
    pub fn new(report: TriggerReport) -> Self {
        Self {
            label: report.label,
            matched: report.matched,
            sent: report.sent,
            failed: report.failed,
            already_sent: report.already_sent,
            store_errors: report.store_errors,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DrainReportDTO {
    pub sent_count: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl DrainReportDTO {
    pub fn new(report: DrainReport) -> Self {
        Self {
            sent_count: report.sent_count,
            failed: report.failed,
            skipped: report.skipped,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReportDTO {
    pub sent_count: usize,
    pub triggers: Vec<TriggerReportDTO>,
    pub manual: DrainReportDTO,
}

impl DispatchReportDTO {
    pub fn new(report: DispatchReport) -> Self {
        Self {
            sent_count: report.sent_count,
            triggers: report
                .triggers
                .into_iter()
                .map(TriggerReportDTO::new)
                .collect(),
            manual: DrainReportDTO::new(report.manual),
        }
    }
}
