use crate::dtos::{DispatchReportDTO, DrainReportDTO, ReminderRecordDTO, SendLogEntryDTO};
use dill_reminders_domain::{ReminderRecord, SendLogEntry, ID};
use serde::{Deserialize, Serialize};

pub mod run_dispatch {
    use super::*;
    use dill_reminders_domain::TriggerConfig;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Overrides the configured trigger list
        #[serde(default)]
        pub triggers: Option<Vec<TriggerConfig>>,
    }

    pub type APIResponse = DispatchReportDTO;
}

pub mod request_manual_reminder {
    use super::*;

    /// Either `assignmentId`, or `studentId` together with `pdfId`
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub assignment_id: Option<ID>,
        #[serde(default)]
        pub student_id: Option<ID>,
        #[serde(default)]
        pub pdf_id: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub record_id: ID,
        pub reminder: ReminderRecordDTO,
    }

    impl APIResponse {
        pub fn new(record: ReminderRecord) -> Self {
            Self {
                record_id: record.id.clone(),
                reminder: ReminderRecordDTO::new(record),
            }
        }
    }
}

pub mod drain_manual_reminders {
    use super::*;

    pub type APIResponse = DrainReportDTO;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderRecordDTO,
        pub send_logs: Vec<SendLogEntryDTO>,
    }

    impl APIResponse {
        pub fn new(record: ReminderRecord, send_logs: Vec<SendLogEntry>) -> Self {
            Self {
                reminder: ReminderRecordDTO::new(record),
                send_logs: send_logs.into_iter().map(SendLogEntryDTO::new).collect(),
            }
        }
    }
}
