use dill_reminders_domain::SummaryReport;
use serde::{Deserialize, Serialize};

pub mod send_daily_summaries {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub students: usize,
        pub sent: usize,
        pub failed: usize,
    }

    impl APIResponse {
        pub fn new(report: SummaryReport) -> Self {
            Self {
                students: report.students,
                sent: report.sent,
                failed: report.failed,
            }
        }
    }
}
