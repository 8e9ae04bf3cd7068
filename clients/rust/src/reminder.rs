use crate::{APIResponse, BaseClient, TriggerConfig, ID};
use dill_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

/// Address the assignment either directly or through the PDF it was created from
pub enum RequestManualReminderInput {
    Assignment(ID),
    StudentPdf { student_id: ID, pdf_id: String },
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Runs the dispatcher. Without `triggers` the server uses its configured ones.
    pub async fn dispatch(
        &self,
        triggers: Option<Vec<TriggerConfig>>,
    ) -> APIResponse<run_dispatch::APIResponse> {
        let body = run_dispatch::RequestBody { triggers };
        self.base
            .post(body, "reminders/dispatch".into(), StatusCode::OK)
            .await
    }

    pub async fn request_manual(
        &self,
        input: RequestManualReminderInput,
    ) -> APIResponse<request_manual_reminder::APIResponse> {
        let body = match input {
            RequestManualReminderInput::Assignment(assignment_id) => {
                request_manual_reminder::RequestBody {
                    assignment_id: Some(assignment_id),
                    ..Default::default()
                }
            }
            RequestManualReminderInput::StudentPdf { student_id, pdf_id } => {
                request_manual_reminder::RequestBody {
                    assignment_id: None,
                    student_id: Some(student_id),
                    pdf_id: Some(pdf_id),
                }
            }
        };
        self.base
            .post(body, "reminders/manual".into(), StatusCode::CREATED)
            .await
    }

    pub async fn drain_manual(&self) -> APIResponse<drain_manual_reminders::APIResponse> {
        self.base
            .post((), "reminders/manual/drain".into(), StatusCode::OK)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
