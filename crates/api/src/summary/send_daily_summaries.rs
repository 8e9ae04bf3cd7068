use crate::{
    error::DillError,
    reminder::fetch_all_assignments,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dill_reminders_api_structs::send_daily_summaries::*;
use dill_reminders_domain::{summarize, ReminderMessage, SendLogEntry, SummaryReport};
use dill_reminders_infra::{DillContext, OutboundMessage};
use tracing::{error, info, warn};

pub async fn send_daily_summaries_controller(
    http_req: HttpRequest,
    ctx: web::Data<DillContext>,
) -> Result<HttpResponse, DillError> {
    protect_route(&http_req, &ctx)?;

    let usecase = SendDailySummariesUseCase {
        top_n: ctx.config.summary_top_n,
    };

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(DillError::from)
}

/// Sends every contactable student an overview of their assignments
#[derive(Debug)]
pub struct SendDailySummariesUseCase {
    /// Maximum number of upcoming assignments listed per student
    pub top_n: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    MissingSender,
    StorageError,
}

impl From<UseCaseError> for DillError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingSender => Self::Conflict(
                "No sender inbox is configured, so no summaries can be sent".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDailySummariesUseCase {
    type Response = SummaryReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDailySummaries";

    async fn execute(&mut self, ctx: &DillContext) -> Result<Self::Response, Self::Error> {
        let from = ctx
            .config
            .from_inbox
            .clone()
            .ok_or(UseCaseError::MissingSender)?;

        let assignments = fetch_all_assignments(ctx).await.map_err(|e| {
            error!("Unable to fetch assignments. Error: {:?}", e);
            UseCaseError::StorageError
        })?;

        let now = ctx.sys.get_timestamp_millis();
        let summaries = summarize(&assignments, now, self.top_n);
        let mut report = SummaryReport {
            students: summaries.len(),
            ..Default::default()
        };

        for summary in &summaries {
            let message = ReminderMessage::summary(summary);
            let outbound = OutboundMessage {
                from: from.clone(),
                to: summary.email.clone(),
                subject: message.subject,
                body: message.body,
            };
            let entry = match ctx.mail.send(&outbound).await {
                Ok(sent) => {
                    report.sent += 1;
                    SendLogEntry::sent(&summary.email, &from, sent.message_id, now)
                }
                Err(e) => {
                    warn!(
                        "Unable to send summary to student: {}. Error: {:?}",
                        summary.student_id, e
                    );
                    report.failed += 1;
                    SendLogEntry::failed(&summary.email, &from, &e.to_string(), now)
                }
            };
            if let Err(e) = ctx.repos.send_logs.append(&entry).await {
                error!(
                    "Unable to append send log entry for summary to student: {}. Error: {:?}",
                    summary.student_id, e
                );
            }
        }

        info!("Sent {} of {} daily summaries", report.sent, report.students);
        Ok(report)
    }
}
