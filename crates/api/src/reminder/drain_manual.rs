use super::delivery::deliver;
use crate::{
    error::DillError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dill_reminders_api_structs::drain_manual_reminders::*;
use dill_reminders_domain::{
    DeliveryOutcome, DrainReport, ReminderMessage, ReminderRecord, ReminderStatus,
    MANUAL_TRIGGER_LABEL,
};
use dill_reminders_infra::DillContext;
use tracing::{error, info};

pub async fn drain_manual_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<DillContext>,
) -> Result<HttpResponse, DillError> {
    protect_route(&http_req, &ctx)?;

    let usecase = DrainManualRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(DillError::from)
}

#[derive(Debug)]
pub struct DrainManualRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    MissingSender,
    StorageError,
}

impl From<UseCaseError> for DillError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingSender => Self::Conflict(
                "No sender inbox is configured, so no reminders can be dispatched".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DrainManualRemindersUseCase {
    type Response = DrainReport;

    type Error = UseCaseError;

    const NAME: &'static str = "DrainManualReminders";

    async fn execute(&mut self, ctx: &DillContext) -> Result<Self::Response, Self::Error> {
        let _lock = ctx.dispatch_lock.lock().await;

        let from = ctx
            .config
            .from_inbox
            .clone()
            .ok_or(UseCaseError::MissingSender)?;

        drain_pending_manual(ctx, &from).await.map_err(|e| {
            error!("Unable to find manual reminders. Error: {:?}", e);
            UseCaseError::StorageError
        })
    }
}

enum DrainOutcome {
    Sent,
    Failed,
    Skipped,
}

/// Delivers every pending manual reminder. The caller is expected to hold
/// the dispatch lock.
pub async fn drain_pending_manual(ctx: &DillContext, from: &str) -> anyhow::Result<DrainReport> {
    // Broad query on the label only, pending ones are picked here
    let records = ctx
        .repos
        .reminders
        .find_by_trigger(MANUAL_TRIGGER_LABEL)
        .await?;

    let mut report = DrainReport::default();
    for record in records
        .iter()
        .filter(|r| r.status == ReminderStatus::Pending)
    {
        match drain_record(ctx, record, from).await {
            Ok(DrainOutcome::Sent) => report.sent_count += 1,
            Ok(DrainOutcome::Failed) => report.failed += 1,
            Ok(DrainOutcome::Skipped) => report.skipped += 1,
            Err(e) => error!(
                "Unable to drain manual reminder: {}. Error: {:?}",
                record.id, e
            ),
        }
    }

    if report.sent_count + report.failed + report.skipped > 0 {
        info!(
            "Drained manual reminders, sent: {}, failed: {}, skipped: {}",
            report.sent_count, report.failed, report.skipped
        );
    }

    Ok(report)
}

async fn drain_record(
    ctx: &DillContext,
    record: &ReminderRecord,
    from: &str,
) -> anyhow::Result<DrainOutcome> {
    let assignment = match ctx.repos.assignments.find(&record.assignment_id).await? {
        Some(assignment) => assignment,
        None => return fail(ctx, record, "assignment_not_found").await,
    };
    if assignment.completed {
        return skip(ctx, record, "assignment_completed").await;
    }

    let student = match ctx.repos.students.find(&assignment.student_id).await? {
        Some(student) => student,
        None => return fail(ctx, record, "student_not_found").await,
    };
    if student.contact_opt_out {
        return skip(ctx, record, "contact_opt_out").await;
    }
    let to = match student.contact_email() {
        Some(to) => to,
        None => return fail(ctx, record, "missing_email").await,
    };

    let message = ReminderMessage::manual(&assignment.title, assignment.due_at.timestamp_millis());
    let outcome = match deliver(ctx, record, to, from, message).await? {
        DeliveryOutcome::Sent { .. } => DrainOutcome::Sent,
        DeliveryOutcome::Failed { .. } => DrainOutcome::Failed,
    };
    Ok(outcome)
}

/// Counts as an attempt without a send log entry, as there is no recipient
async fn fail(
    ctx: &DillContext,
    record: &ReminderRecord,
    reason: &str,
) -> anyhow::Result<DrainOutcome> {
    let outcome = DeliveryOutcome::Failed {
        error: reason.to_string(),
    };
    let now = ctx.sys.get_timestamp_millis();
    ctx.repos
        .reminders
        .record_attempt(&record.id, &outcome, now)
        .await?;
    Ok(DrainOutcome::Failed)
}

async fn skip(
    ctx: &DillContext,
    record: &ReminderRecord,
    reason: &str,
) -> anyhow::Result<DrainOutcome> {
    let now = ctx.sys.get_timestamp_millis();
    ctx.repos.reminders.skip(&record.id, reason, now).await?;
    Ok(DrainOutcome::Skipped)
}
