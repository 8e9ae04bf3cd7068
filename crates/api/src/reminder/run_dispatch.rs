use super::{
    candidates::fetch_active_assignments, delivery::deliver, drain_manual::drain_pending_manual,
};
use crate::{
    error::DillError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dill_reminders_api_structs::run_dispatch::*;
use dill_reminders_domain::{
    AssignmentWithStudent, DeliveryOutcome, DispatchReport, ReminderMessage, ReminderRecord,
    TriggerConfig, TriggerReport,
};
use dill_reminders_infra::DillContext;
use tracing::{debug, error, info};

pub async fn run_dispatch_controller(
    http_req: HttpRequest,
    body: web::Bytes,
    ctx: web::Data<DillContext>,
) -> Result<HttpResponse, DillError> {
    protect_route(&http_req, &ctx)?;

    let triggers = parse_triggers(&body)?.unwrap_or_else(|| ctx.config.triggers.clone());
    let usecase = RunDispatchUseCase { triggers };

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(DillError::from)
}

/// An empty body means the configured triggers, anything else must be a
/// valid `RequestBody`.
fn parse_triggers(body: &[u8]) -> Result<Option<Vec<TriggerConfig>>, DillError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<RequestBody>(body)
        .map(|body| body.triggers)
        .map_err(|e| DillError::BadClientData(format!("Malformed dispatch request: {}", e)))
}

/// Evaluates every trigger against every candidate assignment and delivers
/// the reminders that are due and not yet sent. Pending manual reminders
/// are drained afterwards.
#[derive(Debug)]
pub struct RunDispatchUseCase {
    pub triggers: Vec<TriggerConfig>,
}

#[derive(Debug)]
pub enum UseCaseError {
    MissingSender,
    InvalidTrigger(String),
    StorageError,
}

impl From<UseCaseError> for DillError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingSender => Self::Conflict(
                "No sender inbox is configured, so no reminders can be dispatched".into(),
            ),
            UseCaseError::InvalidTrigger(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunDispatchUseCase {
    type Response = DispatchReport;

    type Error = UseCaseError;

    const NAME: &'static str = "RunDispatch";

    async fn execute(&mut self, ctx: &DillContext) -> Result<Self::Response, Self::Error> {
        let _lock = ctx.dispatch_lock.lock().await;

        let from = ctx
            .config
            .from_inbox
            .clone()
            .ok_or(UseCaseError::MissingSender)?;
        for trigger in &self.triggers {
            trigger
                .validate()
                .map_err(|e| UseCaseError::InvalidTrigger(e.to_string()))?;
        }

        let candidates = fetch_active_assignments(ctx).await.map_err(|e| {
            error!("Unable to fetch candidate assignments. Error: {:?}", e);
            UseCaseError::StorageError
        })?;

        let now = ctx.sys.get_timestamp_millis();
        let mut trigger_reports = Vec::with_capacity(self.triggers.len());
        for trigger in &self.triggers {
            let report = dispatch_trigger(ctx, trigger, &candidates, &from, now).await;
            info!(
                "Trigger: {} matched {} candidates, sent: {}, failed: {}",
                report.label, report.matched, report.sent, report.failed
            );
            trigger_reports.push(report);
        }

        let manual = match drain_pending_manual(ctx, &from).await {
            Ok(report) => report,
            Err(e) => {
                error!("Unable to drain manual reminders. Error: {:?}", e);
                Default::default()
            }
        };

        Ok(DispatchReport::new(trigger_reports, manual))
    }
}

async fn dispatch_trigger(
    ctx: &DillContext,
    trigger: &TriggerConfig,
    candidates: &[AssignmentWithStudent],
    from: &str,
    now: i64,
) -> TriggerReport {
    let label = trigger.label();
    let mut report = TriggerReport::new(label.clone());

    for candidate in candidates {
        let assignment = &candidate.assignment;
        let due = match assignment.due_at.timestamp_millis() {
            Some(due) => due,
            None => {
                debug!(
                    "Assignment: {} has an unreadable due date: {:?}",
                    assignment.id, assignment.due_at
                );
                continue;
            }
        };
        if !trigger.matches(now, due) {
            continue;
        }
        let to = match candidate.student.contact_email() {
            Some(to) => to,
            None => continue,
        };
        report.matched += 1;

        let record = ReminderRecord::new(assignment.id.clone(), &label, due, now);
        let record = match ctx.repos.reminders.schedule(&record).await {
            Ok(record) => record,
            Err(e) => {
                error!("Unable to schedule reminder: {}. Error: {:?}", record.id, e);
                report.store_errors += 1;
                continue;
            }
        };
        if record.is_sent() {
            report.already_sent += 1;
            continue;
        }

        let message = ReminderMessage::scheduled(&assignment.title, due, trigger);
        match deliver(ctx, &record, to, from, message).await {
            Ok(DeliveryOutcome::Sent { .. }) => report.sent += 1,
            Ok(DeliveryOutcome::Failed { .. }) => report.failed += 1,
            Err(e) => {
                error!("Unable to record delivery of reminder: {}. Error: {:?}", record.id, e);
                report.store_errors += 1;
            }
        }
    }

    report
}
