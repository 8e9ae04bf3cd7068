use crate::{
    error::DillError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dill_reminders_api_structs::request_manual_reminder::*;
use dill_reminders_domain::{ReminderRecord, ReminderStatus, ID, MANUAL_TRIGGER_LABEL};
use dill_reminders_infra::{DillContext, KVMetadata, MetadataFindQuery};
use tracing::error;

const PDF_ID_METADATA_KEY: &str = "pdfId";

pub async fn request_manual_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<DillContext>,
) -> Result<HttpResponse, DillError> {
    protect_route(&http_req, &ctx)?;

    let body = body.0;
    let target = match (body.assignment_id, body.student_id, body.pdf_id) {
        (Some(assignment_id), _, _) => ManualReminderTarget::Assignment(assignment_id),
        (None, Some(student_id), Some(pdf_id)) => {
            ManualReminderTarget::StudentPdf { student_id, pdf_id }
        }
        _ => {
            return Err(DillError::BadClientData(
                "Either assignmentId or both studentId and pdfId must be provided".into(),
            ))
        }
    };
    let usecase = RequestManualReminderUseCase { target };

    execute(usecase, &ctx)
        .await
        .map(|record| HttpResponse::Created().json(APIResponse::new(record)))
        .map_err(DillError::from)
}

/// The assignment a manual reminder is requested for
#[derive(Debug, Clone)]
pub enum ManualReminderTarget {
    Assignment(ID),
    /// The incomplete assignment of the student that was created from the PDF
    StudentPdf { student_id: ID, pdf_id: String },
}

/// Queues a manual reminder for the next drain. Requesting it again while it
/// is pending or after it was sent changes nothing, a failed or skipped one
/// is put back in the queue.
#[derive(Debug)]
pub struct RequestManualReminderUseCase {
    pub target: ManualReminderTarget,
}

#[derive(Debug)]
pub enum UseCaseError {
    AssignmentNotFound(String),
    StorageError,
}

impl From<UseCaseError> for DillError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::AssignmentNotFound(target) => {
                Self::NotFound(format!("The assignment: {}, was not found.", target))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<anyhow::Error> for UseCaseError {
    fn from(e: anyhow::Error) -> Self {
        error!("Record store error: {:?}", e);
        UseCaseError::StorageError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RequestManualReminderUseCase {
    type Response = ReminderRecord;

    type Error = UseCaseError;

    const NAME: &'static str = "RequestManualReminder";

    async fn execute(&mut self, ctx: &DillContext) -> Result<Self::Response, Self::Error> {
        let assignment_id = self.resolve_assignment(ctx).await?;
        let now = ctx.sys.get_timestamp_millis();

        let record_id = ReminderRecord::key(&assignment_id, MANUAL_TRIGGER_LABEL);
        if let Some(existing) = ctx.repos.reminders.find(&record_id).await? {
            if existing.is_sent() {
                return Ok(existing);
            }
        }

        let record = ctx
            .repos
            .reminders
            .schedule(&ReminderRecord::new_manual(assignment_id, now))
            .await?;
        match record.status {
            ReminderStatus::Failed | ReminderStatus::Skipped => Ok(ctx
                .repos
                .reminders
                .rearm(&record.id, now)
                .await?
                .unwrap_or(record)),
            _ => Ok(record),
        }
    }
}

impl RequestManualReminderUseCase {
    async fn resolve_assignment(&self, ctx: &DillContext) -> Result<ID, UseCaseError> {
        match &self.target {
            ManualReminderTarget::Assignment(assignment_id) => {
                match ctx.repos.assignments.find(assignment_id).await? {
                    Some(assignment) => Ok(assignment.id),
                    None => Err(UseCaseError::AssignmentNotFound(assignment_id.to_string())),
                }
            }
            ManualReminderTarget::StudentPdf { student_id, pdf_id } => {
                let query = MetadataFindQuery {
                    student_id: student_id.clone(),
                    metadata: KVMetadata::new(PDF_ID_METADATA_KEY, pdf_id),
                };
                let assignments = ctx
                    .repos
                    .assignments
                    .find_by_student_and_metadata(query)
                    .await?;
                match assignments.into_iter().next() {
                    Some(assignment) => Ok(assignment.id),
                    None => Err(UseCaseError::AssignmentNotFound(format!(
                        "with pdfId {} of student {}",
                        pdf_id, student_id
                    ))),
                }
            }
        }
    }
}
