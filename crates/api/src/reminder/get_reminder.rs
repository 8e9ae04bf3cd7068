use crate::{
    error::DillError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use dill_reminders_api_structs::get_reminder::*;
use dill_reminders_domain::{ReminderRecord, SendLogEntry, ID};
use dill_reminders_infra::DillContext;
use tracing::error;

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<DillContext>,
) -> Result<HttpResponse, DillError> {
    protect_route(&http_req, &ctx)?;

    let usecase = GetReminderUseCase {
        reminder_id: path.into_inner().reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|(reminder, send_logs)| {
            HttpResponse::Ok().json(APIResponse::new(reminder, send_logs))
        })
        .map_err(DillError::from)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for DillError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
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
impl UseCase for GetReminderUseCase {
    type Response = (ReminderRecord, Vec<SendLogEntry>);

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &DillContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await? {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        let send_logs = ctx.repos.send_logs.find_by_reminder(&reminder.id).await?;

        Ok((reminder, send_logs))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::setup_context;
    use dill_reminders_domain::DeliveryOutcome;

    #[actix_web::test]
    async fn finds_reminder_with_send_logs() {
        let test_ctx = setup_context(10);
        let ctx = &test_ctx.ctx;
        let record = ReminderRecord::new(ID::from("A1"), "2h", 100, 10);
        ctx.repos.reminders.schedule(&record).await.unwrap();
        let outcome = DeliveryOutcome::Sent {
            message_id: Some("m1".into()),
        };
        ctx.repos
            .reminders
            .record_attempt(&record.id, &outcome, 20)
            .await
            .unwrap();
        let entry = SendLogEntry::sent("s@example.com", "dill@agentmail.to", Some("m1".into()), 20)
            .for_reminder(&record.id, &record.assignment_id);
        ctx.repos.send_logs.append(&entry).await.unwrap();

        let (reminder, send_logs) = GetReminderUseCase {
            reminder_id: record.id.clone(),
        }
        .execute(ctx)
        .await
        .unwrap();
        assert!(reminder.is_sent());
        assert_eq!(send_logs.len(), 1);
        assert_eq!(send_logs[0].message_id.as_deref(), Some("m1"));
    }

    #[actix_web::test]
    async fn rejects_unknown_reminder() {
        let test_ctx = setup_context(10);
        let res = GetReminderUseCase {
            reminder_id: ID::from("A1_2h"),
        }
        .execute(&test_ctx.ctx)
        .await;
        assert!(matches!(res, Err(UseCaseError::NotFound(_))));
    }
}
