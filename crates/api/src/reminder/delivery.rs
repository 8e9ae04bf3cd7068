use anyhow::anyhow;
use dill_reminders_domain::{DeliveryOutcome, ReminderMessage, ReminderRecord, SendLogEntry};
use dill_reminders_infra::{DillContext, OutboundMessage};
use tracing::{error, warn};

/// Sends `message` for the reminder, appends the attempt to the send log and
/// then records it on the reminder record. A transport failure is a `Failed`
/// outcome, only a failure to record the attempt is an error.
pub async fn deliver(
    ctx: &DillContext,
    reminder: &ReminderRecord,
    to: &str,
    from: &str,
    message: ReminderMessage,
) -> anyhow::Result<DeliveryOutcome> {
    let outbound = OutboundMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: message.subject,
        body: message.body,
    };

    let outcome = match ctx.mail.send(&outbound).await {
        Ok(sent) => DeliveryOutcome::Sent {
            message_id: sent.message_id,
        },
        Err(e) => {
            warn!(
                "Unable to deliver reminder: {} to: {}. Error: {:?}",
                reminder.id, to, e
            );
            DeliveryOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    let now = ctx.sys.get_timestamp_millis();
    let entry = match &outcome {
        DeliveryOutcome::Sent { message_id } => {
            SendLogEntry::sent(to, from, message_id.clone(), now)
        }
        DeliveryOutcome::Failed { error } => SendLogEntry::failed(to, from, error, now),
    }
    .for_reminder(&reminder.id, &reminder.assignment_id);
    if let Err(e) = ctx.repos.send_logs.append(&entry).await {
        error!(
            "Unable to append send log entry for reminder: {}. Error: {:?}",
            reminder.id, e
        );
    }

    ctx.repos
        .reminders
        .record_attempt(&reminder.id, &outcome, now)
        .await?
        .ok_or_else(|| anyhow!("Reminder: {} was not found", reminder.id))?;

    Ok(outcome)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_helpers::{setup_context, FROM_INBOX};
    use dill_reminders_domain::{ReminderStatus, SendStatus, ID};

    fn message() -> ReminderMessage {
        ReminderMessage {
            subject: "Reminder".into(),
            body: "Body".into(),
        }
    }

    #[actix_web::test]
    async fn records_successful_delivery() {
        let test_ctx = setup_context(1000);
        let ctx = &test_ctx.ctx;
        let record = ReminderRecord::new(ID::from("A1"), "24h", 5000, 1000);
        ctx.repos.reminders.schedule(&record).await.unwrap();

        let outcome = deliver(ctx, &record, "s@example.com", FROM_INBOX, message())
            .await
            .unwrap();
        assert!(matches!(outcome, DeliveryOutcome::Sent { message_id: Some(_) }));

        let stored = ctx.repos.reminders.find(&record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Sent);
        assert_eq!(stored.attempts, 1);
        assert_eq!(stored.sent_at, Some(1000));

        let logs = ctx.repos.send_logs.find_by_reminder(&record.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, SendStatus::Sent);
        assert_eq!(logs[0].message_id, stored.message_id);
        assert_eq!(logs[0].from_inbox, FROM_INBOX);

        let sent = test_ctx.mail.sent_to("s@example.com");
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Reminder");
    }

    #[actix_web::test]
    async fn records_failed_delivery() {
        let test_ctx = setup_context(1000);
        let ctx = &test_ctx.ctx;
        test_ctx.mail.fail_for("s@example.com", "rate limited");
        let record = ReminderRecord::new(ID::from("A1"), "24h", 5000, 1000);
        ctx.repos.reminders.schedule(&record).await.unwrap();

        let outcome = deliver(ctx, &record, "s@example.com", FROM_INBOX, message())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DeliveryOutcome::Failed {
                error: "rate limited".into()
            }
        );

        let stored = ctx.repos.reminders.find(&record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ReminderStatus::Failed);
        assert_eq!(stored.last_error.as_deref(), Some("rate limited"));

        let logs = ctx.repos.send_logs.find_by_reminder(&record.id).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, SendStatus::Failed);
        assert_eq!(logs[0].error.as_deref(), Some("rate limited"));
    }

    #[actix_web::test]
    async fn fails_for_unknown_reminder() {
        let test_ctx = setup_context(1000);
        let record = ReminderRecord::new(ID::from("A1"), "24h", 5000, 1000);
        let res = deliver(&test_ctx.ctx, &record, "s@example.com", FROM_INBOX, message()).await;
        assert!(res.is_err());

        // The email went out, so the send log still has it
        let logs = test_ctx
            .ctx
            .repos
            .send_logs
            .find_by_reminder(&record.id)
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, SendStatus::Sent);
    }
}
