mod helpers;

use dill_reminders_sdk::{
    APIError, DillSDK, ReminderStatus, RequestManualReminderInput, SendStatus, TriggerConfig, ID,
};
use helpers::setup::{spawn_app, spawn_app_with_config, FROM_INBOX};
use reqwest::StatusCode;

const HOUR: i64 = 60 * 60 * 1000;

fn assert_status<T: std::fmt::Debug>(res: Result<T, APIError>, status: StatusCode) {
    match res {
        Err(APIError::UnexpectedStatusCode(code, _)) => assert_eq!(code, status),
        other => panic!("Expected status code: {}, got: {:?}", status, other),
    }
}

#[actix_web::test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::test]
async fn test_requires_api_key() {
    let (_, _, address) = spawn_app().await;
    let sdk = DillSDK::new(address.clone(), "wrong");
    assert_status(sdk.reminder.dispatch(None).await, StatusCode::UNAUTHORIZED);
    assert_status(sdk.reminder.drain_manual().await, StatusCode::UNAUTHORIZED);
    assert_status(sdk.summary.send_daily().await, StatusCode::UNAUTHORIZED);

    // The health check stays public
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::test]
async fn test_dispatch_sends_once() {
    let (app, sdk, _) = spawn_app().await;
    let student = app.insert_student(Some("s@example.com")).await;
    let assignment = app
        .insert_assignment(&student, "Essay", app.now() + 2 * HOUR)
        .await;
    let triggers = vec![TriggerConfig::hours(2.0, 10.0)];

    let report = sdk
        .reminder
        .dispatch(Some(triggers.clone()))
        .await
        .expect("To dispatch reminders");
    assert_eq!(report.sent_count, 1);
    assert_eq!(report.triggers[0].label, "2h");
    assert_eq!(report.triggers[0].matched, 1);

    let report = sdk
        .reminder
        .dispatch(Some(triggers))
        .await
        .expect("To dispatch reminders");
    assert_eq!(report.sent_count, 0);
    assert_eq!(report.triggers[0].already_sent, 1);

    let sent = app.mail.sent_to("s@example.com");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, FROM_INBOX);

    let reminder_id = ID::from(format!("{}_2h", assignment.id));
    let res = sdk
        .reminder
        .get(reminder_id.clone())
        .await
        .expect("To find reminder");
    assert_eq!(res.reminder.id, reminder_id);
    assert_eq!(res.reminder.status, ReminderStatus::Sent);
    assert_eq!(res.reminder.attempts, 1);
    assert_eq!(res.send_logs.len(), 1);
    assert_eq!(res.send_logs[0].status, SendStatus::Sent);
    assert_eq!(res.send_logs[0].message_id, res.reminder.message_id);
}

#[actix_web::test]
async fn test_dispatch_uses_configured_triggers() {
    let (app, sdk, _) = spawn_app_with_config(|config| {
        config.triggers = vec![TriggerConfig::hours(24.0, 10.0)];
    })
    .await;
    let student = app.insert_student(Some("s@example.com")).await;
    app.insert_assignment(&student, "Day", app.now() + 24 * HOUR)
        .await;
    app.insert_assignment(&student, "Soon", app.now() + 2 * HOUR)
        .await;

    let report = sdk.reminder.dispatch(None).await.expect("To dispatch");
    assert_eq!(report.sent_count, 1);
    assert_eq!(report.triggers.len(), 1);
    assert_eq!(report.triggers[0].label, "24h");
}

#[actix_web::test]
async fn test_dispatch_rejects_invalid_trigger() {
    let (_, sdk, _) = spawn_app().await;
    let res = sdk
        .reminder
        .dispatch(Some(vec![TriggerConfig::minutes(-5.0, 2.0)]))
        .await;
    assert_status(res, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_dispatch_without_sender_conflicts() {
    let (app, sdk, _) = spawn_app_with_config(|config| config.from_inbox = None).await;
    let student = app.insert_student(Some("s@example.com")).await;
    app.insert_assignment(&student, "Essay", app.now() + 2 * HOUR)
        .await;

    assert_status(sdk.reminder.dispatch(None).await, StatusCode::CONFLICT);
    assert_status(sdk.reminder.drain_manual().await, StatusCode::CONFLICT);
    assert!(app.mail.sent_messages().is_empty());
}

#[actix_web::test]
async fn test_manual_reminder_flow() {
    let (app, sdk, _) = spawn_app().await;
    let student = app.insert_student(Some("s@example.com")).await;
    let assignment = app
        .insert_assignment(&student, "Essay", app.now() + 30 * HOUR)
        .await;

    let res = sdk
        .reminder
        .request_manual(RequestManualReminderInput::Assignment(
            assignment.id.clone(),
        ))
        .await
        .expect("To request a manual reminder");
    assert_eq!(res.record_id, ID::from(format!("{}_manual", assignment.id)));
    assert_eq!(res.reminder.status, ReminderStatus::Pending);

    let report = sdk.reminder.drain_manual().await.expect("To drain");
    assert_eq!(report.sent_count, 1);
    let report = sdk.reminder.drain_manual().await.expect("To drain");
    assert_eq!(report.sent_count, 0);

    let res = sdk
        .reminder
        .get(res.record_id)
        .await
        .expect("To find reminder");
    assert_eq!(res.reminder.status, ReminderStatus::Sent);
    assert_eq!(app.mail.sent_to("s@example.com").len(), 1);
}

#[actix_web::test]
async fn test_manual_reminder_by_pdf() {
    let (app, sdk, _) = spawn_app().await;
    let student = app.insert_student(Some("s@example.com")).await;
    let mut assignment = app
        .insert_assignment(&student, "Essay", app.now() + 30 * HOUR)
        .await;
    assignment
        .metadata
        .insert("pdfId".into(), "pdf-1".into());
    app.ctx.repos.assignments.save(&assignment).await.unwrap();

    let res = sdk
        .reminder
        .request_manual(RequestManualReminderInput::StudentPdf {
            student_id: student.id.clone(),
            pdf_id: "pdf-1".into(),
        })
        .await
        .expect("To request a manual reminder");
    assert_eq!(res.reminder.assignment_id, assignment.id);

    let res = sdk
        .reminder
        .request_manual(RequestManualReminderInput::StudentPdf {
            student_id: student.id.clone(),
            pdf_id: "pdf-2".into(),
        })
        .await;
    assert_status(res, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_manual_reminder_for_unknown_assignment() {
    let (_, sdk, _) = spawn_app().await;
    let res = sdk
        .reminder
        .request_manual(RequestManualReminderInput::Assignment(ID::from("missing")))
        .await;
    assert_status(res, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_get_unknown_reminder() {
    let (_, sdk, _) = spawn_app().await;
    let res = sdk.reminder.get(ID::from("missing_2h")).await;
    assert_status(res, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_send_daily_summaries() {
    let (app, sdk, _) = spawn_app().await;
    let student = app.insert_student(Some("s@example.com")).await;
    app.insert_assignment(&student, "Essay", app.now() + 30 * HOUR)
        .await;
    let opted_out = {
        let mut student = app.insert_student(Some("o@example.com")).await;
        student.contact_opt_out = true;
        app.ctx.repos.students.save(&student).await.unwrap();
        student
    };
    app.insert_assignment(&opted_out, "Essay", app.now() + 30 * HOUR)
        .await;

    let res = sdk.summary.send_daily().await.expect("To send summaries");
    assert_eq!(res.students, 1);
    assert_eq!(res.sent, 1);
    assert_eq!(res.failed, 0);

    let sent = app.mail.sent_to("s@example.com");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Your assignments summary: 1 due");
    assert!(app.mail.sent_to("o@example.com").is_empty());
}

#[actix_web::test]
async fn test_dispatch_rejects_malformed_body() {
    let (app, _, address) = spawn_app_with_config(|config| {
        config.triggers = vec![TriggerConfig::hours(2.0, 10.0)];
    })
    .await;
    let student = app.insert_student(Some("s@example.com")).await;
    app.insert_assignment(&student, "Essay", app.now() + 2 * HOUR)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/api/v1/reminders/dispatch", address);
    let res = client
        .post(&url)
        .header("x-api-key", app.config.api_secret_key.clone())
        .header("content-type", "application/json")
        .body(r#"{"triggers":[{"target":24,"unit":"days","toleranceMinutes":10}]}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(app.mail.sent_messages().is_empty());

    // Without a body the configured triggers are used
    let res = client
        .post(&url)
        .header("x-api-key", app.config.api_secret_key.clone())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(app.mail.sent_to("s@example.com").len(), 1);
}
