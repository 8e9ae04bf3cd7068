use dill_reminders_domain::{Assignment, DueAt, Student};
use dill_reminders_infra::{DillContext, InMemoryMailTransport, StaticTimeSys};
use std::sync::Arc;

pub const FROM_INBOX: &str = "dill@agentmail.to";

pub struct TestContext {
    pub ctx: DillContext,
    pub mail: Arc<InMemoryMailTransport>,
}

/// Inmemory context with time standing still at `now`
pub fn setup_context(now: i64) -> TestContext {
    let mut ctx = DillContext::create_inmemory();
    let mail = Arc::new(InMemoryMailTransport::new());
    ctx.mail = mail.clone();
    ctx.sys = Arc::new(StaticTimeSys(now));
    ctx.config.from_inbox = Some(FROM_INBOX.into());
    TestContext { ctx, mail }
}

pub async fn insert_student(ctx: &DillContext, email: Option<&str>) -> Student {
    let student = Student::new(email.map(String::from));
    ctx.repos.students.insert(&student).await.unwrap();
    student
}

pub async fn insert_assignment(
    ctx: &DillContext,
    student: &Student,
    title: &str,
    due_at: DueAt,
) -> Assignment {
    let assignment = Assignment::new(title.into(), due_at, student.id.clone());
    ctx.repos.assignments.insert(&assignment).await.unwrap();
    assignment
}
