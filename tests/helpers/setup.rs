use dill_reminders_api::Application;
use dill_reminders_domain::{Assignment, DueAt, Student};
use dill_reminders_infra::{Config, DillContext, InMemoryMailTransport};
use dill_reminders_sdk::DillSDK;
use std::sync::Arc;

pub const FROM_INBOX: &str = "dill@agentmail.to";

pub struct TestApp {
    pub config: Config,
    /// Shares repos with the running application, used to seed upstream data
    pub ctx: DillContext,
    pub mail: Arc<InMemoryMailTransport>,
}

impl TestApp {
    pub async fn insert_student(&self, email: Option<&str>) -> Student {
        let student = Student::new(email.map(String::from));
        self.ctx.repos.students.insert(&student).await.unwrap();
        student
    }

    pub async fn insert_assignment(&self, student: &Student, title: &str, due: i64) -> Assignment {
        let assignment = Assignment::new(title.into(), DueAt::Millis(due), student.id.clone());
        self.ctx.repos.assignments.insert(&assignment).await.unwrap();
        assignment
    }

    pub fn now(&self) -> i64 {
        self.ctx.sys.get_timestamp_millis()
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, DillSDK, String) {
    spawn_app_with_config(|_| {}).await
}

pub async fn spawn_app_with_config(
    configure: impl FnOnce(&mut Config),
) -> (TestApp, DillSDK, String) {
    let mut ctx = DillContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.dispatch_interval_secs = 0;
    ctx.config.from_inbox = Some(FROM_INBOX.into());
    configure(&mut ctx.config);
    let mail = Arc::new(InMemoryMailTransport::new());
    ctx.mail = mail.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = DillSDK::new(address.clone(), config.api_secret_key.clone());
    let app = TestApp { config, ctx, mail };
    (app, sdk, address)
}
