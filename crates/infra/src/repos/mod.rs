mod assignment;
mod reminder;
mod send_log;
mod shared;
mod student;

use assignment::{InMemoryAssignmentRepo, MongoAssignmentRepo};
use mongodb::{options::ClientOptions, Client};
use reminder::{InMemoryReminderRepo, MongoReminderRepo};
use send_log::{InMemorySendLogRepo, MongoSendLogRepo};
use std::sync::Arc;
use student::{InMemoryStudentRepo, MongoStudentRepo};
use tracing::info;

pub use assignment::IAssignmentRepo;
pub use reminder::IReminderRepo;
pub use send_log::ISendLogRepo;
pub use shared::query_structs::*;
pub use student::IStudentRepo;

#[derive(Clone)]
pub struct Repos {
    pub assignments: Arc<dyn IAssignmentRepo>,
    pub students: Arc<dyn IStudentRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub send_logs: Arc<dyn ISendLogRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.collection::<mongodb::bson::Document>("server-start")
            .insert_one(
                mongodb::bson::doc! {
                "server-start": 1
                },
                None,
            )
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            assignments: Arc::new(MongoAssignmentRepo::new(&db)),
            students: Arc::new(MongoStudentRepo::new(&db)),
            reminders: Arc::new(MongoReminderRepo::new(&db)),
            send_logs: Arc::new(MongoSendLogRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            assignments: Arc::new(InMemoryAssignmentRepo::new()),
            students: Arc::new(InMemoryStudentRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            send_logs: Arc::new(InMemorySendLogRepo::new()),
        }
    }
}

/// Inmemory repos, plus mongo repos when a mongo connection string is provided
#[cfg(test)]
pub(crate) async fn create_test_repos() -> Vec<Repos> {
    let mut repos = vec![Repos::create_inmemory()];
    if let Ok(connection_string) = std::env::var("MONGODB_CONNECTION_STRING") {
        let db_name = std::env::var("MONGODB_NAME").unwrap_or_else(|_| "dill-reminders-test".into());
        repos.push(
            Repos::create_mongodb(&connection_string, &db_name)
                .await
                .expect("To connect to mongodb"),
        );
    }
    repos
}
