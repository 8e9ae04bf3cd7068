use super::ISendLogRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use dill_reminders_domain::{SendLogEntry, SendStatus, ID};
use mongodb::{
    bson::{doc, Document},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoSendLogRepo {
    collection: Collection<Document>,
}

impl MongoSendLogRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("send_logs"),
        }
    }
}

#[async_trait::async_trait]
impl ISendLogRepo for MongoSendLogRepo {
    async fn append(&self, entry: &SendLogEntry) -> anyhow::Result<ID> {
        mongo_repo::insert::<_, SendLogMongo>(&self.collection, entry).await?;
        Ok(entry.id.clone())
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<SendLogEntry>> {
        let filter = doc! {
            "reminder_id": reminder_id.as_str()
        };
        let options = FindOptions::builder()
            .sort(doc! { "created_at": 1 })
            .build();
        mongo_repo::find_many_by::<_, SendLogMongo>(&self.collection, filter, Some(options)).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SendLogMongo {
    _id: String,
    reminder_id: Option<String>,
    assignment_id: Option<String>,
    to_email: String,
    from_inbox: String,
    message_id: Option<String>,
    status: SendStatus,
    error: Option<String>,
    created_at: i64,
}

impl MongoDocument<SendLogEntry> for SendLogMongo {
    fn to_domain(self) -> SendLogEntry {
        SendLogEntry {
            id: ID::from(self._id),
            reminder_id: self.reminder_id.map(ID::from),
            assignment_id: self.assignment_id.map(ID::from),
            to_email: self.to_email,
            from_inbox: self.from_inbox,
            message_id: self.message_id,
            status: self.status,
            error: self.error,
            created_at: self.created_at,
        }
    }

    fn from_domain(entry: &SendLogEntry) -> Self {
        Self {
            _id: entry.id.as_string(),
            reminder_id: entry.reminder_id.as_ref().map(|id| id.as_string()),
            assignment_id: entry.assignment_id.as_ref().map(|id| id.as_string()),
            to_email: entry.to_email.clone(),
            from_inbox: entry.from_inbox.clone(),
            message_id: entry.message_id.clone(),
            status: entry.status,
            error: entry.error.clone(),
            created_at: entry.created_at,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id.as_str()
        }
    }
}
