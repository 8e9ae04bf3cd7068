use super::IReminderRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use anyhow::anyhow;
use dill_reminders_domain::{DeliveryOutcome, ReminderRecord, ReminderStatus, ID};
use mongodb::{
    bson::{doc, Bson, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }

    /// Conditional update of one record. When the condition does not hold the
    /// record is returned unchanged.
    async fn update_where(
        &self,
        reminder_id: &ID,
        condition: Document,
        update: Document,
    ) -> anyhow::Result<Option<ReminderRecord>> {
        let mut filter = mongo_repo::get_id_filter(reminder_id);
        for (key, value) in condition {
            filter.insert(key, value);
        }
        let updated = mongo_repo::find_one_and_update::<_, ReminderMongo>(
            &self.collection,
            filter,
            update,
            false,
        )
        .await?;
        match updated {
            Some(record) => Ok(Some(record)),
            None => self.find(reminder_id).await,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<ReminderRecord>> {
        mongo_repo::find::<_, ReminderMongo>(&self.collection, reminder_id).await
    }

    async fn schedule(&self, record: &ReminderRecord) -> anyhow::Result<ReminderRecord> {
        let filter = mongo_repo::get_id_filter(&record.id);
        // Identity and history fields are only written when the record is created
        let update = doc! {
            "$set": {
                "scheduled_for": record.scheduled_for,
                "updated_at": record.updated_at,
            },
            "$setOnInsert": {
                "assignment_id": record.assignment_id.as_str(),
                "trigger_label": record.trigger_label.as_str(),
                "status": record.status.as_str(),
                "attempts": record.attempts,
                "last_error": Bson::Null,
                "message_id": Bson::Null,
                "created_at": record.created_at,
                "sent_at": Bson::Null,
            }
        };
        mongo_repo::find_one_and_update::<_, ReminderMongo>(&self.collection, filter, update, true)
            .await?
            .ok_or_else(|| anyhow!("Upsert of reminder: {} returned no document", record.id))
    }

    async fn record_attempt(
        &self,
        reminder_id: &ID,
        outcome: &DeliveryOutcome,
        now: i64,
    ) -> anyhow::Result<Option<ReminderRecord>> {
        let mut set = doc! {
            "updated_at": now
        };
        match outcome {
            DeliveryOutcome::Sent { message_id } => {
                set.insert("status", ReminderStatus::Sent.as_str());
                set.insert("sent_at", now);
                if let Some(message_id) = message_id {
                    set.insert("message_id", message_id.as_str());
                }
            }
            DeliveryOutcome::Failed { error } => {
                set.insert("status", ReminderStatus::Failed.as_str());
                set.insert("last_error", error.as_str());
            }
        }
        let condition = doc! {
            "status": { "$ne": ReminderStatus::Sent.as_str() }
        };
        let update = doc! {
            "$set": set,
            "$inc": { "attempts": 1_i64 }
        };
        self.update_where(reminder_id, condition, update).await
    }

    async fn skip(
        &self,
        reminder_id: &ID,
        reason: &str,
        now: i64,
    ) -> anyhow::Result<Option<ReminderRecord>> {
        let condition = doc! {
            "status": ReminderStatus::Pending.as_str()
        };
        let update = doc! {
            "$set": {
                "status": ReminderStatus::Skipped.as_str(),
                "last_error": reason,
                "updated_at": now,
            }
        };
        self.update_where(reminder_id, condition, update).await
    }

    async fn rearm(&self, reminder_id: &ID, now: i64) -> anyhow::Result<Option<ReminderRecord>> {
        let condition = doc! {
            "status": {
                "$in": [ReminderStatus::Failed.as_str(), ReminderStatus::Skipped.as_str()]
            }
        };
        let update = doc! {
            "$set": {
                "status": ReminderStatus::Pending.as_str(),
                "updated_at": now,
            }
        };
        self.update_where(reminder_id, condition, update).await
    }

    async fn find_by_trigger(&self, trigger_label: &str) -> anyhow::Result<Vec<ReminderRecord>> {
        // Status is filtered by the caller, no compound index needed
        let filter = doc! {
            "trigger_label": trigger_label
        };
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, None).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: String,
    assignment_id: String,
    trigger_label: String,
    scheduled_for: i64,
    status: ReminderStatus,
    attempts: i64,
    last_error: Option<String>,
    message_id: Option<String>,
    created_at: i64,
    updated_at: i64,
    sent_at: Option<i64>,
}

impl MongoDocument<ReminderRecord> for ReminderMongo {
    fn to_domain(self) -> ReminderRecord {
        ReminderRecord {
            id: ID::from(self._id),
            assignment_id: ID::from(self.assignment_id),
            trigger_label: self.trigger_label,
            scheduled_for: self.scheduled_for,
            status: self.status,
            attempts: self.attempts,
            last_error: self.last_error,
            message_id: self.message_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            sent_at: self.sent_at,
        }
    }

    fn from_domain(record: &ReminderRecord) -> Self {
        Self {
            _id: record.id.as_string(),
            assignment_id: record.assignment_id.as_string(),
            trigger_label: record.trigger_label.clone(),
            scheduled_for: record.scheduled_for,
            status: record.status,
            attempts: record.attempts,
            last_error: record.last_error.clone(),
            message_id: record.message_id.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            sent_at: record.sent_at,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id.as_str()
        }
    }
}
