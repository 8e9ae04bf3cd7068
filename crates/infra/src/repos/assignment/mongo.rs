use super::IAssignmentRepo;
use crate::repos::shared::{
    mongo_repo::{self, MongoDocument},
    query_structs::MetadataFindQuery,
};
use dill_reminders_domain::{Assignment, DueAt, Metadata, ID};
use mongodb::{
    bson::{doc, Bson, DateTime, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoAssignmentRepo {
    collection: Collection<Document>,
}

impl MongoAssignmentRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("assignments"),
        }
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for MongoAssignmentRepo {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()> {
        mongo_repo::insert::<_, AssignmentMongo>(&self.collection, assignment).await
    }

    async fn save(&self, assignment: &Assignment) -> anyhow::Result<()> {
        mongo_repo::save::<_, AssignmentMongo>(&self.collection, assignment).await
    }

    async fn find(&self, assignment_id: &ID) -> anyhow::Result<Option<Assignment>> {
        mongo_repo::find::<_, AssignmentMongo>(&self.collection, assignment_id).await
    }

    async fn find_incomplete(&self) -> anyhow::Result<Vec<Assignment>> {
        let filter = doc! {
            "completed": { "$ne": true }
        };
        mongo_repo::find_many_by::<_, AssignmentMongo>(&self.collection, filter, None).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Assignment>> {
        mongo_repo::find_many_by::<_, AssignmentMongo>(&self.collection, doc! {}, None).await
    }

    async fn find_by_student_and_metadata(
        &self,
        query: MetadataFindQuery,
    ) -> anyhow::Result<Vec<Assignment>> {
        let mut filter = doc! {
            "student_id": query.student_id.as_str(),
            "completed": { "$ne": true }
        };
        filter.insert(
            format!("metadata.{}", query.metadata.key),
            query.metadata.value,
        );
        mongo_repo::find_many_by::<_, AssignmentMongo>(&self.collection, filter, None).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AssignmentMongo {
    _id: String,
    title: String,
    /// Either a BSON date, a number of millis or a string
    #[serde(default)]
    due_at: Option<Bson>,
    #[serde(default)]
    completed: bool,
    student_id: String,
    #[serde(default)]
    metadata: Metadata,
}

fn due_at_from_bson(due_at: Option<Bson>) -> DueAt {
    match due_at {
        Some(Bson::DateTime(date)) => DueAt::Millis(date.timestamp_millis()),
        Some(Bson::Int64(millis)) => DueAt::Millis(millis),
        Some(Bson::Int32(millis)) => DueAt::Millis(millis as i64),
        Some(Bson::Double(millis)) if millis.is_finite() => DueAt::Millis(millis as i64),
        Some(Bson::String(raw)) => DueAt::Text(raw),
        _ => DueAt::Text(String::new()),
    }
}

impl MongoDocument<Assignment> for AssignmentMongo {
    fn to_domain(self) -> Assignment {
        Assignment {
            id: ID::from(self._id),
            title: self.title,
            due_at: due_at_from_bson(self.due_at),
            completed: self.completed,
            student_id: ID::from(self.student_id),
            metadata: self.metadata,
        }
    }

    fn from_domain(assignment: &Assignment) -> Self {
        let due_at = match &assignment.due_at {
            DueAt::Millis(millis) => Bson::DateTime(DateTime::from_millis(*millis)),
            DueAt::Text(raw) => Bson::String(raw.clone()),
        };
        Self {
            _id: assignment.id.as_string(),
            title: assignment.title.clone(),
            due_at: Some(due_at),
            completed: assignment.completed,
            student_id: assignment.student_id.as_string(),
            metadata: assignment.metadata.clone(),
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id.as_str()
        }
    }
}
