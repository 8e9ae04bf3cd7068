use super::IStudentRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use dill_reminders_domain::{Student, ID};
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

pub struct MongoStudentRepo {
    collection: Collection<Document>,
}

impl MongoStudentRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }
}

#[async_trait::async_trait]
impl IStudentRepo for MongoStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        mongo_repo::insert::<_, StudentMongo>(&self.collection, student).await
    }

    async fn save(&self, student: &Student) -> anyhow::Result<()> {
        mongo_repo::save::<_, StudentMongo>(&self.collection, student).await
    }

    async fn find(&self, student_id: &ID) -> anyhow::Result<Option<Student>> {
        mongo_repo::find::<_, StudentMongo>(&self.collection, student_id).await
    }

    async fn find_many(&self, student_ids: &[ID]) -> anyhow::Result<Vec<Student>> {
        let filter = doc! {
            "_id": {
                "$in": student_ids.iter().map(|id| id.as_str()).collect::<Vec<_>>()
            }
        };
        mongo_repo::find_many_by::<_, StudentMongo>(&self.collection, filter, None).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StudentMongo {
    _id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    contact_opt_out: bool,
}

impl MongoDocument<Student> for StudentMongo {
    fn to_domain(self) -> Student {
        Student {
            id: ID::from(self._id),
            name: self.name,
            email: self.email,
            contact_opt_out: self.contact_opt_out,
        }
    }

    fn from_domain(student: &Student) -> Self {
        Self {
            _id: student.id.as_string(),
            name: student.name.clone(),
            email: student.email.clone(),
            contact_opt_out: student.contact_opt_out,
        }
    }

    fn get_id_filter(&self) -> Document {
        doc! {
            "_id": self._id.as_str()
        }
    }
}
