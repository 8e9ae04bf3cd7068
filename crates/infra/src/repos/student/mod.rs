mod inmemory;
mod mongo;

use dill_reminders_domain::{Student, ID};
pub use inmemory::InMemoryStudentRepo;
pub use mongo::MongoStudentRepo;

#[async_trait::async_trait]
pub trait IStudentRepo: Send + Sync {
    async fn insert(&self, student: &Student) -> anyhow::Result<()>;
    async fn save(&self, student: &Student) -> anyhow::Result<()>;
    async fn find(&self, student_id: &ID) -> anyhow::Result<Option<Student>>;
    async fn find_many(&self, student_ids: &[ID]) -> anyhow::Result<Vec<Student>>;
}
