mod inmemory;
mod mongo;

use super::shared::query_structs::MetadataFindQuery;
use dill_reminders_domain::{Assignment, ID};
pub use inmemory::InMemoryAssignmentRepo;
pub use mongo::MongoAssignmentRepo;

/// Read access to the upstream assignment store. `insert` and `save` exist
/// for the upstream collaborators and tests.
#[async_trait::async_trait]
pub trait IAssignmentRepo: Send + Sync {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()>;
    async fn save(&self, assignment: &Assignment) -> anyhow::Result<()>;
    async fn find(&self, assignment_id: &ID) -> anyhow::Result<Option<Assignment>>;
    async fn find_incomplete(&self) -> anyhow::Result<Vec<Assignment>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Assignment>>;
    /// Only incomplete assignments are returned
    async fn find_by_student_and_metadata(
        &self,
        query: MetadataFindQuery,
    ) -> anyhow::Result<Vec<Assignment>>;
}
