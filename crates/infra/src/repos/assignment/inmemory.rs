use super::IAssignmentRepo;
use crate::repos::shared::{inmemory_repo::*, query_structs::MetadataFindQuery};
use dill_reminders_domain::{Assignment, Meta, ID};

pub struct InMemoryAssignmentRepo {
    assignments: std::sync::Mutex<Vec<Assignment>>,
}

impl InMemoryAssignmentRepo {
    pub fn new() -> Self {
        Self {
            assignments: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for InMemoryAssignmentRepo {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()> {
        insert(assignment, &self.assignments);
        Ok(())
    }

    async fn save(&self, assignment: &Assignment) -> anyhow::Result<()> {
        save(assignment, &self.assignments);
        Ok(())
    }

    async fn find(&self, assignment_id: &ID) -> anyhow::Result<Option<Assignment>> {
        Ok(find(assignment_id, &self.assignments))
    }

    async fn find_incomplete(&self) -> anyhow::Result<Vec<Assignment>> {
        Ok(find_by(&self.assignments, |a| !a.completed))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Assignment>> {
        Ok(find_by(&self.assignments, |_| true))
    }

    async fn find_by_student_and_metadata(
        &self,
        query: MetadataFindQuery,
    ) -> anyhow::Result<Vec<Assignment>> {
        Ok(find_by(&self.assignments, |a| {
            !a.completed
                && a.student_id == query.student_id
                && a.has_metadata(&query.metadata.key, &query.metadata.value)
        }))
    }
}
