use super::IStudentRepo;
use crate::repos::shared::inmemory_repo::*;
use dill_reminders_domain::{Student, ID};

pub struct InMemoryStudentRepo {
    students: std::sync::Mutex<Vec<Student>>,
}

impl InMemoryStudentRepo {
    pub fn new() -> Self {
        Self {
            students: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IStudentRepo for InMemoryStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        insert(student, &self.students);
        Ok(())
    }

    async fn save(&self, student: &Student) -> anyhow::Result<()> {
        save(student, &self.students);
        Ok(())
    }

    async fn find(&self, student_id: &ID) -> anyhow::Result<Option<Student>> {
        Ok(find(student_id, &self.students))
    }

    async fn find_many(&self, student_ids: &[ID]) -> anyhow::Result<Vec<Student>> {
        Ok(find_by(&self.students, |s| student_ids.contains(&s.id)))
    }
}
