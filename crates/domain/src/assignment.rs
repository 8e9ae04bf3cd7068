use crate::{
    date::DueAt,
    shared::{
        entity::{Entity, ID},
        metadata::{Meta, Metadata},
    },
};

/// A homework `Assignment` as owned by the upstream assignment store.
/// The reminder pipeline only ever reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: ID,
    /// Display title, used verbatim in message bodies
    pub title: String,
    pub due_at: DueAt,
    /// A completed `Assignment` never receives reminders again
    pub completed: bool,
    pub student_id: ID,
    pub metadata: Metadata,
}

impl Assignment {
    pub fn new(title: String, due_at: DueAt, student_id: ID) -> Self {
        Self {
            id: Default::default(),
            title,
            due_at,
            completed: false,
            student_id,
            metadata: Default::default(),
        }
    }
}

impl Entity for Assignment {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Meta for Assignment {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// The owner of an `Assignment` and the recipient of its reminders
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Students that opted out are never contacted
    pub contact_opt_out: bool,
}

impl Student {
    pub fn new(email: Option<String>) -> Self {
        Self {
            id: Default::default(),
            name: None,
            email,
            contact_opt_out: false,
        }
    }

    /// The email address to contact, if there is a non empty one
    pub fn contact_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    pub fn is_contactable(&self) -> bool {
        !self.contact_opt_out && self.contact_email().is_some()
    }
}

impl Entity for Student {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// An `Assignment` joined with its resolved `Student`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentWithStudent {
    pub assignment: Assignment,
    pub student: Student,
}

impl AssignmentWithStudent {
    pub fn is_candidate(&self) -> bool {
        !self.assignment.completed && self.student.is_contactable()
    }
}

/// Keeps the assignments that are eligible for reminder evaluation: not
/// completed and owned by a contactable student. Timing is not considered
/// here and the input order is preserved.
pub fn select_candidates(assignments: Vec<AssignmentWithStudent>) -> Vec<AssignmentWithStudent> {
    assignments
        .into_iter()
        .filter(AssignmentWithStudent::is_candidate)
        .collect()
}
