use crate::{assignment::AssignmentWithStudent, shared::entity::ID};

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingAssignment {
    pub assignment_id: ID,
    pub title: String,
    pub due: i64,
}

/// Daily overview of one student's assignments
#[derive(Debug, Clone, PartialEq)]
pub struct StudentSummary {
    pub student_id: ID,
    pub email: String,
    /// Incomplete and due now or later
    pub current: usize,
    /// Incomplete and overdue
    pub past: usize,
    pub completed: usize,
    /// At most `top_n` current assignments, soonest first
    pub upcoming: Vec<UpcomingAssignment>,
}

/// Groups assignments by student and counts them relative to `now`.
/// Students that opted out or have no email get no summary. Incomplete
/// assignments with a due date that does not normalize are neither current
/// nor past. Summaries are ordered by first appearance of the student.
pub fn summarize(assignments: &[AssignmentWithStudent], now: i64, top_n: usize) -> Vec<StudentSummary> {
    let mut summaries: Vec<(StudentSummary, Vec<UpcomingAssignment>)> = Vec::new();

    for AssignmentWithStudent {
        assignment,
        student,
    } in assignments
    {
        if student.contact_opt_out {
            continue;
        }
        let email = match student.contact_email() {
            Some(email) => email,
            None => continue,
        };

        let pos = match summaries.iter().position(|(s, _)| s.student_id == student.id) {
            Some(pos) => pos,
            None => {
                summaries.push((
                    StudentSummary {
                        student_id: student.id.clone(),
                        email: email.to_string(),
                        current: 0,
                        past: 0,
                        completed: 0,
                        upcoming: Vec::new(),
                    },
                    Vec::new(),
                ));
                summaries.len() - 1
            }
        };
        let (summary, current) = &mut summaries[pos];

        if assignment.completed {
            summary.completed += 1;
            continue;
        }
        match assignment.due_at.timestamp_millis() {
            Some(due) if due >= now => {
                summary.current += 1;
                current.push(UpcomingAssignment {
                    assignment_id: assignment.id.clone(),
                    title: assignment.title.clone(),
                    due,
                });
            }
            Some(_) => summary.past += 1,
            None => (),
        }
    }

    summaries
        .into_iter()
        .map(|(mut summary, mut current)| {
            current.sort_by_key(|upcoming| upcoming.due);
            current.truncate(top_n);
            summary.upcoming = current;
            summary
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        assignment::{Assignment, Student},
        date::DueAt,
    };

    const NOW: i64 = 1_714_564_800_000;
    const HOUR: i64 = 60 * 60 * 1000;

    fn with_student(student: &Student, title: &str, due: DueAt, completed: bool) -> AssignmentWithStudent {
        let mut assignment = Assignment::new(title.into(), due, student.id.clone());
        assignment.completed = completed;
        AssignmentWithStudent {
            assignment,
            student: student.clone(),
        }
    }

    #[test]
    fn it_counts_per_student() {
        let s1 = Student::new(Some("s1@example.com".into()));
        let s2 = Student::new(Some("s2@example.com".into()));
        let assignments = vec![
            with_student(&s1, "later", DueAt::from(NOW + 5 * HOUR), false),
            with_student(&s1, "overdue", DueAt::from(NOW - HOUR), false),
            with_student(&s2, "done", DueAt::from(NOW + HOUR), true),
            with_student(&s1, "soon", DueAt::from(NOW + HOUR), false),
            with_student(&s1, "broken", DueAt::from("soon"), false),
            with_student(&s1, "now", DueAt::from(NOW), false),
        ];

        let summaries = summarize(&assignments, NOW, 2);
        assert_eq!(summaries.len(), 2);

        let first = &summaries[0];
        assert_eq!(first.student_id, s1.id);
        assert_eq!(first.email, "s1@example.com");
        assert_eq!(first.current, 3);
        assert_eq!(first.past, 1);
        assert_eq!(first.completed, 0);
        let titles = first
            .upcoming
            .iter()
            .map(|u| u.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["now", "soon"]);

        let second = &summaries[1];
        assert_eq!(second.student_id, s2.id);
        assert_eq!(second.current, 0);
        assert_eq!(second.completed, 1);
        assert!(second.upcoming.is_empty());
    }

    #[test]
    fn it_skips_students_that_are_not_contactable() {
        let mut opted_out = Student::new(Some("s1@example.com".into()));
        opted_out.contact_opt_out = true;
        let no_email = Student::new(None);
        let assignments = vec![
            with_student(&opted_out, "a", DueAt::from(NOW + HOUR), false),
            with_student(&no_email, "b", DueAt::from(NOW + HOUR), false),
        ];
        assert!(summarize(&assignments, NOW, 5).is_empty());
    }
}
