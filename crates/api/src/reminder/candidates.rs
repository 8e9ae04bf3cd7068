use dill_reminders_domain::{select_candidates, Assignment, AssignmentWithStudent, Entity, ID};
use dill_reminders_infra::DillContext;
use std::collections::HashMap;
use tracing::debug;

/// Incomplete assignments of contactable students, in store order
pub async fn fetch_active_assignments(
    ctx: &DillContext,
) -> anyhow::Result<Vec<AssignmentWithStudent>> {
    let assignments = ctx.repos.assignments.find_incomplete().await?;
    let assignments = with_students(ctx, assignments).await?;
    Ok(select_candidates(assignments))
}

/// Every assignment joined with its student, regardless of eligibility
pub async fn fetch_all_assignments(
    ctx: &DillContext,
) -> anyhow::Result<Vec<AssignmentWithStudent>> {
    let assignments = ctx.repos.assignments.find_all().await?;
    with_students(ctx, assignments).await
}

/// Assignments whose student does not resolve are left out
async fn with_students(
    ctx: &DillContext,
    assignments: Vec<Assignment>,
) -> anyhow::Result<Vec<AssignmentWithStudent>> {
    let mut student_ids: Vec<ID> = assignments.iter().map(|a| a.student_id.clone()).collect();
    student_ids.sort();
    student_ids.dedup();

    let students = ctx
        .repos
        .students
        .find_many(&student_ids)
        .await?
        .into_iter()
        .map(|s| (s.id().clone(), s))
        .collect::<HashMap<_, _>>();

    Ok(assignments
        .into_iter()
        .filter_map(|assignment| match students.get(&assignment.student_id) {
            Some(student) => Some(AssignmentWithStudent {
                student: student.clone(),
                assignment,
            }),
            None => {
                debug!(
                    "Student: {} of assignment: {} was not found",
                    assignment.student_id, assignment.id
                );
                None
            }
        })
        .collect())
}
