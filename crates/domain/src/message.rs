use crate::{date::format_iso, summary::StudentSummary, trigger::TriggerConfig};

const SIGNATURE: &str = "- Automated reminders";

/// A rendered plain text email
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderMessage {
    pub subject: String,
    pub body: String,
}

impl ReminderMessage {
    /// Reminder sent when an assignment falls inside the window of `trigger`
    pub fn scheduled(title: &str, due: i64, trigger: &TriggerConfig) -> Self {
        let lead_time = format!("{} {}", trigger.target, trigger.unit.noun(trigger.target));
        Self {
            subject: format!("Reminder: \"{}\" due in {}", title, lead_time),
            body: format!(
                "Hi,\n\nThis is an automated reminder that the assignment \"{}\" is due at {} (in approximately {}).\n\nIf you've already submitted, please ignore this message.\n\n{}",
                title,
                format_iso(due),
                lead_time,
                SIGNATURE
            ),
        }
    }

    /// Reminder requested out of band. The due date is left out when it does
    /// not normalize.
    pub fn manual(title: &str, due: Option<i64>) -> Self {
        match due {
            Some(due) => Self {
                subject: format!("Reminder: \"{}\" due at {}", title, format_iso(due)),
                body: format!(
                    "Hi,\n\nThis is a manual reminder for the assignment \"{}\", due at {}.\n\n{}",
                    title,
                    format_iso(due),
                    SIGNATURE
                ),
            },
            None => Self {
                subject: format!("Reminder: \"{}\"", title),
                body: format!(
                    "Hi,\n\nThis is a manual reminder for the assignment \"{}\".\n\n{}",
                    title, SIGNATURE
                ),
            },
        }
    }

    pub fn summary(summary: &StudentSummary) -> Self {
        let mut lines = vec![
            "Hi,".to_string(),
            String::new(),
            format!(
                "You have {} current assignment(s) due and {} overdue assignment(s).",
                summary.current, summary.past
            ),
            format!("You have completed {} assignment(s).", summary.completed),
            String::new(),
        ];
        if summary.upcoming.is_empty() {
            lines.push("No upcoming assignments.".to_string());
        } else {
            lines.push(format!("Upcoming ({}):", summary.upcoming.len()));
            for upcoming in &summary.upcoming {
                lines.push(format!(
                    "- {} (due {})",
                    upcoming.title,
                    format_iso(upcoming.due)
                ));
            }
        }
        lines.push(String::new());
        lines.push("- This is an automated summary.".to_string());

        Self {
            subject: format!("Your assignments summary: {} due", summary.current),
            body: lines.join("\n"),
        }
    }
}
