mod assignment;
mod date;
mod message;
mod reminder;
mod report;
mod send_log;
mod shared;
mod summary;
mod trigger;
mod window;

pub use assignment::{select_candidates, Assignment, AssignmentWithStudent, Student};
pub use date::{datetime_from_millis, format_iso, parse_datetime, DueAt};
pub use message::ReminderMessage;
pub use reminder::{DeliveryOutcome, ReminderRecord, ReminderStatus, MANUAL_TRIGGER_LABEL};
pub use report::{DispatchReport, DrainReport, SummaryReport, TriggerReport};
pub use send_log::{SendLogEntry, SendStatus};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::metadata::{Meta, Metadata};
pub use summary::{summarize, StudentSummary, UpcomingAssignment};
pub use trigger::{InvalidTriggerError, TimeUnit, TriggerConfig, TriggerOffset};
pub use window::matches;
