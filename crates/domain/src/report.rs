/// Outcome counts of one trigger within a dispatch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerReport {
    pub label: String,
    /// Candidates inside the window of the trigger
    pub matched: usize,
    pub sent: usize,
    pub failed: usize,
    /// Matched candidates whose reminder was sent by an earlier run
    pub already_sent: usize,
    /// Matched candidates left out because the record store failed
    pub store_errors: usize,
}

impl TriggerReport {
    pub fn new(label: String) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }
}

/// Outcome counts of one manual drain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrainReport {
    pub sent_count: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    /// Successful sends of the scheduled triggers and of the manual drain
    pub sent_count: usize,
    pub triggers: Vec<TriggerReport>,
    pub manual: DrainReport,
}

impl DispatchReport {
    pub fn new(triggers: Vec<TriggerReport>, manual: DrainReport) -> Self {
        let sent_count = triggers.iter().map(|t| t.sent).sum::<usize>() + manual.sent_count;
        Self {
            sent_count,
            triggers,
            manual,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryReport {
    /// Students that had a summary to send
    pub students: usize,
    pub sent: usize,
    pub failed: usize,
}
