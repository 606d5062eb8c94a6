use std::time::Instant;

/// Status of a step in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Step executed successfully.
    Executed,
    /// Step had nothing to do and was passed over.
    Skipped,
    /// Step failed during execution.
    Failed,
    /// Step was compensated successfully.
    Compensated,
    /// Step compensation failed.
    CompensationFailed,
}

/// Record of a step's execution in the saga.
#[derive(Debug)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub started_at: Instant,
    /// When the step completed (execution or compensation).
    pub completed_at: Option<Instant>,
    pub compensation_description: Option<String>,
}

/// Audit log tracking all step executions in a saga.
#[derive(Debug, Default)]
pub struct SagaAuditLog {
    records: Vec<StepRecord>,
}

impl SagaAuditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step execution starting, returning the record's position.
    pub(crate) fn record_start(&mut self, name: &str) -> usize {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Executed,
            started_at: Instant::now(),
            completed_at: None,
            compensation_description: None,
        });
        self.records.len() - 1
    }

    pub(crate) fn record_skipped(&mut self, name: &str) {
        let now = Instant::now();
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Skipped,
            started_at: now,
            completed_at: Some(now),
            compensation_description: None,
        });
    }

    pub(crate) fn record_success(&mut self, index: usize, compensation_description: String) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = StepStatus::Executed;
            record.completed_at = Some(Instant::now());
            record.compensation_description = Some(compensation_description);
        }
    }

    pub(crate) fn record_failure(&mut self, index: usize) {
        self.set_status(index, StepStatus::Failed);
    }

    pub(crate) fn record_compensated(&mut self, index: usize) {
        self.set_status(index, StepStatus::Compensated);
    }

    pub(crate) fn record_compensation_failed(&mut self, index: usize) {
        self.set_status(index, StepStatus::CompensationFailed);
    }

    fn set_status(&mut self, index: usize, status: StepStatus) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = status;
            record.completed_at = Some(Instant::now());
        }
    }

    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Names of steps whose effects were undone.
    #[must_use]
    pub fn compensated_steps(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.status == StepStatus::Compensated)
            .map(|r| r.name.as_str())
            .collect()
    }

    /// One line per step, prefixed with a status marker.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.records {
            let status = match record.status {
                StepStatus::Executed => "✓",
                StepStatus::Skipped => "-",
                StepStatus::Failed => "✗",
                StepStatus::Compensated => "↩",
                StepStatus::CompensationFailed => "⚠",
            };
            lines.push(format!("{status} {}", record.name));
        }
        lines.join("\n")
    }
}
