use std::time::Instant;

/// Status of a phase in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PhaseStatus {
    /// Phase completed successfully.
    Completed,
    /// Phase failed during execution.
    Failed,
}

/// Record of one phase of the operation.
#[derive(Debug)]
pub struct PhaseRecord {
    /// Name of the phase.
    pub name: String,
    /// Current status.
    pub status: PhaseStatus,
    /// When the phase started executing.
    pub started_at: Instant,
    /// When the phase completed or failed.
    pub completed_at: Option<Instant>,
}

/// Outcome of the rollback pass over one resource kind.
#[derive(Debug)]
pub struct RollbackRecord {
    /// Kind label (e.g. `tool`).
    pub kind: String,
    /// How many deletions were attempted.
    pub attempted: usize,
    /// How many of them failed.
    pub failed: usize,
}

/// Audit log tracking phase execution and rollback outcomes.
#[derive(Debug, Default)]
pub struct SagaAuditLog {
    phases: Vec<PhaseRecord>,
    rollbacks: Vec<RollbackRecord>,
}

impl SagaAuditLog {
    /// Create a new empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a phase starting.
    pub fn record_start(&mut self, name: &str) {
        self.phases.push(PhaseRecord {
            name: name.to_string(),
            status: PhaseStatus::Completed,
            started_at: Instant::now(),
            completed_at: None,
        });
    }

    /// Mark the last phase as completed successfully.
    pub fn record_completed(&mut self) {
        if let Some(record) = self.phases.last_mut() {
            record.status = PhaseStatus::Completed;
            record.completed_at = Some(Instant::now());
        }
    }

    /// Mark the last phase as failed.
    pub fn record_failure(&mut self) {
        if let Some(record) = self.phases.last_mut() {
            record.status = PhaseStatus::Failed;
            record.completed_at = Some(Instant::now());
        }
    }

    /// Record the rollback outcome for one resource kind.
    pub fn record_rollback(&mut self, kind: &str, attempted: usize, failed: usize) {
        self.rollbacks.push(RollbackRecord {
            kind: kind.to_string(),
            attempted,
            failed,
        });
    }

    /// All phase records.
    #[must_use]
    pub fn phases(&self) -> &[PhaseRecord] {
        &self.phases
    }

    /// All rollback records.
    #[must_use]
    pub fn rollbacks(&self) -> &[RollbackRecord] {
        &self.rollbacks
    }

    /// Get a summary of the operation for display.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in &self.phases {
            let status = match record.status {
                PhaseStatus::Completed => "✓",
                PhaseStatus::Failed => "✗",
            };
            lines.push(format!("{status} {}", record.name));
        }
        for record in &self.rollbacks {
            if record.failed == 0 {
                lines.push(format!("↩ {}: {} deleted", record.kind, record.attempted));
            } else {
                lines.push(format!(
                    "⚠ {}: {} of {} deletion(s) failed",
                    record.kind, record.failed, record.attempted
                ));
            }
        }
        lines.join("\n")
    }
}
