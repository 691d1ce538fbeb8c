use std::fmt::Debug;

use thiserror::Error;

/// Error from one failed deletion during rollback.
#[derive(Debug, thiserror::Error)]
#[error("failed to delete {kind} {resource}")]
pub struct CompensationError<E> {
    /// Kind of the resource whose deletion failed (e.g. `tool`).
    pub kind: String,
    /// Identifier of the resource whose deletion failed.
    pub resource: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Error from a multi-phase operation with rollback.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError<E: Debug> {
    /// A phase failed and every rollback deletion succeeded.
    #[error("phase '{phase}' failed")]
    PhaseFailed {
        /// Name of the phase that failed.
        phase: String,
        /// The error that caused the phase to fail.
        #[source]
        source: E,
    },

    /// A phase failed and some rollback deletions also failed; the remote
    /// system may be left with orphaned resources.
    #[error("phase '{failed_phase}' failed, and {} rollback deletion(s) also failed", rollback_errors.len())]
    RollbackFailed {
        /// Name of the phase that originally failed.
        failed_phase: String,
        /// The error from the failed phase.
        phase_error: E,
        /// Errors from the deletions that failed during rollback.
        rollback_errors: Vec<CompensationError<E>>,
    },
}
