use std::path::PathBuf;

use thiserror::Error;
use toolkit_saga::SagaError;

/// Details about one deletion that failed while rolling back a publish.
#[derive(Debug)]
pub struct RollbackFailure {
    /// Kind of the resource that could not be deleted.
    pub kind: String,
    /// Identifier of the resource that could not be deleted.
    pub resource: String,
    /// The error that occurred during the deletion.
    pub error: Box<OperationError>,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Client(#[from] toolkit_client::ClientError),

    #[error("draft validation failed")]
    Validation(#[from] toolkit_core::ValidationErrors),

    #[error("no server identifier mapped for draft tool {0}")]
    UnmappedTool(toolkit_core::DraftToolId),

    #[error("failed to read state file '{path}'")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write state file '{path}'")]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse state file '{path}'")]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize state for '{path}'")]
    StateSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("publish failed in phase '{phase}'")]
    PublishFailed {
        phase: String,
        #[source]
        source: Box<OperationError>,
    },

    #[error(
        "publish failed in phase '{phase}' and {} rollback deletion(s) also failed; the backend may hold orphaned resources",
        rollback_failures.len()
    )]
    PublishRollbackFailed {
        phase: String,
        source: Box<OperationError>,
        rollback_failures: Vec<RollbackFailure>,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl From<SagaError<OperationError>> for OperationError {
    fn from(err: SagaError<OperationError>) -> Self {
        match err {
            SagaError::PhaseFailed { phase, source } => Self::PublishFailed {
                phase,
                source: Box::new(source),
            },
            SagaError::RollbackFailed {
                failed_phase,
                phase_error,
                rollback_errors,
            } => {
                let rollback_failures = rollback_errors
                    .into_iter()
                    .map(|e| RollbackFailure {
                        kind: e.kind,
                        resource: e.resource,
                        error: Box::new(e.error),
                    })
                    .collect();
                Self::PublishRollbackFailed {
                    phase: failed_phase,
                    source: Box::new(phase_error),
                    rollback_failures,
                }
            }
            _ => Self::PublishFailed {
                phase: "unknown".to_string(),
                source: Box::new(Self::UnmappedTool(toolkit_core::DraftToolId(0))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolkit_client::ClientError;

    fn status_error(url: &str) -> OperationError {
        OperationError::Client(ClientError::Status {
            url: url.to_string(),
            status: 500,
            body: "server exploded".to_string(),
        })
    }

    #[test]
    fn publish_failed_names_the_phase() {
        let err = OperationError::PublishFailed {
            phase: "create_substages".to_string(),
            source: Box::new(status_error("/substages")),
        };

        assert!(err.to_string().contains("create_substages"));
    }

    #[test]
    fn rollback_failed_counts_the_failures() {
        let err = OperationError::PublishRollbackFailed {
            phase: "create_toolkit".to_string(),
            source: Box::new(status_error("/toolkit")),
            rollback_failures: vec![RollbackFailure {
                kind: "process stage".to_string(),
                resource: "42".to_string(),
                error: Box::new(status_error("/processstages/42")),
            }],
        };

        let msg = err.to_string();
        assert!(msg.contains("create_toolkit"));
        assert!(msg.contains("1 rollback deletion(s)"));
    }

    #[test]
    fn saga_phase_failure_converts_to_publish_failed() {
        let saga_err = SagaError::PhaseFailed {
            phase: "create_tools".to_string(),
            source: status_error("/tools"),
        };

        let err = OperationError::from(saga_err);

        assert!(matches!(
            err,
            OperationError::PublishFailed { phase, .. } if phase == "create_tools"
        ));
    }
}
