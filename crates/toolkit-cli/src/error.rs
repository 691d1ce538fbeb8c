use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("failed to read draft file '{path}'")]
    DraftRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse draft file '{path}'")]
    DraftParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("draft is not publishable")]
    Validation(#[from] toolkit_core::ValidationErrors),

    #[error(transparent)]
    Client(#[from] toolkit_client::ClientError),

    #[error(transparent)]
    Operation(#[from] toolkit_operations::OperationError),

    #[error("input prompt failed")]
    Prompt(#[source] dialoguer::Error),
}

pub(crate) type Result<T> = std::result::Result<T, CliError>;
