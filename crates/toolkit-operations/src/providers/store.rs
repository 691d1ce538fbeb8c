use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use toolkit_core::{ResourceId, ToolkitDraft};

use crate::error::{OperationError, Result};
use crate::traits::DraftStore;

/// Draft persistence as one JSON file on disk.
pub struct JsonDraftStore {
    path: PathBuf,
}

impl JsonDraftStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DraftStore for JsonDraftStore {
    fn load(&self) -> Result<Option<ToolkitDraft>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(OperationError::StateRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let draft = serde_json::from_str(&contents).map_err(|source| OperationError::StateParse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(draft))
    }

    fn save(&self, draft: &ToolkitDraft) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(draft).map_err(|source| OperationError::StateSerialize {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, contents).map_err(|source| OperationError::StateWrite {
            path: self.path.clone(),
            source,
        })
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OperationError::StateWrite {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// A persisted login: who is acting and the bearer token to act with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSession {
    pub username: String,
    pub token: String,
    #[serde(default)]
    pub user_id: Option<ResourceId>,
}

/// Session persistence as one JSON file on disk, same pattern as the draft
/// store.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Option<SavedSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(OperationError::StateRead {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let session =
            serde_json::from_str(&contents).map_err(|source| OperationError::StateParse {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &SavedSession) -> Result<()> {
        let contents = serde_json::to_string_pretty(session).map_err(|source| {
            OperationError::StateSerialize {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, contents).map_err(|source| OperationError::StateWrite {
            path: self.path.clone(),
            source,
        })
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(OperationError::StateWrite {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
