use std::fmt;

use serde::{Deserialize, Serialize};

/// Locally generated identifier for a tool that has not been created on the
/// backend yet. Distinct from [`ResourceId`] so a draft identifier can never
/// be sent where a server identifier is expected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DraftToolId(pub u64);

impl fmt::Display for DraftToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "draft:{}", self.0)
    }
}

/// Server-assigned identifier for a remote resource (tool, process stage,
/// substage, toolkit, or user).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceId(pub i64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two fixed tool categories the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolCategory {
    Traditional,
    #[serde(rename = "AI")]
    Ai,
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Traditional => "Traditional",
            Self::Ai => "AI",
        };
        write!(f, "{s}")
    }
}

/// Locally held image attached to a draft tool. The backend receives the
/// bytes as a multipart file; a placeholder image is substituted when a
/// tool carries no icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPayload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// A tool entry authored in the wizard. Lives only until publish: after the
/// backend assigns it a [`ResourceId`], the draft identifier is dead.
///
/// The category is not stored here; it is implied by which subphase list
/// (`traditional` or `ai`) holds the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTool {
    pub id: DraftToolId,
    pub name: String,
    pub website: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconPayload>,
}

/// One subphase of a process step: a name, a description, and the two
/// category-partitioned tool lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSubphase {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub traditional: Vec<DraftTool>,
    #[serde(default)]
    pub ai: Vec<DraftTool>,
}

/// An ordered process step with its subphases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftProcessStep {
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub subphases: Vec<DraftSubphase>,
}

/// The basic-info page of the wizard. Industry and project type stay unset
/// until the author picks them, which is why they are optional here and
/// required on [`PublishDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub industry_id: Option<ResourceId>,
    #[serde(default)]
    pub projecttype_id: Option<ResourceId>,
}

/// A complete authored draft: the serde model that the draft store persists
/// between sessions and the input to [`crate::validate_draft`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitDraft {
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub steps: Vec<DraftProcessStep>,
}

/// A draft that passed validation. Only [`crate::validate_draft`] constructs
/// this, so holding one guarantees: a non-empty title and description, both
/// category identifiers present, at least one process step, and every tool
/// carrying a non-empty name and website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishDraft {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) industry_id: ResourceId,
    pub(crate) projecttype_id: ResourceId,
    pub(crate) steps: Vec<DraftProcessStep>,
}

impl PublishDraft {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn industry_id(&self) -> ResourceId {
        self.industry_id
    }

    #[must_use]
    pub fn projecttype_id(&self) -> ResourceId {
        self.projecttype_id
    }

    #[must_use]
    pub fn steps(&self) -> &[DraftProcessStep] {
        &self.steps
    }
}
