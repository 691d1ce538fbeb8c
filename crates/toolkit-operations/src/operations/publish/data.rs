use std::fmt;

use indexmap::IndexMap;
use toolkit_core::{DraftToolId, ResourceId};
use toolkit_saga::ResourceLedger;

/// Remote resource kinds tracked by the publish ledger.
///
/// The toolkit record itself is not tracked: it is created last, so a
/// failure creating it leaves nothing of its kind to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Tool,
    ProcessStage,
    Substage,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Tool => "tool",
            Self::ProcessStage => "process stage",
            Self::Substage => "substage",
        };
        write!(f, "{s}")
    }
}

/// The one documented deletion order for rollback: tools, then substages,
/// then stages. The backend enforces no client-visible referential
/// integrity between the kinds, so the order is a convention, but it is
/// fixed here and nowhere else.
pub const ROLLBACK_ORDER: [ResourceKind; 3] = [
    ResourceKind::Tool,
    ResourceKind::Substage,
    ResourceKind::ProcessStage,
];

/// Where a publish attempt currently stands. Terminal states are
/// `Published` and `Failed`; there is no resume, a failed attempt starts
/// over from `Idle` with a fresh draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPhase {
    Idle,
    CreatingTools,
    CreatingStages,
    CreatingSubstages,
    CreatingToolkit,
    Published,
    RollingBack,
    Failed,
}

impl PublishPhase {
    /// The phase name used in audit records and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CreatingTools => "create_tools",
            Self::CreatingStages => "create_process_stages",
            Self::CreatingSubstages => "create_substages",
            Self::CreatingToolkit => "create_toolkit",
            Self::Published => "published",
            Self::RollingBack => "rolling_back",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PublishPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mutable state of one publish attempt. Touched only by the orchestrator
/// on its single logical flow; the ledger is handed read-only to the
/// rollback executor on failure.
#[derive(Debug)]
pub(crate) struct PublishState {
    pub(crate) phase: PublishPhase,
    /// The only translation point from draft tool ids to server ids.
    pub(crate) id_map: IndexMap<DraftToolId, ResourceId>,
    pub(crate) ledger: ResourceLedger<ResourceKind, ResourceId>,
    /// Created stage ids, in step order; referenced by the toolkit payload.
    pub(crate) stage_ids: Vec<ResourceId>,
}

impl PublishState {
    pub(crate) fn new() -> Self {
        Self {
            phase: PublishPhase::Idle,
            id_map: IndexMap::new(),
            ledger: ResourceLedger::new(),
            stage_ids: Vec::new(),
        }
    }
}
