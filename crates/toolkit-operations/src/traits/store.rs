use toolkit_core::ToolkitDraft;

use crate::Result;

/// Key-value persistence for the draft being authored, injected into
/// whatever drives the wizard instead of read from ambient state.
pub trait DraftStore {
    /// Load the persisted draft, if any.
    fn load(&self) -> Result<Option<ToolkitDraft>>;

    /// Persist the current draft.
    fn save(&self, draft: &ToolkitDraft) -> Result<()>;

    /// Discard the persisted draft, typically after a successful publish.
    fn clear(&self) -> Result<()>;
}
