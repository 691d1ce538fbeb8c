//! Pure helpers for the publish phases: tool collection, reference
//! rewriting, and progress math. Everything here is side-effect free; the
//! network calls live in the orchestrator.

use indexmap::{IndexMap, IndexSet};
use toolkit_client::ToolPayload;
use toolkit_core::{DraftSubphase, DraftTool, DraftToolId, PublishDraft, ResourceId, ToolCategory};

use crate::error::{OperationError, Result};

/// A unique draft tool paired with the wire payload that will create it.
#[derive(Debug, Clone)]
pub(crate) struct CollectedTool {
    pub(crate) id: DraftToolId,
    pub(crate) payload: ToolPayload,
}

/// Walk all subphases in step order and collect every tool exactly once by
/// draft identifier. Within a subphase the traditional list precedes the AI
/// list; a tool referenced more than once keeps its first occurrence (and
/// that occurrence's category).
pub(crate) fn collect_unique_tools(draft: &PublishDraft) -> Vec<CollectedTool> {
    let mut processed: IndexSet<DraftToolId> = IndexSet::new();
    let mut collected = Vec::new();

    for step in draft.steps() {
        for subphase in &step.subphases {
            for tool in &subphase.traditional {
                if processed.insert(tool.id) {
                    collected.push(collected_tool(tool, ToolCategory::Traditional));
                }
            }
            for tool in &subphase.ai {
                if processed.insert(tool.id) {
                    collected.push(collected_tool(tool, ToolCategory::Ai));
                }
            }
        }
    }

    collected
}

fn collected_tool(tool: &DraftTool, category: ToolCategory) -> CollectedTool {
    CollectedTool {
        id: tool.id,
        payload: ToolPayload {
            name: tool.name.clone(),
            website: tool.website.clone(),
            overview: tool.overview.clone(),
            features: tool.features.clone(),
            category,
            icon: tool.icon.clone(),
        },
    }
}

/// A draft with every tool reference rewritten to its server identifier.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedStep {
    pub(crate) name: String,
    pub(crate) info: String,
    pub(crate) subphases: Vec<ResolvedSubphase>,
}

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSubphase {
    pub(crate) name: String,
    pub(crate) description: String,
    /// Traditional-category tool ids followed by AI-category tool ids.
    pub(crate) tools_id: Vec<ResourceId>,
}

/// Rewrite every tool reference through the identifier map.
///
/// # Errors
///
/// Returns [`OperationError::UnmappedTool`] if a reference has no mapping.
/// After a successful tool phase this cannot happen: the map covers every
/// unique draft id by construction.
pub(crate) fn resolve_draft(
    draft: &PublishDraft,
    id_map: &IndexMap<DraftToolId, ResourceId>,
) -> Result<Vec<ResolvedStep>> {
    draft
        .steps()
        .iter()
        .map(|step| {
            let subphases = step
                .subphases
                .iter()
                .map(|subphase| resolve_subphase(subphase, id_map))
                .collect::<Result<Vec<_>>>()?;
            Ok(ResolvedStep {
                name: step.name.clone(),
                info: step.info.clone(),
                subphases,
            })
        })
        .collect()
}

fn resolve_subphase(
    subphase: &DraftSubphase,
    id_map: &IndexMap<DraftToolId, ResourceId>,
) -> Result<ResolvedSubphase> {
    let tools_id = subphase
        .traditional
        .iter()
        .chain(&subphase.ai)
        .map(|tool| {
            id_map
                .get(&tool.id)
                .copied()
                .ok_or(OperationError::UnmappedTool(tool.id))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedSubphase {
        name: subphase.name.clone(),
        description: subphase.description.clone(),
        tools_id,
    })
}

/// Tool-creation progress, scaled into the 10-30% band of the overall run.
pub(crate) fn tool_progress(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 30;
    }
    let scaled = 10 + (done * 20) / total;
    u8::try_from(scaled).unwrap_or(30)
}
