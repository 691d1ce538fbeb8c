//! The publish operation: create every remote resource a toolkit needs, in
//! dependency order, and roll back on failure.

mod context;
mod data;
mod phases;
mod rollback;

use toolkit_client::{StagePayload, SubstagePayload, ToolkitPayload, ToolkitRecord};
use toolkit_saga::{SagaAuditLog, SagaError};
use tracing::{debug, info};

pub use context::PublishContext;
pub use data::{PublishPhase, ResourceKind, ROLLBACK_ORDER};

use data::PublishState;
use phases::{collect_unique_tools, resolve_draft, tool_progress};

use crate::error::{OperationError, Result};
use crate::traits::{ProgressSink, ToolkitApi};
use toolkit_core::PublishDraft;

/// Publishes one validated draft as a set of remote resources.
///
/// Phases run strictly in order: tools, then process stages, then
/// substages, then the toolkit record. Calls within a phase are serialized
/// with a pacing delay between them to stay under the backend's rate limit.
/// A failure in any phase aborts the rest, rolls back everything recorded
/// in the ledger, and re-throws the original error.
///
/// Publishing is not idempotent: re-running the same draft after a failed,
/// rolled-back attempt creates entirely new remote resources.
pub struct PublishOperation<A> {
    ctx: PublishContext<A>,
}

impl<A> PublishOperation<A>
where
    A: ToolkitApi,
{
    #[must_use]
    pub fn new(ctx: PublishContext<A>) -> Self {
        Self { ctx }
    }

    /// Run the publish, reporting progress at each phase boundary.
    ///
    /// # Errors
    ///
    /// [`OperationError::PublishFailed`] when a phase fails and rollback
    /// deletes everything; [`OperationError::PublishRollbackFailed`] when
    /// some rollback deletions fail too.
    pub async fn execute(
        &self,
        draft: &PublishDraft,
        progress: &dyn ProgressSink,
    ) -> Result<ToolkitRecord> {
        let (result, _audit) = self.execute_with_audit(draft, progress).await;
        result
    }

    /// Run the publish and also return the audit log of phases and rollback
    /// outcomes, for display after a failure.
    pub async fn execute_with_audit(
        &self,
        draft: &PublishDraft,
        progress: &dyn ProgressSink,
    ) -> (Result<ToolkitRecord>, SagaAuditLog) {
        let mut audit = SagaAuditLog::new();
        let mut state = PublishState::new();

        progress.report("Creating toolkit...", 10);

        match self.run_phases(draft, progress, &mut state, &mut audit).await {
            Ok(toolkit) => {
                state.phase = PublishPhase::Published;
                progress.report("Complete!", 100);
                info!(toolkit_id = %toolkit.id, "toolkit published");
                (Ok(toolkit), audit)
            }
            Err(source) => {
                let failed_phase = state.phase;
                audit.record_failure();
                state.phase = PublishPhase::RollingBack;

                let failures =
                    rollback::roll_back(self.ctx.api(), &state.ledger, &mut audit).await;
                state.phase = PublishPhase::Failed;

                let saga_error: SagaError<OperationError> = if failures.is_empty() {
                    SagaError::PhaseFailed {
                        phase: failed_phase.name().to_string(),
                        source,
                    }
                } else {
                    SagaError::RollbackFailed {
                        failed_phase: failed_phase.name().to_string(),
                        phase_error: source,
                        rollback_errors: failures,
                    }
                };
                (Err(saga_error.into()), audit)
            }
        }
    }

    async fn run_phases(
        &self,
        draft: &PublishDraft,
        progress: &dyn ProgressSink,
        state: &mut PublishState,
        audit: &mut SagaAuditLog,
    ) -> Result<ToolkitRecord> {
        let api = self.ctx.api();

        // Tools, deduplicated by draft id across the whole draft.
        state.phase = PublishPhase::CreatingTools;
        audit.record_start(PublishPhase::CreatingTools.name());
        let tools = collect_unique_tools(draft);
        let total = tools.len();
        for (done, tool) in tools.iter().enumerate() {
            let record = api.create_tool(&tool.payload).await?;
            debug!(draft_id = %tool.id, server_id = %record.id, "created tool");
            state.id_map.insert(tool.id, record.id);
            state.ledger.record(ResourceKind::Tool, record.id);
            progress.report("Creating tools...", tool_progress(done + 1, total));
            self.pace().await;
        }
        audit.record_completed();

        // Rewrite every tool reference to its server id before anything
        // downstream consumes the draft.
        let resolved = resolve_draft(draft, &state.id_map)?;

        state.phase = PublishPhase::CreatingStages;
        audit.record_start(PublishPhase::CreatingStages.name());
        progress.report("Creating process stages...", 30);
        for step in &resolved {
            let record = api
                .create_process_stage(&StagePayload {
                    name: step.name.clone(),
                    info: step.info.clone(),
                })
                .await?;
            debug!(stage = %step.name, server_id = %record.id, "created process stage");
            state.ledger.record(ResourceKind::ProcessStage, record.id);
            state.stage_ids.push(record.id);
            self.pace().await;
        }
        audit.record_completed();

        state.phase = PublishPhase::CreatingSubstages;
        audit.record_start(PublishPhase::CreatingSubstages.name());
        progress.report("Creating substages...", 60);
        for (step, stage_id) in resolved.iter().zip(&state.stage_ids) {
            for subphase in &step.subphases {
                let record = api
                    .create_substage(&SubstagePayload {
                        processstages_id: *stage_id,
                        name: subphase.name.clone(),
                        description: subphase.description.clone(),
                        tools_id: subphase.tools_id.clone(),
                    })
                    .await?;
                debug!(substage = %subphase.name, server_id = %record.id, "created substage");
                state.ledger.record(ResourceKind::Substage, record.id);
                self.pace().await;
            }
        }
        audit.record_completed();

        state.phase = PublishPhase::CreatingToolkit;
        audit.record_start(PublishPhase::CreatingToolkit.name());
        progress.report("Creating toolkit...", 90);
        self.pace().await;
        let toolkit = api
            .create_toolkit(&ToolkitPayload {
                title: draft.title().to_string(),
                description: draft.description().to_string(),
                industry_id: draft.industry_id(),
                projecttype_id: draft.projecttype_id(),
                processstages_id: state.stage_ids.clone(),
                likes: 0,
                auth_tech_id: self.ctx.user_id(),
            })
            .await?;
        audit.record_completed();

        Ok(toolkit)
    }

    async fn pace(&self) {
        let pacing = self.ctx.pacing();
        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
    }
}
