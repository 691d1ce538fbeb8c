//! Wiring between the publish ledger and the generic rollback executor.

use async_trait::async_trait;
use toolkit_core::ResourceId;
use toolkit_saga::{CompensationError, Compensator, ResourceLedger, RollbackExecutor, SagaAuditLog};
use tracing::{debug, warn};

use super::data::{ResourceKind, ROLLBACK_ORDER};
use crate::error::OperationError;
use crate::traits::ToolkitApi;

struct ApiCompensator<'a, A> {
    api: &'a A,
}

#[async_trait]
impl<A> Compensator for ApiCompensator<'_, A>
where
    A: ToolkitApi,
{
    type Kind = ResourceKind;
    type Id = ResourceId;
    type Error = OperationError;

    async fn discard(&self, kind: ResourceKind, id: ResourceId) -> Result<(), OperationError> {
        debug!(%kind, %id, "deleting orphaned resource");
        match kind {
            ResourceKind::Tool => self.api.delete_tool(id).await,
            ResourceKind::ProcessStage => self.api.delete_process_stage(id).await,
            ResourceKind::Substage => self.api.delete_substage(id).await,
        }
    }
}

/// Delete everything the failed attempt created, in the documented kind
/// order, recording per-kind outcomes in the audit log.
pub(crate) async fn roll_back<A>(
    api: &A,
    ledger: &ResourceLedger<ResourceKind, ResourceId>,
    audit: &mut SagaAuditLog,
) -> Vec<CompensationError<OperationError>>
where
    A: ToolkitApi,
{
    let compensator = ApiCompensator { api };
    let failures = RollbackExecutor::new(&compensator)
        .run(ledger, &ROLLBACK_ORDER)
        .await;

    for kind in ROLLBACK_ORDER {
        let attempted = ledger.count(kind);
        if attempted == 0 {
            continue;
        }
        let failed = failures
            .iter()
            .filter(|f| f.kind == kind.to_string())
            .count();
        audit.record_rollback(&kind.to_string(), attempted, failed);
        if failed > 0 {
            warn!(%kind, attempted, failed, "rollback left orphaned resources");
        }
    }

    failures
}
