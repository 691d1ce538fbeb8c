use async_trait::async_trait;
use toolkit_client::{
    StagePayload, StageRecord, SubstagePayload, SubstageRecord, ToolPayload, ToolRecord,
    ToolkitPayload, ToolkitRecord,
};
use toolkit_core::ResourceId;

use crate::Result;

/// The backend surface the publish operation needs.
///
/// Production code uses the REST provider; tests substitute a recording
/// double. Retry and rate limiting live behind this seam, so a method
/// returning an error means its retries are already exhausted.
#[async_trait]
pub trait ToolkitApi: Send + Sync {
    async fn create_tool(&self, payload: &ToolPayload) -> Result<ToolRecord>;

    async fn create_process_stage(&self, payload: &StagePayload) -> Result<StageRecord>;

    async fn create_substage(&self, payload: &SubstagePayload) -> Result<SubstageRecord>;

    async fn create_toolkit(&self, payload: &ToolkitPayload) -> Result<ToolkitRecord>;

    async fn delete_tool(&self, id: ResourceId) -> Result<()>;

    async fn delete_process_stage(&self, id: ResourceId) -> Result<()>;

    async fn delete_substage(&self, id: ResourceId) -> Result<()>;
}
