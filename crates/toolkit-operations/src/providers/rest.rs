use std::sync::Arc;

use async_trait::async_trait;
use toolkit_client::{
    RestClient, StagePayload, StageRecord, SubstagePayload, SubstageRecord, ToolPayload,
    ToolRecord, ToolkitPayload, ToolkitRecord,
};
use toolkit_core::ResourceId;

use crate::Result;
use crate::traits::ToolkitApi;

/// [`ToolkitApi`] backed by the hosted REST backend.
pub struct RestToolkitApi {
    client: Arc<RestClient>,
}

impl RestToolkitApi {
    #[must_use]
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolkitApi for RestToolkitApi {
    async fn create_tool(&self, payload: &ToolPayload) -> Result<ToolRecord> {
        Ok(self.client.create_tool(payload).await?)
    }

    async fn create_process_stage(&self, payload: &StagePayload) -> Result<StageRecord> {
        Ok(self.client.create_process_stage(payload).await?)
    }

    async fn create_substage(&self, payload: &SubstagePayload) -> Result<SubstageRecord> {
        Ok(self.client.create_substage(payload).await?)
    }

    async fn create_toolkit(&self, payload: &ToolkitPayload) -> Result<ToolkitRecord> {
        Ok(self.client.create_toolkit(payload).await?)
    }

    async fn delete_tool(&self, id: ResourceId) -> Result<()> {
        Ok(self.client.delete_tool(id).await?)
    }

    async fn delete_process_stage(&self, id: ResourceId) -> Result<()> {
        Ok(self.client.delete_process_stage(id).await?)
    }

    async fn delete_substage(&self, id: ResourceId) -> Result<()> {
        Ok(self.client.delete_substage(id).await?)
    }
}
