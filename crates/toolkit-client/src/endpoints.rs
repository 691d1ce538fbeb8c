//! Creation and deletion endpoints for the publish workflow.

use reqwest::multipart::{Form, Part};
use toolkit_core::ResourceId;

use crate::client::{RestClient, decode};
use crate::error::Result;
use crate::types::{
    StagePayload, StageRecord, SubstagePayload, SubstageRecord, ToolPayload, ToolRecord,
    ToolkitPayload, ToolkitRecord,
};

/// 1x1 transparent PNG sent when a tool carries no icon; the backend
/// requires a file part on tool creation.
const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
    0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
    0x00, 0x1f, 0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78,
    0xda, 0x63, 0xfc, 0xcf, 0xc0, 0x50, 0x0f, 0x00, 0x04, 0x85, 0x01, 0x80, 0x84, 0xa9,
    0x8c, 0x21, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

impl RestClient {
    /// Create a tool. The payload goes out as a multipart form because the
    /// backend expects the icon as an uploaded file.
    pub async fn create_tool(&self, payload: &ToolPayload) -> Result<ToolRecord> {
        let url = self.url("/tools");
        let features = serde_json::to_string(&payload.features).unwrap_or_else(|_| "[]".to_string());

        let response = self
            .execute(&url, || {
                let mut form = Form::new()
                    .text("name", payload.name.clone())
                    .text("website", payload.website.clone())
                    .text("overview", payload.overview.clone())
                    .text("category", payload.category.to_string())
                    .text("features", features.clone());

                let part = match &payload.icon {
                    Some(icon) => file_part(icon.bytes.clone(), &icon.file_name, &icon.mime),
                    None => file_part(PLACEHOLDER_PNG.to_vec(), "placeholder.png", "image/png"),
                };
                form = form.part("file", part);

                self.http().post(&url).multipart(form)
            })
            .await?;

        decode(&url, response).await
    }

    pub async fn create_process_stage(&self, payload: &StagePayload) -> Result<StageRecord> {
        self.post_json("/processstages", payload).await
    }

    pub async fn create_substage(&self, payload: &SubstagePayload) -> Result<SubstageRecord> {
        self.post_json("/substages", payload).await
    }

    pub async fn create_toolkit(&self, payload: &ToolkitPayload) -> Result<ToolkitRecord> {
        self.post_json("/toolkit", payload).await
    }

    pub async fn delete_tool(&self, id: ResourceId) -> Result<()> {
        self.delete(&format!("/tools/{id}")).await
    }

    pub async fn delete_process_stage(&self, id: ResourceId) -> Result<()> {
        self.delete(&format!("/processstages/{id}")).await
    }

    pub async fn delete_substage(&self, id: ResourceId) -> Result<()> {
        self.delete(&format!("/substages/{id}")).await
    }
}

fn file_part(bytes: Vec<u8>, file_name: &str, mime: &str) -> Part {
    // An unparseable mime falls back to an untyped part rather than failing
    // the upload.
    match Part::bytes(bytes.clone())
        .file_name(file_name.to_string())
        .mime_str(mime)
    {
        Ok(part) => part,
        Err(_) => Part::bytes(bytes).file_name(file_name.to_string()),
    }
}
