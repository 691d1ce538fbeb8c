//! Read-side catalog endpoints and the transforms that flatten the
//! backend's nested responses into display models.

use serde::{Deserialize, Serialize};
use toolkit_core::{ResourceId, ToolCategory};

use crate::client::RestClient;
use crate::error::Result;
use crate::types::ToolRecord;

#[derive(Debug, Clone, Deserialize)]
pub struct Industry {
    pub id: ResourceId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectType {
    pub id: ResourceId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRecord {
    pub id: ResourceId,
    #[serde(default)]
    pub comment: String,
}

/// Raw shape of `GET /tookit_full` (endpoint name as the backend spells it).
#[derive(Debug, Deserialize)]
struct ToolkitListResponse {
    #[serde(default)]
    result1: Vec<ApiToolkit>,
}

#[derive(Debug, Deserialize)]
struct ApiToolkit {
    id: ResourceId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    likes: i64,
    #[serde(default)]
    industry_id: Option<ResourceId>,
    #[serde(default)]
    projecttype_id: Option<ResourceId>,
    /// The backend nests expanded stages in arrays of arrays.
    #[serde(default)]
    processstages_id: Vec<Vec<ApiStage>>,
}

#[derive(Debug, Deserialize)]
struct ApiStage {
    id: ResourceId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    info: String,
    #[serde(default, rename = "_substages_of_processstages")]
    substages: Vec<ApiSubstage>,
}

#[derive(Debug, Deserialize)]
struct ApiSubstage {
    id: ResourceId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "_tools_of_substages")]
    tools: Vec<ToolRecord>,
}

/// A published toolkit flattened for display.
#[derive(Debug, Clone)]
pub struct ToolkitSummary {
    pub id: ResourceId,
    pub title: String,
    pub description: String,
    pub likes: i64,
    pub industry: String,
    pub project_type: String,
    pub steps: Vec<CatalogStep>,
}

#[derive(Debug, Clone)]
pub struct CatalogStep {
    pub id: ResourceId,
    pub name: String,
    pub info: String,
    pub subphases: Vec<CatalogSubphase>,
}

#[derive(Debug, Clone)]
pub struct CatalogSubphase {
    pub id: ResourceId,
    pub name: String,
    pub description: String,
    pub traditional: Vec<ToolRecord>,
    pub ai: Vec<ToolRecord>,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_id: Option<ResourceId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    toolkit_id: Option<ResourceId>,
    comment: &'a str,
}

impl RestClient {
    /// Fetch the full catalog: toolkits with industry and project-type names
    /// resolved and the nested stage/substage/tool structure flattened.
    pub async fn list_toolkits(&self) -> Result<Vec<ToolkitSummary>> {
        let industries = self.list_industries().await?;
        let project_types = self.list_project_types().await?;
        let response: ToolkitListResponse = self.get_json("/tookit_full").await?;

        Ok(response
            .result1
            .into_iter()
            .map(|toolkit| transform_toolkit(toolkit, &industries, &project_types))
            .collect())
    }

    pub async fn list_industries(&self) -> Result<Vec<Industry>> {
        self.get_json("/industry").await
    }

    pub async fn list_project_types(&self) -> Result<Vec<ProjectType>> {
        self.get_json("/projecttype").await
    }

    pub async fn list_tool_comments(&self, tool_id: ResourceId) -> Result<Vec<CommentRecord>> {
        self.get_json(&format!("/toolcomments?tool_id={tool_id}")).await
    }

    pub async fn add_tool_comment(
        &self,
        tool_id: ResourceId,
        comment: &str,
    ) -> Result<CommentRecord> {
        self.post_json(
            "/toolcomments",
            &CommentPayload {
                tool_id: Some(tool_id),
                toolkit_id: None,
                comment,
            },
        )
        .await
    }

    pub async fn list_toolkit_comments(
        &self,
        toolkit_id: ResourceId,
    ) -> Result<Vec<CommentRecord>> {
        self.get_json(&format!("/toolkilcomments?toolkit_id={toolkit_id}"))
            .await
    }

    pub async fn add_toolkit_comment(
        &self,
        toolkit_id: ResourceId,
        comment: &str,
    ) -> Result<CommentRecord> {
        self.post_json(
            "/toolkilcomments",
            &CommentPayload {
                tool_id: None,
                toolkit_id: Some(toolkit_id),
                comment,
            },
        )
        .await
    }
}

fn transform_toolkit(
    toolkit: ApiToolkit,
    industries: &[Industry],
    project_types: &[ProjectType],
) -> ToolkitSummary {
    let industry = toolkit
        .industry_id
        .and_then(|id| industries.iter().find(|i| i.id == id))
        .map_or_else(|| "Unknown".to_string(), |i| i.name.clone());
    let project_type = toolkit
        .projecttype_id
        .and_then(|id| project_types.iter().find(|p| p.id == id))
        .map_or_else(|| "Unknown".to_string(), |p| p.name.clone());

    let steps = toolkit
        .processstages_id
        .into_iter()
        .flatten()
        .map(transform_stage)
        .collect();

    ToolkitSummary {
        id: toolkit.id,
        title: toolkit.title,
        description: toolkit.description,
        likes: toolkit.likes,
        industry,
        project_type,
        steps,
    }
}

fn transform_stage(stage: ApiStage) -> CatalogStep {
    CatalogStep {
        id: stage.id,
        name: stage.name,
        info: stage.info,
        subphases: stage.substages.into_iter().map(transform_substage).collect(),
    }
}

fn transform_substage(substage: ApiSubstage) -> CatalogSubphase {
    let (traditional, ai): (Vec<ToolRecord>, Vec<ToolRecord>) = substage
        .tools
        .into_iter()
        .filter(|tool| tool.category.is_some())
        .partition(|tool| tool.category == Some(ToolCategory::Traditional));

    CatalogSubphase {
        id: substage.id,
        name: substage.name,
        description: substage.description,
        traditional,
        ai,
    }
}
