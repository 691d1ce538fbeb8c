use serde::{Deserialize, Serialize};
use toolkit_core::{IconPayload, ResourceId, ToolCategory};

/// Wire payload for `POST /tools`. Sent as a multipart form; the icon falls
/// back to a placeholder image when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPayload {
    pub name: String,
    pub website: String,
    pub overview: String,
    pub features: Vec<String>,
    pub category: ToolCategory,
    pub icon: Option<IconPayload>,
}

/// A tool as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRecord {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub category: Option<ToolCategory>,
}

/// Wire payload for `POST /processstages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagePayload {
    pub name: String,
    pub info: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageRecord {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub info: String,
}

/// Wire payload for `POST /substages`. `tools_id` carries server identifiers
/// only: traditional-category tools followed by AI-category tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubstagePayload {
    pub processstages_id: ResourceId,
    pub name: String,
    pub description: String,
    pub tools_id: Vec<ResourceId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubstageRecord {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tools_id: Vec<ResourceId>,
}

/// Wire payload for `POST /toolkit`.
///
/// `auth_tech_id` is always present: anonymous authorship is an explicit
/// `null` owner, never an omitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolkitPayload {
    pub title: String,
    pub description: String,
    pub industry_id: ResourceId,
    pub projecttype_id: ResourceId,
    pub processstages_id: Vec<ResourceId>,
    pub likes: i64,
    pub auth_tech_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolkitRecord {
    pub id: ResourceId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub likes: i64,
}

/// A registered user as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: ResourceId,
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "linkedIn")]
    pub linked_in: String,
    #[serde(default)]
    pub toolkit_id: Vec<ResourceId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolkit_payload_serializes_anonymous_owner_as_explicit_null() {
        let payload = ToolkitPayload {
            title: "Web redesign".to_string(),
            description: "A redesign flow".to_string(),
            industry_id: ResourceId(1),
            projecttype_id: ResourceId(2),
            processstages_id: vec![ResourceId(10), ResourceId(11)],
            likes: 0,
            auth_tech_id: None,
        };

        let json = serde_json::to_value(&payload).expect("serializes");

        assert_eq!(json["auth_tech_id"], serde_json::Value::Null);
        assert_eq!(json["processstages_id"], serde_json::json!([10, 11]));
        assert_eq!(json["likes"], 0);
    }

    #[test]
    fn toolkit_payload_serializes_authenticated_owner() {
        let payload = ToolkitPayload {
            title: "Web redesign".to_string(),
            description: "A redesign flow".to_string(),
            industry_id: ResourceId(1),
            projecttype_id: ResourceId(2),
            processstages_id: vec![ResourceId(10)],
            likes: 0,
            auth_tech_id: Some(ResourceId(77)),
        };

        let json = serde_json::to_value(&payload).expect("serializes");

        assert_eq!(json["auth_tech_id"], 77);
    }

    #[test]
    fn substage_payload_keeps_tool_order() {
        let payload = SubstagePayload {
            processstages_id: ResourceId(5),
            name: "Wireframes".to_string(),
            description: String::new(),
            tools_id: vec![ResourceId(100), ResourceId(101), ResourceId(200)],
        };

        let json = serde_json::to_value(&payload).expect("serializes");

        assert_eq!(json["tools_id"], serde_json::json!([100, 101, 200]));
    }

    #[test]
    fn tool_record_tolerates_missing_fields() {
        let record: ToolRecord =
            serde_json::from_str(r#"{ "id": 42 }"#).expect("parses");

        assert_eq!(record.id, ResourceId(42));
        assert!(record.name.is_empty());
        assert!(record.category.is_none());
    }
}
