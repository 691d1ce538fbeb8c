//! The validation stage that gates publishing.
//!
//! The publish orchestrator does not re-check its input; everything it
//! relies on is established here, once, by turning a [`ToolkitDraft`] into
//! a [`PublishDraft`].

use crate::error::{ValidationErrors, ValidationIssue};
use crate::types::{DraftTool, PublishDraft, ToolkitDraft};

const MIN_TITLE_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 10;

/// Validate an authored draft and, if it is publishable, return the
/// [`PublishDraft`] the orchestrator consumes.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every field-level issue found.
pub fn validate_draft(draft: &ToolkitDraft) -> Result<PublishDraft, ValidationErrors> {
    let mut issues = Vec::new();

    let title = draft.basic_info.title.trim();
    if title.is_empty() {
        issue(&mut issues, "title", "title is required");
    } else if title.len() < MIN_TITLE_LEN {
        issue(&mut issues, "title", "title must be at least 3 characters");
    }

    let description = draft.basic_info.description.trim();
    if description.is_empty() {
        issue(&mut issues, "description", "description is required");
    } else if description.len() < MIN_DESCRIPTION_LEN {
        issue(
            &mut issues,
            "description",
            "description must be at least 10 characters",
        );
    }

    if draft.basic_info.industry_id.is_none() {
        issue(&mut issues, "industry_id", "industry is required");
    }
    if draft.basic_info.projecttype_id.is_none() {
        issue(&mut issues, "projecttype_id", "project type is required");
    }

    if draft.steps.is_empty() {
        issue(&mut issues, "steps", "at least one process step is required");
    }

    for (step_index, step) in draft.steps.iter().enumerate() {
        if step.name.trim().is_empty() {
            issue(
                &mut issues,
                &format!("steps[{step_index}].name"),
                "step name is required",
            );
        }

        for (subphase_index, subphase) in step.subphases.iter().enumerate() {
            let prefix = format!("steps[{step_index}].subphases[{subphase_index}]");
            if subphase.name.trim().is_empty() {
                issue(&mut issues, &format!("{prefix}.name"), "subphase name is required");
            }
            check_tools(&mut issues, &prefix, "traditional", &subphase.traditional);
            check_tools(&mut issues, &prefix, "ai", &subphase.ai);
        }
    }

    if !issues.is_empty() {
        return Err(ValidationErrors { issues });
    }

    // Guarded by the presence checks above.
    let industry_id = draft
        .basic_info
        .industry_id
        .ok_or_else(missing_category_ids)?;
    let projecttype_id = draft
        .basic_info
        .projecttype_id
        .ok_or_else(missing_category_ids)?;

    Ok(PublishDraft {
        title: title.to_string(),
        description: description.to_string(),
        industry_id,
        projecttype_id,
        steps: draft.steps.clone(),
    })
}

fn check_tools(
    issues: &mut Vec<ValidationIssue>,
    prefix: &str,
    list: &str,
    tools: &[DraftTool],
) {
    for (tool_index, tool) in tools.iter().enumerate() {
        if tool.name.trim().is_empty() {
            issue(
                issues,
                &format!("{prefix}.{list}[{tool_index}].name"),
                "tool name is required",
            );
        }
        if tool.website.trim().is_empty() {
            issue(
                issues,
                &format!("{prefix}.{list}[{tool_index}].website"),
                "tool website is required",
            );
        }
    }
}

fn issue(issues: &mut Vec<ValidationIssue>, field: &str, message: &str) {
    issues.push(ValidationIssue {
        field: field.to_string(),
        message: message.to_string(),
    });
}

fn missing_category_ids() -> ValidationErrors {
    ValidationErrors {
        issues: vec![ValidationIssue {
            field: "basic_info".to_string(),
            message: "industry and project type are required".to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BasicInfo, DraftProcessStep, DraftSubphase, DraftToolId, ResourceId,
    };

    fn tool(id: u64, name: &str, website: &str) -> DraftTool {
        DraftTool {
            id: DraftToolId(id),
            name: name.to_string(),
            website: website.to_string(),
            overview: String::new(),
            features: Vec::new(),
            icon: None,
        }
    }

    fn valid_draft() -> ToolkitDraft {
        ToolkitDraft {
            basic_info: BasicInfo {
                title: "Web redesign".to_string(),
                description: "A complete redesign workflow".to_string(),
                industry_id: Some(ResourceId(1)),
                projecttype_id: Some(ResourceId(2)),
            },
            steps: vec![DraftProcessStep {
                name: "Design".to_string(),
                info: "Visual design work".to_string(),
                subphases: vec![DraftSubphase {
                    name: "Wireframes".to_string(),
                    description: "Low fidelity layouts".to_string(),
                    traditional: vec![tool(1, "Figma", "figma.com")],
                    ai: Vec::new(),
                }],
            }],
        }
    }

    #[test]
    fn valid_draft_produces_publish_draft() {
        let publish = validate_draft(&valid_draft()).expect("draft should validate");

        assert_eq!(publish.title(), "Web redesign");
        assert_eq!(publish.industry_id(), ResourceId(1));
        assert_eq!(publish.steps().len(), 1);
    }

    #[test]
    fn short_title_is_rejected() {
        let mut draft = valid_draft();
        draft.basic_info.title = "ab".to_string();

        let errors = validate_draft(&draft).expect_err("should fail");

        assert!(errors.issues.iter().any(|i| i.field == "title"));
    }

    #[test]
    fn missing_industry_is_rejected() {
        let mut draft = valid_draft();
        draft.basic_info.industry_id = None;

        let errors = validate_draft(&draft).expect_err("should fail");

        assert!(errors.issues.iter().any(|i| i.field == "industry_id"));
    }

    #[test]
    fn draft_without_steps_is_rejected() {
        let mut draft = valid_draft();
        draft.steps.clear();

        let errors = validate_draft(&draft).expect_err("should fail");

        assert!(errors.issues.iter().any(|i| i.field == "steps"));
    }

    #[test]
    fn tool_without_website_is_rejected_with_full_path() {
        let mut draft = valid_draft();
        draft.steps[0].subphases[0].ai.push(tool(2, "Copilot", ""));

        let errors = validate_draft(&draft).expect_err("should fail");

        assert!(
            errors
                .issues
                .iter()
                .any(|i| i.field == "steps[0].subphases[0].ai[0].website")
        );
    }

    #[test]
    fn all_issues_are_collected_in_one_pass() {
        let draft = ToolkitDraft::default();

        let errors = validate_draft(&draft).expect_err("should fail");

        let fields: Vec<&str> = errors.issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"description"));
        assert!(fields.contains(&"industry_id"));
        assert!(fields.contains(&"projecttype_id"));
        assert!(fields.contains(&"steps"));
    }
}
