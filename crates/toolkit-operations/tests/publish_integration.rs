//! End-to-end publish scenarios against a recording backend double.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use toolkit_client::{
    ClientError, StagePayload, StageRecord, SubstagePayload, SubstageRecord, ToolPayload,
    ToolRecord, ToolkitPayload, ToolkitRecord,
};
use toolkit_core::{
    BasicInfo, DraftProcessStep, DraftSubphase, DraftTool, DraftToolId, PublishDraft,
    ResourceId, ToolkitDraft, validate_draft,
};
use toolkit_operations::traits::{ProgressSink, ToolkitApi};
use toolkit_operations::{OperationError, PublishContext, PublishOperation};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    CreateTool { name: String },
    CreateStage { name: String },
    CreateSubstage { stage: i64, tools: Vec<i64> },
    CreateToolkit { stages: Vec<i64>, owner: Option<i64> },
    DeleteTool(i64),
    DeleteSubstage(i64),
    DeleteStage(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailOn {
    CreateStage,
    CreateSubstage,
    CreateToolkit,
}

struct MockApi {
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI64,
    fail_on: Mutex<Option<FailOn>>,
    fail_stage_deletion: Mutex<bool>,
}

impl MockApi {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
            fail_on: Mutex::new(None),
            fail_stage_deletion: Mutex::new(false),
        }
    }

    fn failing_on(fail_on: FailOn) -> Self {
        let api = Self::new();
        api.set_fail_on(Some(fail_on));
        api
    }

    fn set_fail_on(&self, fail_on: Option<FailOn>) {
        *self.fail_on.lock().expect("lock poisoned") = fail_on;
    }

    fn set_fail_stage_deletion(&self, fail: bool) {
        *self.fail_stage_deletion.lock().expect("lock poisoned") = fail;
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock poisoned").push(call);
    }

    fn next(&self) -> ResourceId {
        ResourceId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn injected_failure(&self, what: FailOn, url: &str) -> Option<OperationError> {
        let armed = *self.fail_on.lock().expect("lock poisoned");
        (armed == Some(what)).then(|| {
            OperationError::Client(ClientError::Status {
                url: url.to_string(),
                status: 500,
                body: "injected failure".to_string(),
            })
        })
    }
}

#[async_trait]
impl ToolkitApi for MockApi {
    async fn create_tool(&self, payload: &ToolPayload) -> Result<ToolRecord, OperationError> {
        self.record(Call::CreateTool {
            name: payload.name.clone(),
        });
        Ok(ToolRecord {
            id: self.next(),
            name: payload.name.clone(),
            website: payload.website.clone(),
            overview: payload.overview.clone(),
            features: payload.features.clone(),
            likes: 0,
            category: Some(payload.category),
        })
    }

    async fn create_process_stage(
        &self,
        payload: &StagePayload,
    ) -> Result<StageRecord, OperationError> {
        if let Some(err) = self.injected_failure(FailOn::CreateStage, "/processstages") {
            return Err(err);
        }
        self.record(Call::CreateStage {
            name: payload.name.clone(),
        });
        Ok(StageRecord {
            id: self.next(),
            name: payload.name.clone(),
            info: payload.info.clone(),
        })
    }

    async fn create_substage(
        &self,
        payload: &SubstagePayload,
    ) -> Result<SubstageRecord, OperationError> {
        if let Some(err) = self.injected_failure(FailOn::CreateSubstage, "/substages") {
            return Err(err);
        }
        self.record(Call::CreateSubstage {
            stage: payload.processstages_id.0,
            tools: payload.tools_id.iter().map(|id| id.0).collect(),
        });
        Ok(SubstageRecord {
            id: self.next(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            tools_id: payload.tools_id.clone(),
        })
    }

    async fn create_toolkit(
        &self,
        payload: &ToolkitPayload,
    ) -> Result<ToolkitRecord, OperationError> {
        if let Some(err) = self.injected_failure(FailOn::CreateToolkit, "/toolkit") {
            return Err(err);
        }
        self.record(Call::CreateToolkit {
            stages: payload.processstages_id.iter().map(|id| id.0).collect(),
            owner: payload.auth_tech_id.map(|id| id.0),
        });
        Ok(ToolkitRecord {
            id: self.next(),
            title: payload.title.clone(),
            description: payload.description.clone(),
            likes: payload.likes,
        })
    }

    async fn delete_tool(&self, id: ResourceId) -> Result<(), OperationError> {
        self.record(Call::DeleteTool(id.0));
        Ok(())
    }

    async fn delete_process_stage(&self, id: ResourceId) -> Result<(), OperationError> {
        self.record(Call::DeleteStage(id.0));
        if *self.fail_stage_deletion.lock().expect("lock poisoned") {
            return Err(OperationError::Client(ClientError::Status {
                url: format!("/processstages/{id}"),
                status: 500,
                body: "injected deletion failure".to_string(),
            }));
        }
        Ok(())
    }

    async fn delete_substage(&self, id: ResourceId) -> Result<(), OperationError> {
        self.record(Call::DeleteSubstage(id.0));
        Ok(())
    }
}

#[derive(Default)]
struct CaptureProgress {
    reports: Mutex<Vec<(String, u8)>>,
}

impl CaptureProgress {
    fn reports(&self) -> Vec<(String, u8)> {
        self.reports.lock().expect("lock poisoned").clone()
    }
}

impl ProgressSink for CaptureProgress {
    fn report(&self, stage: &str, percent: u8) {
        self.reports
            .lock()
            .expect("lock poisoned")
            .push((stage.to_string(), percent));
    }
}

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

fn subphase(name: &str, traditional: Vec<DraftTool>, ai: Vec<DraftTool>) -> DraftSubphase {
    DraftSubphase {
        name: name.to_string(),
        description: String::new(),
        traditional,
        ai,
    }
}

fn step(name: &str, subphases: Vec<DraftSubphase>) -> DraftProcessStep {
    DraftProcessStep {
        name: name.to_string(),
        info: String::new(),
        subphases,
    }
}

fn draft_with_steps(steps: Vec<DraftProcessStep>) -> PublishDraft {
    let draft = ToolkitDraft {
        basic_info: BasicInfo {
            title: "Web redesign".to_string(),
            description: "A complete redesign workflow".to_string(),
            industry_id: Some(ResourceId(1)),
            projecttype_id: Some(ResourceId(2)),
        },
        steps,
    };
    validate_draft(&draft).expect("test draft should validate")
}

/// One step, one subphase, one traditional tool, no AI tools.
fn figma_draft() -> PublishDraft {
    draft_with_steps(vec![step(
        "Design",
        vec![subphase(
            "Wireframes",
            vec![tool(1, "Figma", "figma.com")],
            Vec::new(),
        )],
    )])
}

fn operation(api: &Arc<MockApi>, user_id: Option<ResourceId>) -> PublishOperation<MockApi> {
    PublishOperation::new(
        PublishContext::new(Arc::clone(api), user_id).with_pacing(Duration::ZERO),
    )
}

#[tokio::test]
async fn end_to_end_success_issues_one_call_per_resource() {
    let api = Arc::new(MockApi::new());
    let progress = CaptureProgress::default();

    let toolkit = operation(&api, None)
        .execute(&figma_draft(), &progress)
        .await
        .expect("publish should succeed");

    assert_eq!(toolkit.title, "Web redesign");
    assert_eq!(
        api.calls(),
        vec![
            Call::CreateTool {
                name: "Figma".to_string()
            },
            Call::CreateStage {
                name: "Design".to_string()
            },
            Call::CreateSubstage {
                stage: 1001,
                tools: vec![1000]
            },
            Call::CreateToolkit {
                stages: vec![1001],
                owner: None
            },
        ]
    );
    assert_eq!(
        progress.reports().last(),
        Some(&("Complete!".to_string(), 100))
    );
}

#[tokio::test]
async fn progress_is_reported_at_every_phase_boundary() {
    let api = Arc::new(MockApi::new());
    let progress = CaptureProgress::default();

    operation(&api, None)
        .execute(&figma_draft(), &progress)
        .await
        .expect("publish should succeed");

    let reports = progress.reports();
    assert_eq!(reports[0], ("Creating toolkit...".to_string(), 10));
    assert!(reports.contains(&("Creating tools...".to_string(), 30)));
    assert!(reports.contains(&("Creating process stages...".to_string(), 30)));
    assert!(reports.contains(&("Creating substages...".to_string(), 60)));
    assert!(reports.contains(&("Creating toolkit...".to_string(), 90)));
    assert_eq!(reports.last(), Some(&("Complete!".to_string(), 100)));
}

#[tokio::test]
async fn duplicate_draft_tool_ids_create_exactly_one_tool() {
    let api = Arc::new(MockApi::new());
    let shared = tool(1, "Figma", "figma.com");
    let draft = draft_with_steps(vec![
        step(
            "Design",
            vec![
                subphase("Wireframes", vec![shared.clone()], Vec::new()),
                subphase("Mockups", vec![shared.clone()], Vec::new()),
            ],
        ),
        step("Build", vec![subphase("Implementation", vec![shared], Vec::new())]),
    ]);

    operation(&api, None)
        .execute(&draft, &toolkit_operations::traits::NullProgress)
        .await
        .expect("publish should succeed");

    let tool_creates = api
        .calls()
        .iter()
        .filter(|call| matches!(call, Call::CreateTool { .. }))
        .count();
    assert_eq!(tool_creates, 1);
}

#[tokio::test]
async fn stages_are_created_in_step_order() {
    let api = Arc::new(MockApi::new());
    let draft = draft_with_steps(vec![
        step("Discover", vec![subphase("Research", vec![tool(1, "Miro", "miro.com")], Vec::new())]),
        step("Design", Vec::new()),
        step("Deliver", Vec::new()),
    ]);

    operation(&api, None)
        .execute(&draft, &toolkit_operations::traits::NullProgress)
        .await
        .expect("publish should succeed");

    let stage_names: Vec<String> = api
        .calls()
        .iter()
        .filter_map(|call| match call {
            Call::CreateStage { name } => Some(name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(stage_names, vec!["Discover", "Design", "Deliver"]);
}

#[tokio::test]
async fn substage_payload_carries_mapped_server_ids_in_list_order() {
    let api = Arc::new(MockApi::new());
    let draft = draft_with_steps(vec![step(
        "Design",
        vec![subphase(
            "Wireframes",
            vec![tool(1, "Figma", "figma.com"), tool(2, "Sketch", "sketch.com")],
            vec![tool(3, "Uizard", "uizard.io")],
        )],
    )]);

    operation(&api, None)
        .execute(&draft, &toolkit_operations::traits::NullProgress)
        .await
        .expect("publish should succeed");

    let substage_tools: Vec<Vec<i64>> = api
        .calls()
        .iter()
        .filter_map(|call| match call {
            Call::CreateSubstage { tools, .. } => Some(tools.clone()),
            _ => None,
        })
        .collect();
    // Tools get ids 1000-1002 in collection order: traditional then AI.
    assert_eq!(substage_tools, vec![vec![1000, 1001, 1002]]);
}

#[tokio::test]
async fn authenticated_user_becomes_the_toolkit_owner() {
    let api = Arc::new(MockApi::new());

    operation(&api, Some(ResourceId(77)))
        .execute(&figma_draft(), &toolkit_operations::traits::NullProgress)
        .await
        .expect("publish should succeed");

    assert!(api.calls().iter().any(|call| matches!(
        call,
        Call::CreateToolkit {
            owner: Some(77),
            ..
        }
    )));
}

#[tokio::test]
async fn substage_failure_stops_creation_and_rolls_back_exactly_what_exists() {
    let api = Arc::new(MockApi::failing_on(FailOn::CreateSubstage));

    let err = operation(&api, None)
        .execute(&figma_draft(), &toolkit_operations::traits::NullProgress)
        .await
        .expect_err("publish should fail");

    match err {
        OperationError::PublishFailed { phase, .. } => {
            assert_eq!(phase, "create_substages");
        }
        other => panic!("expected PublishFailed, got {other:?}"),
    }

    let calls = api.calls();
    assert!(
        !calls.iter().any(|c| matches!(c, Call::CreateToolkit { .. })),
        "no creation of any kind after the failure"
    );
    let deletions: Vec<&Call> = calls
        .iter()
        .filter(|c| {
            matches!(
                c,
                Call::DeleteTool(_) | Call::DeleteStage(_) | Call::DeleteSubstage(_)
            )
        })
        .collect();
    // Exactly the 1 tool and 1 stage created before the failure.
    assert_eq!(deletions, vec![&Call::DeleteTool(1000), &Call::DeleteStage(1001)]);
}

#[tokio::test]
async fn stage_failure_rolls_back_only_the_created_tools() {
    let api = Arc::new(MockApi::failing_on(FailOn::CreateStage));

    let err = operation(&api, None)
        .execute(&figma_draft(), &toolkit_operations::traits::NullProgress)
        .await
        .expect_err("publish should fail");

    match err {
        OperationError::PublishFailed { phase, .. } => {
            assert_eq!(phase, "create_process_stages");
        }
        other => panic!("expected PublishFailed, got {other:?}"),
    }

    let calls = api.calls();
    let deletions: Vec<&Call> = calls
        .iter()
        .filter(|c| {
            matches!(
                c,
                Call::DeleteTool(_) | Call::DeleteStage(_) | Call::DeleteSubstage(_)
            )
        })
        .collect();
    assert_eq!(deletions, vec![&Call::DeleteTool(1000)]);
}

#[tokio::test]
async fn rollback_deletes_tools_before_substages_before_stages() {
    let api = Arc::new(MockApi::failing_on(FailOn::CreateToolkit));

    operation(&api, None)
        .execute(&figma_draft(), &toolkit_operations::traits::NullProgress)
        .await
        .expect_err("publish should fail");

    let calls = api.calls();
    let position = |pred: &dyn Fn(&Call) -> bool| {
        calls
            .iter()
            .position(|c| pred(c))
            .expect("expected call missing")
    };
    let tool_deletion = position(&|c| matches!(c, Call::DeleteTool(_)));
    let substage_deletion = position(&|c| matches!(c, Call::DeleteSubstage(_)));
    let stage_deletion = position(&|c| matches!(c, Call::DeleteStage(_)));

    assert!(tool_deletion < substage_deletion);
    assert!(substage_deletion < stage_deletion);
}

#[tokio::test]
async fn failed_rollback_deletion_surfaces_both_errors() {
    let api = Arc::new(MockApi::failing_on(FailOn::CreateToolkit));
    api.set_fail_stage_deletion(true);

    let err = operation(&api, None)
        .execute(&figma_draft(), &toolkit_operations::traits::NullProgress)
        .await
        .expect_err("publish should fail");

    match err {
        OperationError::PublishRollbackFailed {
            phase,
            source,
            rollback_failures,
        } => {
            assert_eq!(phase, "create_toolkit");
            assert!(source.to_string().contains("/toolkit"));
            assert_eq!(rollback_failures.len(), 1);
            assert_eq!(rollback_failures[0].kind, "process stage");
        }
        other => panic!("expected PublishRollbackFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn republishing_after_a_rolled_back_attempt_creates_new_resources() {
    let api = Arc::new(MockApi::failing_on(FailOn::CreateSubstage));
    let draft = figma_draft();

    operation(&api, None)
        .execute(&draft, &toolkit_operations::traits::NullProgress)
        .await
        .expect_err("first attempt should fail");

    api.set_fail_on(None);
    operation(&api, None)
        .execute(&draft, &toolkit_operations::traits::NullProgress)
        .await
        .expect("second attempt should succeed");

    let calls = api.calls();
    let tool_creates = calls
        .iter()
        .filter(|c| matches!(c, Call::CreateTool { .. }))
        .count();
    assert_eq!(tool_creates, 2, "no deduplication across attempts");

    // The second attempt references its own fresh resources, not the
    // rolled-back ones.
    let last_substage = calls
        .iter()
        .rev()
        .find_map(|c| match c {
            Call::CreateSubstage { tools, .. } => Some(tools.clone()),
            _ => None,
        })
        .expect("second attempt created a substage");
    assert_eq!(last_substage, vec![1002]);
}

#[tokio::test]
async fn audit_log_records_phases_and_rollback_outcomes() {
    let api = Arc::new(MockApi::failing_on(FailOn::CreateToolkit));

    let (result, audit) = operation(&api, None)
        .execute_with_audit(&figma_draft(), &toolkit_operations::traits::NullProgress)
        .await;

    assert!(result.is_err());
    let summary = audit.summary();
    assert!(summary.contains("✓ create_tools"));
    assert!(summary.contains("✗ create_toolkit"));
    assert!(summary.contains("↩ tool: 1 deleted"));
}
