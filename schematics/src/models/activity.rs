use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceActivities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<WorkspaceActivity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
}

/// One plan, apply, destroy or refresh run against a workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<WorkspaceActivityTemplate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceActivityTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_summary: Option<LogSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_template_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discarded_files: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_added: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_destroyed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_modified: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_files: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_variable_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<f64>,
}

/// Terraform `-target` and `-var` flags for a workspace job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceActivityOptionsTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tf_vars: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceActivityApplyResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activityid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceActivityCommandResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activityid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerraformCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_on_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_depends_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_status: Option<String>,
}

pub type WorkspaceActivityDestroyResult = WorkspaceActivityApplyResult;
pub type WorkspaceActivityPlanResult = WorkspaceActivityApplyResult;
pub type WorkspaceActivityRefreshResult = WorkspaceActivityApplyResult;
