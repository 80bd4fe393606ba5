//! Jobs and the status, data and log summary records attached to them.
//!
//! Most of these are only ever read back from the service; `create_job`
//! and `update_job` accept the same shapes but the service ignores the
//! read-only parts.

use super::common::{BastionResourceDefinition, ExternalSource, VariableData};
use super::inventory::InventoryResourceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of remote execution: a workspace run, an action run or a system task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_order_data: Option<Vec<CartOrderData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JobData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion: Option<BastionResourceDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_summary: Option<JobLogSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_store_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_store_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_runner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets_ini: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_summary: Option<JobLogSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<JobLite>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_in_queue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_in_queue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_job_status: Option<JobStatusWorkspace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_job_status: Option<JobStatusAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_job_status: Option<JobStatusSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_job_status: Option<JobStatusFlow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusWorkspace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_status: Option<JobStatusFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_status: Option<Vec<JobStatusTemplate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusFlow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workitems: Option<Vec<JobStatusWorkitem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusWorkitem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets_status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets_status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusSystem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schematics_resource_status: Option<Vec<JobStatusSchematicsResources>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatusSchematicsResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schematics_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartOrderData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_kind: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobData {
    /// `repo_download_job`, `workspace_job`, `action_job`, `system_job` or `flow_job`.
    #[serde(default)]
    pub job_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_job_data: Option<JobDataWorkspace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_job_data: Option<JobDataAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_job_data: Option<JobDataSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_job_data: Option<JobDataFlow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDataWorkspace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_data: Option<Vec<JobDataTemplate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDataTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDataAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_record: Option<InventoryResourceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materialized_inventory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDataSystem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schematics_resource_id: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDataFlow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workitems: Option<Vec<JobDataWorkItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDataWorkItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ExternalSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_job: Option<JobDataWorkItemLastJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDataWorkItemLastJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<String>,
}

/// Counters extracted from a job's log by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_start_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_analyzed_till: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_errors: Option<Vec<JobLogSummaryLogErrors>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_download_job: Option<JobLogSummaryRepoDownloadJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_job: Option<JobLogSummaryWorkspaceJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_job: Option<JobLogSummaryFlowJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_job: Option<JobLogSummaryActionJob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_job: Option<JobLogSummarySystemJob>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummaryLogErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_count: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummaryRepoDownloadJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_file_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarantined_file_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_filetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummaryWorkspaceJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_add: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_modify: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_destroy: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummaryFlowJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workitems_completed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workitems_pending: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workitems_failed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workitems: Option<Vec<JobLogSummaryWorkitems>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummaryWorkitems {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_add: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_modify: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources_destroy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummaryActionJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recap: Option<JobLogSummaryActionJobRecap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummaryActionJobRecap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unreachable: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLogSummarySystemJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<f64>,
}

/// Agent a job was dispatched to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_policy_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_summary: Option<JobLogSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<SummaryItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_with_nested_status() {
        let job: Job = serde_json::from_value(json!({
            "id": "us-south.JOB.job-1",
            "command_object": "workspace",
            "command_name": "workspace_plan",
            "status": {
                "position_in_queue": 0,
                "workspace_job_status": {
                    "workspace_name": "ws",
                    "status_code": "job_finished",
                    "updated_at": "2024-05-01T08:00:00Z"
                }
            },
            "data": {"job_type": "workspace_job"}
        }))
        .unwrap();

        let status = job.status.unwrap();
        assert_eq!(status.position_in_queue, Some(0.0));
        assert_eq!(
            status.workspace_job_status.unwrap().status_code.as_deref(),
            Some("job_finished")
        );
        assert_eq!(job.data.unwrap().job_type, "workspace_job");
    }

    #[test]
    fn test_job_data_job_type_is_always_sent() {
        let data = JobData {
            job_type: "repo_download_job".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"job_type": "repo_download_job"})
        );
    }
}
