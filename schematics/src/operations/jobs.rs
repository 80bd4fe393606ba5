//! Jobs: single executions of an action, workspace or system command.

use crate::models::{
    AgentInfo, BastionResourceDefinition, CartOrderData, Job, JobData, JobFileData, JobList,
    JobLog, JobLogSummary, JobStatus, VariableData,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListJobsOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub profile: Option<String>,
    /// `workspace`, `action`, `system` or `environment`.
    pub resource: Option<String>,
    pub resource_id: Option<String>,
    pub action_id: Option<String>,
    pub workspace_id: Option<String>,
    /// `all` to include jobs of every resource.
    pub list: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateJobOptions {
    #[serde(skip)]
    pub refresh_token: String,
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
    pub location: Option<String>,
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
    pub agent: Option<AgentInfo>,
}

impl CreateJobOptions {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetJobOptions {
    pub job_id: String,
    pub profile: Option<String>,
}

impl GetJobOptions {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateJobOptions {
    #[serde(skip)]
    pub job_id: String,
    #[serde(skip)]
    pub refresh_token: String,
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
    pub location: Option<String>,
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
    pub agent: Option<AgentInfo>,
}

impl UpdateJobOptions {
    pub fn new(job_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteJobOptions {
    pub job_id: String,
    pub refresh_token: String,
    pub force: Option<bool>,
    pub propagate: Option<bool>,
}

impl DeleteJobOptions {
    pub fn new(job_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListJobLogsOptions {
    pub job_id: String,
}

impl ListJobLogsOptions {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetJobFilesOptions {
    pub job_id: String,
    /// e.g. `state_file` or `plan_json`.
    pub file_type: String,
}

impl GetJobFilesOptions {
    pub fn new(job_id: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            file_type: file_type.into(),
        }
    }
}

impl SchematicsV1 {
    pub async fn list_jobs(&self, options: &ListJobsOptions) -> Result<DetailedResponse<JobList>> {
        let request = self
            .prepare(Method::GET, "/v2/jobs", &[], "ListJobs")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("sort", options.sort.as_deref())
            .query_opt("profile", options.profile.as_deref())
            .query_opt("resource", options.resource.as_deref())
            .query_opt("resource_id", options.resource_id.as_deref())
            .query_opt("action_id", options.action_id.as_deref())
            .query_opt("workspace_id", options.workspace_id.as_deref())
            .query_opt("list", options.list.as_deref());
        self.base().send_json(&request).await
    }

    /// Submit a job, e.g. `command_object = "action"`, `command_name = "ansible_playbook_run"`.
    pub async fn create_job(&self, options: &CreateJobOptions) -> Result<DetailedResponse<Job>> {
        require_non_empty("refresh_token", &options.refresh_token)?;

        let request = self
            .prepare(Method::POST, "/v2/jobs", &[], "CreateJob")?
            .header("refresh_token", &options.refresh_token)
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_job(&self, options: &GetJobOptions) -> Result<DetailedResponse<Job>> {
        require_non_empty("job_id", &options.job_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/jobs/{job_id}",
                &[("job_id", options.job_id.as_str())],
                "GetJob",
            )?
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    /// Re-run a job with new settings.
    pub async fn update_job(&self, options: &UpdateJobOptions) -> Result<DetailedResponse<Job>> {
        require_non_empty("job_id", &options.job_id)?;
        require_non_empty("refresh_token", &options.refresh_token)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v2/jobs/{job_id}",
                &[("job_id", options.job_id.as_str())],
                "UpdateJob",
            )?
            .header("refresh_token", &options.refresh_token)
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Stop a running job, or remove a finished one.
    pub async fn delete_job(&self, options: &DeleteJobOptions) -> Result<DetailedResponse<()>> {
        require_non_empty("job_id", &options.job_id)?;
        require_non_empty("refresh_token", &options.refresh_token)?;

        let request = self
            .prepare(
                Method::DELETE,
                "/v2/jobs/{job_id}",
                &[("job_id", options.job_id.as_str())],
                "DeleteJob",
            )?
            .header("refresh_token", &options.refresh_token)
            .header_opt("force", options.force)
            .header_opt("propagate", options.propagate);
        self.base().send_empty(&request).await
    }

    pub async fn list_job_logs(
        &self,
        options: &ListJobLogsOptions,
    ) -> Result<DetailedResponse<JobLog>> {
        require_non_empty("job_id", &options.job_id)?;

        let request = self.prepare(
            Method::GET,
            "/v2/jobs/{job_id}/logs",
            &[("job_id", options.job_id.as_str())],
            "ListJobLogs",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn get_job_files(
        &self,
        options: &GetJobFilesOptions,
    ) -> Result<DetailedResponse<JobFileData>> {
        require_non_empty("job_id", &options.job_id)?;
        require_non_empty("file_type", &options.file_type)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/jobs/{job_id}/files",
                &[("job_id", options.job_id.as_str())],
                "GetJobFiles",
            )?
            .query("file_type", &options.file_type);
        self.base().send_json(&request).await
    }
}
