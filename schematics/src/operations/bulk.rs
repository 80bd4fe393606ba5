//! Bulk workspace deletion.

use crate::models::{WorkspaceBulkDeleteResponse, WorkspaceJobResponse};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWorkspaceDeletionJobOptions {
    #[serde(skip)]
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// IDs of the workspaces to delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<String>>,
    #[serde(rename = "delete_workspaces", skip_serializing_if = "Option::is_none")]
    pub new_delete_workspaces: Option<bool>,
    #[serde(rename = "destroy_resources", skip_serializing_if = "Option::is_none")]
    pub new_destroy_resources: Option<bool>,
}

impl CreateWorkspaceDeletionJobOptions {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceDeletionJobStatusOptions {
    pub wj_id: String,
}

impl GetWorkspaceDeletionJobStatusOptions {
    pub fn new(wj_id: impl Into<String>) -> Self {
        Self {
            wj_id: wj_id.into(),
        }
    }
}

impl SchematicsV1 {
    /// Start a background job deleting several workspaces at once.
    pub async fn create_workspace_deletion_job(
        &self,
        options: &CreateWorkspaceDeletionJobOptions,
    ) -> Result<DetailedResponse<WorkspaceBulkDeleteResponse>> {
        require_non_empty("refresh_token", &options.refresh_token)?;

        let request = self
            .prepare(
                Method::POST,
                "/v1/workspace_jobs",
                &[],
                "CreateWorkspaceDeletionJob",
            )?
            .header("refresh_token", &options.refresh_token)
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_deletion_job_status(
        &self,
        options: &GetWorkspaceDeletionJobStatusOptions,
    ) -> Result<DetailedResponse<WorkspaceJobResponse>> {
        require_non_empty("wj_id", &options.wj_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspace_jobs/{wj_id}/status",
            &[("wj_id", options.wj_id.as_str())],
            "GetWorkspaceDeletionJobStatus",
        )?;
        self.base().send_json(&request).await
    }
}
