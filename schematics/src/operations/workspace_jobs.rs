//! Terraform runs against a workspace and the activities they leave behind.
//!
//! Every command needs an IAM refresh token in the `refresh_token` header so
//! the service can act on behalf of the caller once the access token expires.
//! `delegated_token` is only needed when the workspace targets another account.

use crate::models::{
    TerraformCommand, WorkspaceActivities, WorkspaceActivity, WorkspaceActivityApplyResult,
    WorkspaceActivityCommandResult, WorkspaceActivityDestroyResult,
    WorkspaceActivityOptionsTemplate, WorkspaceActivityPlanResult,
    WorkspaceActivityRefreshResult,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result, ServiceRequest};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListWorkspaceActivitiesOptions {
    pub w_id: String,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl ListWorkspaceActivitiesOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceActivityOptions {
    pub w_id: String,
    pub activity_id: String,
}

impl GetWorkspaceActivityOptions {
    pub fn new(w_id: impl Into<String>, activity_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            activity_id: activity_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteWorkspaceActivityOptions {
    pub w_id: String,
    pub activity_id: String,
}

impl DeleteWorkspaceActivityOptions {
    pub fn new(w_id: impl Into<String>, activity_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            activity_id: activity_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunWorkspaceCommandsOptions {
    #[serde(skip)]
    pub w_id: String,
    #[serde(skip)]
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<TerraformCommand>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RunWorkspaceCommandsOptions {
    pub fn new(w_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyWorkspaceCommandOptions {
    #[serde(skip)]
    pub w_id: String,
    #[serde(skip)]
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_options: Option<WorkspaceActivityOptionsTemplate>,
    #[serde(skip)]
    pub delegated_token: Option<String>,
}

impl ApplyWorkspaceCommandOptions {
    pub fn new(w_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DestroyWorkspaceCommandOptions {
    #[serde(skip)]
    pub w_id: String,
    #[serde(skip)]
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_options: Option<WorkspaceActivityOptionsTemplate>,
    #[serde(skip)]
    pub delegated_token: Option<String>,
}

impl DestroyWorkspaceCommandOptions {
    pub fn new(w_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanWorkspaceCommandOptions {
    #[serde(skip)]
    pub w_id: String,
    #[serde(skip)]
    pub refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_options: Option<WorkspaceActivityOptionsTemplate>,
    #[serde(skip)]
    pub delegated_token: Option<String>,
}

impl PlanWorkspaceCommandOptions {
    pub fn new(w_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RefreshWorkspaceCommandOptions {
    pub w_id: String,
    pub refresh_token: String,
    pub delegated_token: Option<String>,
}

impl RefreshWorkspaceCommandOptions {
    pub fn new(w_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn list_workspace_activities(
        &self,
        options: &ListWorkspaceActivitiesOptions,
    ) -> Result<DetailedResponse<WorkspaceActivities>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v1/workspaces/{w_id}/actions",
                &[("w_id", options.w_id.as_str())],
                "ListWorkspaceActivities",
            )?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit);
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_activity(
        &self,
        options: &GetWorkspaceActivityOptions,
    ) -> Result<DetailedResponse<WorkspaceActivity>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("activity_id", &options.activity_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/actions/{activity_id}",
            &[
                ("w_id", options.w_id.as_str()),
                ("activity_id", options.activity_id.as_str()),
            ],
            "GetWorkspaceActivity",
        )?;
        self.base().send_json(&request).await
    }

    /// Stop a queued or running activity.
    pub async fn delete_workspace_activity(
        &self,
        options: &DeleteWorkspaceActivityOptions,
    ) -> Result<DetailedResponse<WorkspaceActivityApplyResult>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("activity_id", &options.activity_id)?;

        let request = self.prepare(
            Method::DELETE,
            "/v1/workspaces/{w_id}/actions/{activity_id}",
            &[
                ("w_id", options.w_id.as_str()),
                ("activity_id", options.activity_id.as_str()),
            ],
            "DeleteWorkspaceActivity",
        )?;
        self.base().send_json(&request).await
    }

    /// Run arbitrary Terraform commands (`state show`, `taint`, ...) in order.
    pub async fn run_workspace_commands(
        &self,
        options: &RunWorkspaceCommandsOptions,
    ) -> Result<DetailedResponse<WorkspaceActivityCommandResult>> {
        let request = self
            .command_request(
                Method::PUT,
                "/v1/workspaces/{w_id}/commands",
                &options.w_id,
                &options.refresh_token,
                None,
                "RunWorkspaceCommands",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn apply_workspace_command(
        &self,
        options: &ApplyWorkspaceCommandOptions,
    ) -> Result<DetailedResponse<WorkspaceActivityApplyResult>> {
        let request = self
            .command_request(
                Method::PUT,
                "/v1/workspaces/{w_id}/apply",
                &options.w_id,
                &options.refresh_token,
                options.delegated_token.as_deref(),
                "ApplyWorkspaceCommand",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn destroy_workspace_command(
        &self,
        options: &DestroyWorkspaceCommandOptions,
    ) -> Result<DetailedResponse<WorkspaceActivityDestroyResult>> {
        let request = self
            .command_request(
                Method::PUT,
                "/v1/workspaces/{w_id}/destroy",
                &options.w_id,
                &options.refresh_token,
                options.delegated_token.as_deref(),
                "DestroyWorkspaceCommand",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn plan_workspace_command(
        &self,
        options: &PlanWorkspaceCommandOptions,
    ) -> Result<DetailedResponse<WorkspaceActivityPlanResult>> {
        let request = self
            .command_request(
                Method::POST,
                "/v1/workspaces/{w_id}/plan",
                &options.w_id,
                &options.refresh_token,
                options.delegated_token.as_deref(),
                "PlanWorkspaceCommand",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Reconcile the stored state with the real resources.
    pub async fn refresh_workspace_command(
        &self,
        options: &RefreshWorkspaceCommandOptions,
    ) -> Result<DetailedResponse<WorkspaceActivityRefreshResult>> {
        let request = self.command_request(
            Method::PUT,
            "/v1/workspaces/{w_id}/refresh",
            &options.w_id,
            &options.refresh_token,
            options.delegated_token.as_deref(),
            "RefreshWorkspaceCommand",
        )?;
        self.base().send_json(&request).await
    }

    fn command_request(
        &self,
        method: Method,
        path: &str,
        w_id: &str,
        refresh_token: &str,
        delegated_token: Option<&str>,
        operation_id: &str,
    ) -> Result<ServiceRequest> {
        require_non_empty("w_id", w_id)?;
        require_non_empty("refresh_token", refresh_token)?;

        Ok(self
            .prepare(method, path, &[("w_id", w_id)], operation_id)?
            .header("refresh_token", refresh_token)
            .header_opt("delegated_token", delegated_token))
    }
}
