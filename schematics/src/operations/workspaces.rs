//! Workspace lifecycle, template inputs and outputs, state and logs.

use crate::models::{
    CatalogRef, Dependencies, LogStoreResponseList, OutputValuesInner, SharedTargetData,
    StateStoreResponseList, TemplateReadme, TemplateRepoRequest, TemplateRepoTarUploadResponse,
    TemplateRepoUpdateRequest, TemplateResources, TemplateSourceDataRequest, UserValues,
    WorkspaceActivityLogs, WorkspaceResponse, WorkspaceResponseList, WorkspaceStatusMessage,
    WorkspaceStatusRequest, WorkspaceStatusUpdateRequest, WorkspaceTemplateValuesResponse,
    WorkspaceVariableRequest,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{CoreError, DetailedResponse, FilePart, Result, ServiceRequest};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default)]
pub struct ListWorkspacesOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub profile: Option<String>,
    pub resource_group: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWorkspaceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_shareddata_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_ref: Option<CatalogRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_data: Option<SharedTargetData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_data: Option<Vec<TemplateSourceDataRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_repo: Option<TemplateRepoRequest>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_status: Option<WorkspaceStatusRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip)]
    pub x_github_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceOptions {
    pub w_id: String,
}

impl GetWorkspaceOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaceWorkspaceOptions {
    #[serde(skip)]
    pub w_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_ref: Option<CatalogRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_data: Option<SharedTargetData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_data: Option<Vec<TemplateSourceDataRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_repo: Option<TemplateRepoUpdateRequest>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_status: Option<WorkspaceStatusUpdateRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_status_msg: Option<WorkspaceStatusMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip)]
    pub x_github_token: Option<String>,
}

impl ReplaceWorkspaceOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateWorkspaceOptions {
    #[serde(skip)]
    pub w_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_ref: Option<CatalogRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Dependencies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_data: Option<SharedTargetData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_data: Option<Vec<TemplateSourceDataRequest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_repo: Option<TemplateRepoUpdateRequest>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_status: Option<WorkspaceStatusUpdateRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_status_msg: Option<WorkspaceStatusMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl UpdateWorkspaceOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteWorkspaceOptions {
    pub w_id: String,
    pub refresh_token: String,
    pub destroy_resources: Option<String>,
}

impl DeleteWorkspaceOptions {
    pub fn new(w_id: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            refresh_token: refresh_token.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceReadmeOptions {
    pub w_id: String,
    pub r#ref: Option<String>,
    /// `markdown` or `html`.
    pub formatted: Option<String>,
}

impl GetWorkspaceReadmeOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            ..Default::default()
        }
    }
}

/// File name sent with a template archive when the caller gives none.
pub const TEMPLATE_TAR_FILE_NAME: &str = "template.tar";

#[derive(Debug, Clone, Default)]
pub struct TemplateRepoUploadOptions {
    pub w_id: String,
    pub t_id: String,
    pub file: Vec<u8>,
    pub file_content_type: Option<String>,
    /// Multipart file name; defaults to [`TEMPLATE_TAR_FILE_NAME`].
    pub file_name: Option<String>,
}

impl TemplateRepoUploadOptions {
    pub fn new(w_id: impl Into<String>, t_id: impl Into<String>, file: impl Into<Vec<u8>>) -> Self {
        Self {
            w_id: w_id.into(),
            t_id: t_id.into(),
            file: file.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceInputsOptions {
    pub w_id: String,
    pub t_id: String,
}

impl GetWorkspaceInputsOptions {
    pub fn new(w_id: impl Into<String>, t_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            t_id: t_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaceWorkspaceInputsOptions {
    #[serde(skip)]
    pub w_id: String,
    #[serde(skip)]
    pub t_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_values: Option<Vec<Map<String, Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variablestore: Option<Vec<WorkspaceVariableRequest>>,
}

impl ReplaceWorkspaceInputsOptions {
    pub fn new(w_id: impl Into<String>, t_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            t_id: t_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetAllWorkspaceInputsOptions {
    pub w_id: String,
}

impl GetAllWorkspaceInputsOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceInputMetadataOptions {
    pub w_id: String,
    pub t_id: String,
}

impl GetWorkspaceInputMetadataOptions {
    pub fn new(w_id: impl Into<String>, t_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            t_id: t_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceOutputsOptions {
    pub w_id: String,
}

impl GetWorkspaceOutputsOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceResourcesOptions {
    pub w_id: String,
}

impl GetWorkspaceResourcesOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceStateOptions {
    pub w_id: String,
}

impl GetWorkspaceStateOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceTemplateStateOptions {
    pub w_id: String,
    pub t_id: String,
}

impl GetWorkspaceTemplateStateOptions {
    pub fn new(w_id: impl Into<String>, t_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            t_id: t_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceActivityLogsOptions {
    pub w_id: String,
    pub activity_id: String,
}

impl GetWorkspaceActivityLogsOptions {
    pub fn new(w_id: impl Into<String>, activity_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            activity_id: activity_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetWorkspaceLogUrlsOptions {
    pub w_id: String,
}

impl GetWorkspaceLogUrlsOptions {
    pub fn new(w_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetTemplateLogsOptions {
    pub w_id: String,
    pub t_id: String,
    pub log_tf_cmd: Option<bool>,
    pub log_tf_prefix: Option<bool>,
    pub log_tf_null_resource: Option<bool>,
    pub log_tf_ansible: Option<bool>,
}

impl GetTemplateLogsOptions {
    pub fn new(w_id: impl Into<String>, t_id: impl Into<String>) -> Self {
        Self {
            w_id: w_id.into(),
            t_id: t_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetTemplateActivityLogOptions {
    pub w_id: String,
    pub t_id: String,
    pub activity_id: String,
    pub log_tf_cmd: Option<bool>,
    pub log_tf_prefix: Option<bool>,
    pub log_tf_null_resource: Option<bool>,
    pub log_tf_ansible: Option<bool>,
}

impl GetTemplateActivityLogOptions {
    pub fn new(
        w_id: impl Into<String>,
        t_id: impl Into<String>,
        activity_id: impl Into<String>,
    ) -> Self {
        Self {
            w_id: w_id.into(),
            t_id: t_id.into(),
            activity_id: activity_id.into(),
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn list_workspaces(
        &self,
        options: &ListWorkspacesOptions,
    ) -> Result<DetailedResponse<WorkspaceResponseList>> {
        let request = self
            .prepare(Method::GET, "/v1/workspaces", &[], "ListWorkspaces")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("profile", options.profile.as_deref())
            .query_opt("resource_group", options.resource_group.as_deref());
        self.base().send_json(&request).await
    }

    /// Create a workspace from a template repository or catalog offering.
    pub async fn create_workspace(
        &self,
        options: &CreateWorkspaceOptions,
    ) -> Result<DetailedResponse<WorkspaceResponse>> {
        let request = self
            .prepare(Method::POST, "/v1/workspaces", &[], "CreateWorkspace")?
            .header_opt("X-Github-token", options.x_github_token.as_deref())
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_workspace(
        &self,
        options: &GetWorkspaceOptions,
    ) -> Result<DetailedResponse<WorkspaceResponse>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}",
            &[("w_id", options.w_id.as_str())],
            "GetWorkspace",
        )?;
        self.base().send_json(&request).await
    }

    /// Replace the workspace definition. Fields left unset are cleared.
    pub async fn replace_workspace(
        &self,
        options: &ReplaceWorkspaceOptions,
    ) -> Result<DetailedResponse<WorkspaceResponse>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v1/workspaces/{w_id}",
                &[("w_id", options.w_id.as_str())],
                "ReplaceWorkspace",
            )?
            .header_opt("X-Github-token", options.x_github_token.as_deref())
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Change only the fields that are set.
    pub async fn update_workspace(
        &self,
        options: &UpdateWorkspaceOptions,
    ) -> Result<DetailedResponse<WorkspaceResponse>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self
            .prepare(
                Method::PATCH,
                "/v1/workspaces/{w_id}",
                &[("w_id", options.w_id.as_str())],
                "UpdateWorkspace",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Delete a workspace, optionally destroying the resources it manages.
    ///
    /// The service answers with a plain status string.
    pub async fn delete_workspace(
        &self,
        options: &DeleteWorkspaceOptions,
    ) -> Result<DetailedResponse<String>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("refresh_token", &options.refresh_token)?;

        let request = self
            .prepare(
                Method::DELETE,
                "/v1/workspaces/{w_id}",
                &[("w_id", options.w_id.as_str())],
                "DeleteWorkspace",
            )?
            .header("refresh_token", options.refresh_token.as_str())
            .query_opt("destroy_resources", options.destroy_resources.as_deref());
        self.base().send_text(&request).await
    }

    pub async fn get_workspace_readme(
        &self,
        options: &GetWorkspaceReadmeOptions,
    ) -> Result<DetailedResponse<TemplateReadme>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v1/workspaces/{w_id}/templates/readme",
                &[("w_id", options.w_id.as_str())],
                "GetWorkspaceReadme",
            )?
            .query_opt("ref", options.r#ref.as_deref())
            .query_opt("formatted", options.formatted.as_deref());
        self.base().send_json(&request).await
    }

    /// Upload a `.tar` of the template in place of a git repository.
    pub async fn template_repo_upload(
        &self,
        options: &TemplateRepoUploadOptions,
    ) -> Result<DetailedResponse<TemplateRepoTarUploadResponse>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("t_id", &options.t_id)?;
        if options.file.is_empty() {
            return Err(CoreError::Validation(
                "file must not be empty".to_string(),
            ));
        }

        let part = FilePart::new("file", options.file.clone())
            .with_file_name(options.file_name.as_deref().unwrap_or(TEMPLATE_TAR_FILE_NAME))
            .with_content_type(options.file_content_type.clone());
        let request = self
            .prepare(
                Method::PUT,
                "/v1/workspaces/{w_id}/template_data/{t_id}/template_repo_upload",
                &[("w_id", options.w_id.as_str()), ("t_id", options.t_id.as_str())],
                "TemplateRepoUpload",
            )?
            .multipart(vec![part]);
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_inputs(
        &self,
        options: &GetWorkspaceInputsOptions,
    ) -> Result<DetailedResponse<WorkspaceTemplateValuesResponse>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("t_id", &options.t_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/template_data/{t_id}/values",
            &[("w_id", options.w_id.as_str()), ("t_id", options.t_id.as_str())],
            "GetWorkspaceInputs",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn replace_workspace_inputs(
        &self,
        options: &ReplaceWorkspaceInputsOptions,
    ) -> Result<DetailedResponse<UserValues>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("t_id", &options.t_id)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v1/workspaces/{w_id}/template_data/{t_id}/values",
                &[("w_id", options.w_id.as_str()), ("t_id", options.t_id.as_str())],
                "ReplaceWorkspaceInputs",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Input values of every template in the workspace.
    pub async fn get_all_workspace_inputs(
        &self,
        options: &GetAllWorkspaceInputsOptions,
    ) -> Result<DetailedResponse<WorkspaceTemplateValuesResponse>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/templates/values",
            &[("w_id", options.w_id.as_str())],
            "GetAllWorkspaceInputs",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_input_metadata(
        &self,
        options: &GetWorkspaceInputMetadataOptions,
    ) -> Result<DetailedResponse<Vec<Value>>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("t_id", &options.t_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/template_data/{t_id}/values_metadata",
            &[("w_id", options.w_id.as_str()), ("t_id", options.t_id.as_str())],
            "GetWorkspaceInputMetadata",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_outputs(
        &self,
        options: &GetWorkspaceOutputsOptions,
    ) -> Result<DetailedResponse<Vec<OutputValuesInner>>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/output_values",
            &[("w_id", options.w_id.as_str())],
            "GetWorkspaceOutputs",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_resources(
        &self,
        options: &GetWorkspaceResourcesOptions,
    ) -> Result<DetailedResponse<Vec<TemplateResources>>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/resources",
            &[("w_id", options.w_id.as_str())],
            "GetWorkspaceResources",
        )?;
        self.base().send_json(&request).await
    }

    /// URLs of the Terraform state files of each template.
    pub async fn get_workspace_state(
        &self,
        options: &GetWorkspaceStateOptions,
    ) -> Result<DetailedResponse<StateStoreResponseList>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/state_stores",
            &[("w_id", options.w_id.as_str())],
            "GetWorkspaceState",
        )?;
        self.base().send_json(&request).await
    }

    /// Raw Terraform state of one template.
    pub async fn get_workspace_template_state(
        &self,
        options: &GetWorkspaceTemplateStateOptions,
    ) -> Result<DetailedResponse<Value>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("t_id", &options.t_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/runtime_data/{t_id}/state_store",
            &[("w_id", options.w_id.as_str()), ("t_id", options.t_id.as_str())],
            "GetWorkspaceTemplateState",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_activity_logs(
        &self,
        options: &GetWorkspaceActivityLogsOptions,
    ) -> Result<DetailedResponse<WorkspaceActivityLogs>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("activity_id", &options.activity_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/actions/{activity_id}/logs",
            &[("w_id", options.w_id.as_str()), ("activity_id", options.activity_id.as_str())],
            "GetWorkspaceActivityLogs",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn get_workspace_log_urls(
        &self,
        options: &GetWorkspaceLogUrlsOptions,
    ) -> Result<DetailedResponse<LogStoreResponseList>> {
        require_non_empty("w_id", &options.w_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/log_stores",
            &[("w_id", options.w_id.as_str())],
            "GetWorkspaceLogUrls",
        )?;
        self.base().send_json(&request).await
    }

    /// Latest Terraform log of a template, as plain text.
    pub async fn get_template_logs(
        &self,
        options: &GetTemplateLogsOptions,
    ) -> Result<DetailedResponse<String>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("t_id", &options.t_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/runtime_data/{t_id}/log_store",
            &[("w_id", options.w_id.as_str()), ("t_id", options.t_id.as_str())],
            "GetTemplateLogs",
        )?;
        let request = log_filters(
            request,
            options.log_tf_cmd,
            options.log_tf_prefix,
            options.log_tf_null_resource,
            options.log_tf_ansible,
        );
        self.base().send_text(&request).await
    }

    /// Terraform log of a template for one activity, as plain text.
    pub async fn get_template_activity_log(
        &self,
        options: &GetTemplateActivityLogOptions,
    ) -> Result<DetailedResponse<String>> {
        require_non_empty("w_id", &options.w_id)?;
        require_non_empty("t_id", &options.t_id)?;
        require_non_empty("activity_id", &options.activity_id)?;

        let request = self.prepare(
            Method::GET,
            "/v1/workspaces/{w_id}/runtime_data/{t_id}/log_store/actions/{activity_id}",
            &[
                ("w_id", options.w_id.as_str()),
                ("t_id", options.t_id.as_str()),
                ("activity_id", options.activity_id.as_str()),
            ],
            "GetTemplateActivityLog",
        )?;
        let request = log_filters(
            request,
            options.log_tf_cmd,
            options.log_tf_prefix,
            options.log_tf_null_resource,
            options.log_tf_ansible,
        );
        self.base().send_text(&request).await
    }
}

fn log_filters(
    request: ServiceRequest,
    cmd: Option<bool>,
    prefix: Option<bool>,
    null_resource: Option<bool>,
    ansible: Option<bool>,
) -> ServiceRequest {
    request
        .header("Accept", "text/plain")
        .query_opt("log_tf_cmd", cmd)
        .query_opt("log_tf_prefix", prefix)
        .query_opt("log_tf_null_resource", null_resource)
        .query_opt("log_tf_ansible", ansible)
}
