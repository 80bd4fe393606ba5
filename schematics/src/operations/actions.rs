//! Ansible actions: playbook sources, inventories and credentials.

use crate::models::{
    Action, ActionList, BastionResourceDefinition, CredentialVariableData, ExternalSource,
    TemplateRepoTarUploadResponse, UserState, VariableData,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{CoreError, DetailedResponse, FilePart, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListActionsOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    /// Field to sort by, prefixed with `-` for descending order.
    pub sort: Option<String>,
    /// `ids` or `summary`.
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateActionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_connection_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_connection_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<UserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_readme_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ExternalSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<CredentialVariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion: Option<BastionResourceDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_credential: Option<CredentialVariableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets_ini: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip)]
    pub x_github_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GetActionOptions {
    pub action_id: String,
    pub profile: Option<String>,
}

impl GetActionOptions {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateActionOptions {
    #[serde(skip)]
    pub action_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_connection_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_connection_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<UserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_readme_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ExternalSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_parameter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<CredentialVariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion: Option<BastionResourceDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bastion_credential: Option<CredentialVariableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets_ini: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip)]
    pub x_github_token: Option<String>,
}

impl UpdateActionOptions {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteActionOptions {
    pub action_id: String,
    pub force: Option<bool>,
    pub propagate: Option<bool>,
}

impl DeleteActionOptions {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            ..Default::default()
        }
    }
}

/// File name sent with a playbook archive when the caller gives none.
pub const PLAYBOOK_TAR_FILE_NAME: &str = "playbook.tar";

#[derive(Debug, Clone, Default)]
pub struct UploadTemplateTarActionOptions {
    pub action_id: String,
    pub file: Vec<u8>,
    pub file_content_type: Option<String>,
    /// Multipart file name; defaults to [`PLAYBOOK_TAR_FILE_NAME`].
    pub file_name: Option<String>,
}

impl UploadTemplateTarActionOptions {
    pub fn new(action_id: impl Into<String>, file: impl Into<Vec<u8>>) -> Self {
        Self {
            action_id: action_id.into(),
            file: file.into(),
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn list_actions(
        &self,
        options: &ListActionsOptions,
    ) -> Result<DetailedResponse<ActionList>> {
        let request = self
            .prepare(Method::GET, "/v2/actions", &[], "ListActions")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("sort", options.sort.as_deref())
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn create_action(
        &self,
        options: &CreateActionOptions,
    ) -> Result<DetailedResponse<Action>> {
        let request = self
            .prepare(Method::POST, "/v2/actions", &[], "CreateAction")?
            .header_opt("X-Github-token", options.x_github_token.as_deref())
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_action(&self, options: &GetActionOptions) -> Result<DetailedResponse<Action>> {
        require_non_empty("action_id", &options.action_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/actions/{action_id}",
                &[("action_id", options.action_id.as_str())],
                "GetAction",
            )?
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn update_action(
        &self,
        options: &UpdateActionOptions,
    ) -> Result<DetailedResponse<Action>> {
        require_non_empty("action_id", &options.action_id)?;

        let request = self
            .prepare(
                Method::PATCH,
                "/v2/actions/{action_id}",
                &[("action_id", options.action_id.as_str())],
                "UpdateAction",
            )?
            .header_opt("X-Github-token", options.x_github_token.as_deref())
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Delete an action. `force` skips the check for running jobs and
    /// `propagate` also deletes the action's jobs.
    pub async fn delete_action(
        &self,
        options: &DeleteActionOptions,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty("action_id", &options.action_id)?;

        let request = self
            .prepare(
                Method::DELETE,
                "/v2/actions/{action_id}",
                &[("action_id", options.action_id.as_str())],
                "DeleteAction",
            )?
            .header_opt("force", options.force)
            .header_opt("propagate", options.propagate);
        self.base().send_empty(&request).await
    }

    pub async fn upload_template_tar_action(
        &self,
        options: &UploadTemplateTarActionOptions,
    ) -> Result<DetailedResponse<TemplateRepoTarUploadResponse>> {
        require_non_empty("action_id", &options.action_id)?;
        if options.file.is_empty() {
            return Err(CoreError::Validation("file must not be empty".to_string()));
        }

        let part = FilePart::new("file", options.file.clone())
            .with_file_name(options.file_name.as_deref().unwrap_or(PLAYBOOK_TAR_FILE_NAME))
            .with_content_type(options.file_content_type.clone());
        let request = self
            .prepare(
                Method::PUT,
                "/v2/actions/{action_id}/template_repo_upload",
                &[("action_id", options.action_id.as_str())],
                "UploadTemplateTarAction",
            )?
            .multipart(vec![part]);
        self.base().send_json(&request).await
    }
}
