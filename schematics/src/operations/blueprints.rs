//! Blueprints: stacks of templates wired together through inputs and outputs.

use crate::models::{
    Blueprint, BlueprintConfigItem, BlueprintFlow, BlueprintList,
    BlueprintTemplateRepoTarUploadResponse, ExternalSource, UserState, VariableData,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{CoreError, DetailedResponse, FilePart, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListBlueprintOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBlueprintOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ExternalSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Vec<BlueprintConfigItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<BlueprintFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<UserState>,
}

#[derive(Debug, Clone, Default)]
pub struct GetBlueprintOptions {
    pub blueprint_id: String,
    pub profile: Option<String>,
}

impl GetBlueprintOptions {
    pub fn new(blueprint_id: impl Into<String>) -> Self {
        Self {
            blueprint_id: blueprint_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaceBlueprintOptions {
    #[serde(skip)]
    pub blueprint_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ExternalSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Vec<BlueprintConfigItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<BlueprintFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<UserState>,
    #[serde(skip)]
    pub profile: Option<String>,
}

impl ReplaceBlueprintOptions {
    pub fn new(blueprint_id: impl Into<String>) -> Self {
        Self {
            blueprint_id: blueprint_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteBlueprintOptions {
    pub blueprint_id: String,
    pub profile: Option<String>,
    /// Also destroy the resources the blueprint provisioned.
    pub destroy: Option<bool>,
}

impl DeleteBlueprintOptions {
    pub fn new(blueprint_id: impl Into<String>) -> Self {
        Self {
            blueprint_id: blueprint_id.into(),
            ..Default::default()
        }
    }
}

/// File name sent with a blueprint archive when the caller gives none.
pub const BLUEPRINT_TAR_FILE_NAME: &str = "blueprint.tar";

#[derive(Debug, Clone, Default)]
pub struct UploadTemplateTarBlueprintOptions {
    pub blueprint_id: String,
    pub file: Vec<u8>,
    pub file_content_type: Option<String>,
    /// Multipart file name; defaults to [`BLUEPRINT_TAR_FILE_NAME`].
    pub file_name: Option<String>,
    pub source: Option<String>,
}

impl UploadTemplateTarBlueprintOptions {
    pub fn new(blueprint_id: impl Into<String>, file: impl Into<Vec<u8>>) -> Self {
        Self {
            blueprint_id: blueprint_id.into(),
            file: file.into(),
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn list_blueprint(
        &self,
        options: &ListBlueprintOptions,
    ) -> Result<DetailedResponse<BlueprintList>> {
        let request = self
            .prepare(Method::GET, "/v2/blueprints", &[], "ListBlueprint")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit);
        self.base().send_json(&request).await
    }

    pub async fn create_blueprint(
        &self,
        options: &CreateBlueprintOptions,
    ) -> Result<DetailedResponse<Blueprint>> {
        let request = self
            .prepare(Method::POST, "/v2/blueprints", &[], "CreateBlueprint")?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_blueprint(
        &self,
        options: &GetBlueprintOptions,
    ) -> Result<DetailedResponse<Blueprint>> {
        require_non_empty("blueprint_id", &options.blueprint_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/blueprints/{blueprint_id}",
                &[("blueprint_id", options.blueprint_id.as_str())],
                "GetBlueprint",
            )?
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn replace_blueprint(
        &self,
        options: &ReplaceBlueprintOptions,
    ) -> Result<DetailedResponse<Blueprint>> {
        require_non_empty("blueprint_id", &options.blueprint_id)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v2/blueprints/{blueprint_id}",
                &[("blueprint_id", options.blueprint_id.as_str())],
                "ReplaceBlueprint",
            )?
            .query_opt("profile", options.profile.as_deref())
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn delete_blueprint(
        &self,
        options: &DeleteBlueprintOptions,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty("blueprint_id", &options.blueprint_id)?;

        let request = self
            .prepare(
                Method::DELETE,
                "/v2/blueprints/{blueprint_id}",
                &[("blueprint_id", options.blueprint_id.as_str())],
                "DeleteBlueprint",
            )?
            .query_opt("profile", options.profile.as_deref())
            .query_opt("destroy", options.destroy);
        self.base().send_empty(&request).await
    }

    pub async fn upload_template_tar_blueprint(
        &self,
        options: &UploadTemplateTarBlueprintOptions,
    ) -> Result<DetailedResponse<BlueprintTemplateRepoTarUploadResponse>> {
        require_non_empty("blueprint_id", &options.blueprint_id)?;
        if options.file.is_empty() {
            return Err(CoreError::Validation("file must not be empty".to_string()));
        }

        let part = FilePart::new("file", options.file.clone())
            .with_file_name(options.file_name.as_deref().unwrap_or(BLUEPRINT_TAR_FILE_NAME))
            .with_content_type(options.file_content_type.clone());
        let request = self
            .prepare(
                Method::PUT,
                "/v2/blueprints/{blueprint_id}/template_repo_upload",
                &[("blueprint_id", options.blueprint_id.as_str())],
                "UploadTemplateTarBlueprint",
            )?
            .query_opt("source", options.source.as_deref())
            .multipart(vec![part]);
        self.base().send_json(&request).await
    }
}
