//! Service metadata: API version, locations, resource groups and template
//! metadata processing.

use crate::models::{
    ExternalSource, ResourceGroupResponse, SchematicsLocations, SchematicsLocationsList,
    TemplateMetaDataResponse, VersionResponse,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct GetSchematicsVersionOptions {}

#[derive(Debug, Clone, Default)]
pub struct ListLocationsOptions {}

#[derive(Debug, Clone, Default)]
pub struct ListResourceGroupOptions {}

#[derive(Debug, Clone, Default)]
pub struct ListSchematicsLocationOptions {}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessTemplateMetaDataOptions {
    pub template_type: String,
    pub source: ExternalSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip)]
    pub x_github_token: Option<String>,
}

impl ProcessTemplateMetaDataOptions {
    pub fn new(template_type: impl Into<String>, source: ExternalSource) -> Self {
        Self {
            template_type: template_type.into(),
            source,
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn get_schematics_version(
        &self,
        _options: &GetSchematicsVersionOptions,
    ) -> Result<DetailedResponse<VersionResponse>> {
        let request = self.prepare(Method::GET, "/v1/version", &[], "GetSchematicsVersion")?;
        self.base().send_json(&request).await
    }

    /// Locations where Schematics can run and store data.
    pub async fn list_locations(
        &self,
        _options: &ListLocationsOptions,
    ) -> Result<DetailedResponse<SchematicsLocationsList>> {
        let request = self.prepare(Method::GET, "/v2/locations", &[], "ListLocations")?;
        self.base().send_json(&request).await
    }

    pub async fn list_resource_group(
        &self,
        _options: &ListResourceGroupOptions,
    ) -> Result<DetailedResponse<Vec<ResourceGroupResponse>>> {
        let request = self.prepare(Method::GET, "/v1/resource_groups", &[], "ListResourceGroup")?;
        self.base().send_json(&request).await
    }

    /// Legacy location listing, superseded by [`SchematicsV1::list_locations`].
    pub async fn list_schematics_location(
        &self,
        _options: &ListSchematicsLocationOptions,
    ) -> Result<DetailedResponse<Vec<SchematicsLocations>>> {
        let request = self.prepare(Method::GET, "/v1/locations", &[], "ListSchematicsLocation")?;
        self.base().send_json(&request).await
    }

    /// Parse a template and return the variables it declares.
    pub async fn process_template_meta_data(
        &self,
        options: &ProcessTemplateMetaDataOptions,
    ) -> Result<DetailedResponse<TemplateMetaDataResponse>> {
        require_non_empty("template_type", &options.template_type)?;
        require_non_empty("source.source_type", &options.source.source_type)?;

        let request = self
            .prepare(
                Method::POST,
                "/v2/template_metadata_processor",
                &[],
                "ProcessTemplateMetaData",
            )?
            .header_opt("X-Github-token", options.x_github_token.as_deref())
            .json(options)?;
        self.base().send_json(&request).await
    }
}
