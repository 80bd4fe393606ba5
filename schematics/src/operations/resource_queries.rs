//! Resource queries: saved filters that resolve to virtual server instances.

use crate::models::{
    ResourceQuery, ResourceQueryRecord, ResourceQueryRecordList, ResourceQueryResponseRecord,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListResourceQueryOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateResourceQueryOptions {
    /// Only `vsi` is supported.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<ResourceQuery>>,
}

#[derive(Debug, Clone, Default)]
pub struct GetResourcesQueryOptions {
    pub query_id: String,
}

impl GetResourcesQueryOptions {
    pub fn new(query_id: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaceResourcesQueryOptions {
    #[serde(skip)]
    pub query_id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<ResourceQuery>>,
}

impl ReplaceResourcesQueryOptions {
    pub fn new(query_id: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteResourceQueryOptions {
    pub query_id: String,
}

impl ExecuteResourceQueryOptions {
    pub fn new(query_id: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteResourcesQueryOptions {
    pub query_id: String,
    pub force: Option<bool>,
    pub propagate: Option<bool>,
}

impl DeleteResourcesQueryOptions {
    pub fn new(query_id: impl Into<String>) -> Self {
        Self {
            query_id: query_id.into(),
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn list_resource_query(
        &self,
        options: &ListResourceQueryOptions,
    ) -> Result<DetailedResponse<ResourceQueryRecordList>> {
        let request = self
            .prepare(Method::GET, "/v2/resources_query", &[], "ListResourceQuery")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("sort", options.sort.as_deref())
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn create_resource_query(
        &self,
        options: &CreateResourceQueryOptions,
    ) -> Result<DetailedResponse<ResourceQueryRecord>> {
        let request = self
            .prepare(Method::POST, "/v2/resources_query", &[], "CreateResourceQuery")?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_resources_query(
        &self,
        options: &GetResourcesQueryOptions,
    ) -> Result<DetailedResponse<ResourceQueryRecord>> {
        require_non_empty("query_id", &options.query_id)?;

        let request = self.prepare(
            Method::GET,
            "/v2/resources_query/{query_id}",
            &[("query_id", options.query_id.as_str())],
            "GetResourcesQuery",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn replace_resources_query(
        &self,
        options: &ReplaceResourcesQueryOptions,
    ) -> Result<DetailedResponse<ResourceQueryRecord>> {
        require_non_empty("query_id", &options.query_id)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v2/resources_query/{query_id}",
                &[("query_id", options.query_id.as_str())],
                "ReplaceResourcesQuery",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Run the query and return the matching resources.
    pub async fn execute_resource_query(
        &self,
        options: &ExecuteResourceQueryOptions,
    ) -> Result<DetailedResponse<ResourceQueryResponseRecord>> {
        require_non_empty("query_id", &options.query_id)?;

        let request = self.prepare(
            Method::POST,
            "/v2/resources_query/{query_id}",
            &[("query_id", options.query_id.as_str())],
            "ExecuteResourceQuery",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn delete_resources_query(
        &self,
        options: &DeleteResourcesQueryOptions,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty("query_id", &options.query_id)?;

        let request = self
            .prepare(
                Method::DELETE,
                "/v2/resources_query/{query_id}",
                &[("query_id", options.query_id.as_str())],
                "DeleteResourcesQuery",
            )?
            .header_opt("force", options.force)
            .header_opt("propagate", options.propagate);
        self.base().send_empty(&request).await
    }
}
