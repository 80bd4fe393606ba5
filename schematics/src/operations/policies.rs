//! Policies, currently used to assign workspaces and actions to agents.

use crate::models::{Policy, PolicyList, PolicyObjects, PolicyParameter, ScopedResource, UserState};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListPolicyOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePolicyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<UserState>,
    /// `agent_assignment_policy` is the only kind the service knows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PolicyObjects>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<PolicyParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoped_resources: Option<Vec<ScopedResource>>,
}

#[derive(Debug, Clone, Default)]
pub struct GetPolicyOptions {
    pub policy_id: String,
    pub profile: Option<String>,
}

impl GetPolicyOptions {
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePolicyOptions {
    #[serde(skip)]
    pub policy_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<UserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PolicyObjects>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<PolicyParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoped_resources: Option<Vec<ScopedResource>>,
}

impl UpdatePolicyOptions {
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeletePolicyOptions {
    pub policy_id: String,
}

impl DeletePolicyOptions {
    pub fn new(policy_id: impl Into<String>) -> Self {
        Self {
            policy_id: policy_id.into(),
        }
    }
}

impl SchematicsV1 {
    pub async fn list_policy(
        &self,
        options: &ListPolicyOptions,
    ) -> Result<DetailedResponse<PolicyList>> {
        let request = self
            .prepare(Method::GET, "/v2/settings/policies", &[], "ListPolicy")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn create_policy(
        &self,
        options: &CreatePolicyOptions,
    ) -> Result<DetailedResponse<Policy>> {
        let request = self
            .prepare(Method::POST, "/v2/settings/policies", &[], "CreatePolicy")?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_policy(&self, options: &GetPolicyOptions) -> Result<DetailedResponse<Policy>> {
        require_non_empty("policy_id", &options.policy_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/settings/policies/{policy_id}",
                &[("policy_id", options.policy_id.as_str())],
                "GetPolicy",
            )?
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn update_policy(
        &self,
        options: &UpdatePolicyOptions,
    ) -> Result<DetailedResponse<Policy>> {
        require_non_empty("policy_id", &options.policy_id)?;

        let request = self
            .prepare(
                Method::PATCH,
                "/v2/settings/policies/{policy_id}",
                &[("policy_id", options.policy_id.as_str())],
                "UpdatePolicy",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn delete_policy(
        &self,
        options: &DeletePolicyOptions,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty("policy_id", &options.policy_id)?;

        let request = self.prepare(
            Method::DELETE,
            "/v2/settings/policies/{policy_id}",
            &[("policy_id", options.policy_id.as_str())],
            "DeletePolicy",
        )?;
        self.base().send_empty(&request).await
    }
}
