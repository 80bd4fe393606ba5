//! Agents: remote workers that run jobs inside a customer network.
//!
//! Two APIs coexist. `/v2/agents` manages agent definitions and their
//! deployment, health check and policy resolution (PRS) jobs, while
//! `/v2/agents_registration` manages the registrations agents perform
//! when they come up.

use crate::models::{
    Agent, AgentData, AgentDataList, AgentDeployJob, AgentHealthJob, AgentInfrastructure,
    AgentKpiData, AgentList, AgentMetadataInfo, AgentPrsJob, AgentUserState, AgentVersions,
    VariableData,
};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result, ServiceRequest};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListAgentDataOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub profile: Option<String>,
    /// `all`, `compatible` or `incompatible`.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAgentDataOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Agent version, see [`SchematicsV1::get_agent_versions`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schematics_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_infrastructure: Option<AgentInfrastructure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_metadata: Option<Vec<AgentMetadataInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<AgentUserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_kpi: Option<AgentKpiData>,
}

#[derive(Debug, Clone, Default)]
pub struct GetAgentDataOptions {
    pub agent_id: String,
    pub profile: Option<String>,
}

impl GetAgentDataOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAgentDataOptions {
    #[serde(skip)]
    pub agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schematics_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_infrastructure: Option<AgentInfrastructure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_metadata: Option<Vec<AgentMetadataInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_inputs: Option<Vec<VariableData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<AgentUserState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_kpi: Option<AgentKpiData>,
}

impl UpdateAgentDataOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteAgentDataOptions {
    pub agent_id: String,
}

impl DeleteAgentDataOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetAgentVersionsOptions {}

#[derive(Debug, Clone, Default)]
pub struct ListAgentOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub profile: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterAgentOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<AgentUserState>,
}

#[derive(Debug, Clone, Default)]
pub struct GetAgentOptions {
    pub agent_id: String,
    pub profile: Option<String>,
}

impl GetAgentOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAgentRegistrationOptions {
    #[serde(skip)]
    pub agent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_state: Option<AgentUserState>,
}

impl UpdateAgentRegistrationOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteAgentOptions {
    pub agent_id: String,
}

impl DeleteAgentOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrsAgentJobOptions {
    pub agent_id: String,
    pub refresh_token: Option<String>,
    /// Run even if a job of the same kind is in progress.
    pub force: Option<bool>,
}

impl PrsAgentJobOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetPrsAgentJobOptions {
    pub agent_id: String,
}

impl GetPrsAgentJobOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HealthCheckAgentJobOptions {
    pub agent_id: String,
    pub refresh_token: Option<String>,
    pub force: Option<bool>,
}

impl HealthCheckAgentJobOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetHealthCheckAgentJobOptions {
    pub agent_id: String,
}

impl GetHealthCheckAgentJobOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeployAgentJobOptions {
    pub agent_id: String,
    pub refresh_token: Option<String>,
    pub force: Option<bool>,
}

impl DeployAgentJobOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetDeployAgentJobOptions {
    pub agent_id: String,
}

impl GetDeployAgentJobOptions {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

impl SchematicsV1 {
    pub async fn list_agent_data(
        &self,
        options: &ListAgentDataOptions,
    ) -> Result<DetailedResponse<AgentDataList>> {
        let request = self
            .prepare(Method::GET, "/v2/agents", &[], "ListAgentData")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("profile", options.profile.as_deref())
            .query_opt("filter", options.filter.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn create_agent_data(
        &self,
        options: &CreateAgentDataOptions,
    ) -> Result<DetailedResponse<AgentData>> {
        let request = self
            .prepare(Method::POST, "/v2/agents", &[], "CreateAgentData")?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_agent_data(
        &self,
        options: &GetAgentDataOptions,
    ) -> Result<DetailedResponse<AgentData>> {
        require_non_empty("agent_id", &options.agent_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/agents/{agent_id}",
                &[("agent_id", options.agent_id.as_str())],
                "GetAgentData",
            )?
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn update_agent_data(
        &self,
        options: &UpdateAgentDataOptions,
    ) -> Result<DetailedResponse<AgentData>> {
        require_non_empty("agent_id", &options.agent_id)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v2/agents/{agent_id}",
                &[("agent_id", options.agent_id.as_str())],
                "UpdateAgentData",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn delete_agent_data(
        &self,
        options: &DeleteAgentDataOptions,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty("agent_id", &options.agent_id)?;

        let request = self.prepare(
            Method::DELETE,
            "/v2/agents/{agent_id}",
            &[("agent_id", options.agent_id.as_str())],
            "DeleteAgentData",
        )?;
        self.base().send_empty(&request).await
    }

    /// Agent versions the service currently accepts.
    pub async fn get_agent_versions(
        &self,
        _options: &GetAgentVersionsOptions,
    ) -> Result<DetailedResponse<AgentVersions>> {
        let request = self.prepare(Method::GET, "/v2/agents/versions", &[], "GetAgentVersions")?;
        self.base().send_json(&request).await
    }

    pub async fn list_agent(
        &self,
        options: &ListAgentOptions,
    ) -> Result<DetailedResponse<AgentList>> {
        let request = self
            .prepare(Method::GET, "/v2/agents_registration", &[], "ListAgent")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("profile", options.profile.as_deref())
            .query_opt("filter", options.filter.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn register_agent(
        &self,
        options: &RegisterAgentOptions,
    ) -> Result<DetailedResponse<Agent>> {
        let request = self
            .prepare(Method::POST, "/v2/agents_registration", &[], "RegisterAgent")?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_agent(&self, options: &GetAgentOptions) -> Result<DetailedResponse<Agent>> {
        require_non_empty("agent_id", &options.agent_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/agents_registration/{agent_id}",
                &[("agent_id", options.agent_id.as_str())],
                "GetAgent",
            )?
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn update_agent_registration(
        &self,
        options: &UpdateAgentRegistrationOptions,
    ) -> Result<DetailedResponse<Agent>> {
        require_non_empty("agent_id", &options.agent_id)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v2/agents_registration/{agent_id}",
                &[("agent_id", options.agent_id.as_str())],
                "UpdateAgentRegistration",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn delete_agent(&self, options: &DeleteAgentOptions) -> Result<DetailedResponse<()>> {
        require_non_empty("agent_id", &options.agent_id)?;

        let request = self.prepare(
            Method::DELETE,
            "/v2/agents_registration/{agent_id}",
            &[("agent_id", options.agent_id.as_str())],
            "DeleteAgent",
        )?;
        self.base().send_empty(&request).await
    }

    /// Start a policy resolution job, which checks that the agent's
    /// assignment policies can be honoured.
    pub async fn prs_agent_job(
        &self,
        options: &PrsAgentJobOptions,
    ) -> Result<DetailedResponse<AgentPrsJob>> {
        let request = self
            .agent_job_request(
                Method::PUT,
                "/v2/agents/{agent_id}/prs",
                &options.agent_id,
                "PrsAgentJob",
            )?
            .header_opt("refresh_token", options.refresh_token.as_deref())
            .query_opt("force", options.force);
        self.base().send_json(&request).await
    }

    pub async fn get_prs_agent_job(
        &self,
        options: &GetPrsAgentJobOptions,
    ) -> Result<DetailedResponse<AgentPrsJob>> {
        let request = self.agent_job_request(
            Method::GET,
            "/v2/agents/{agent_id}/prs",
            &options.agent_id,
            "GetPrsAgentJob",
        )?;
        self.base().send_json(&request).await
    }

    pub async fn health_check_agent_job(
        &self,
        options: &HealthCheckAgentJobOptions,
    ) -> Result<DetailedResponse<AgentHealthJob>> {
        let request = self
            .agent_job_request(
                Method::PUT,
                "/v2/agents/{agent_id}/health",
                &options.agent_id,
                "HealthCheckAgentJob",
            )?
            .header_opt("refresh_token", options.refresh_token.as_deref())
            .query_opt("force", options.force);
        self.base().send_json(&request).await
    }

    pub async fn get_health_check_agent_job(
        &self,
        options: &GetHealthCheckAgentJobOptions,
    ) -> Result<DetailedResponse<AgentHealthJob>> {
        let request = self.agent_job_request(
            Method::GET,
            "/v2/agents/{agent_id}/health",
            &options.agent_id,
            "GetHealthCheckAgentJob",
        )?;
        self.base().send_json(&request).await
    }

    /// Deploy, or redeploy, the agent onto its infrastructure.
    pub async fn deploy_agent_job(
        &self,
        options: &DeployAgentJobOptions,
    ) -> Result<DetailedResponse<AgentDeployJob>> {
        let request = self
            .agent_job_request(
                Method::PUT,
                "/v2/agents/{agent_id}/deploy",
                &options.agent_id,
                "DeployAgentJob",
            )?
            .header_opt("refresh_token", options.refresh_token.as_deref())
            .query_opt("force", options.force);
        self.base().send_json(&request).await
    }

    pub async fn get_deploy_agent_job(
        &self,
        options: &GetDeployAgentJobOptions,
    ) -> Result<DetailedResponse<AgentDeployJob>> {
        let request = self.agent_job_request(
            Method::GET,
            "/v2/agents/{agent_id}/deploy",
            &options.agent_id,
            "GetDeployAgentJob",
        )?;
        self.base().send_json(&request).await
    }

    fn agent_job_request(
        &self,
        method: Method,
        path: &str,
        agent_id: &str,
        operation_id: &str,
    ) -> Result<ServiceRequest> {
        require_non_empty("agent_id", agent_id)?;
        self.prepare(method, path, &[("agent_id", agent_id)], operation_id)
    }
}
