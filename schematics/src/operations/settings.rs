//! Key management settings for encrypting workspace data.

use crate::models::{KmsDiscovery, KmsSettings, KmsSettingsPrimaryCrk, KmsSettingsSecondaryCrk};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct GetKmsSettingsOptions {
    pub location: String,
}

impl GetKmsSettingsOptions {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateKmsSettingsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_crk: Option<KmsSettingsPrimaryCrk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_crk: Option<KmsSettingsSecondaryCrk>,
}

#[derive(Debug, Clone, Default)]
pub struct ListKmsOptions {
    /// `byok` or `kyok`.
    pub encryption_scheme: String,
    pub location: String,
    pub resource_group: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

impl ListKmsOptions {
    pub fn new(encryption_scheme: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            encryption_scheme: encryption_scheme.into(),
            location: location.into(),
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn get_kms_settings(
        &self,
        options: &GetKmsSettingsOptions,
    ) -> Result<DetailedResponse<KmsSettings>> {
        require_non_empty("location", &options.location)?;

        let request = self
            .prepare(Method::GET, "/v2/settings/kms", &[], "GetKmsSettings")?
            .query("location", &options.location);
        self.base().send_json(&request).await
    }

    pub async fn update_kms_settings(
        &self,
        options: &UpdateKmsSettingsOptions,
    ) -> Result<DetailedResponse<KmsSettings>> {
        let request = self
            .prepare(Method::PUT, "/v2/settings/kms", &[], "UpdateKmsSettings")?
            .json(options)?;
        self.base().send_json(&request).await
    }

    /// Key Protect and Hyper Protect instances usable from `location`.
    pub async fn list_kms(
        &self,
        options: &ListKmsOptions,
    ) -> Result<DetailedResponse<KmsDiscovery>> {
        require_non_empty("encryption_scheme", &options.encryption_scheme)?;
        require_non_empty("location", &options.location)?;

        let request = self
            .prepare(Method::GET, "/v2/settings/kms_instances", &[], "ListKms")?
            .query("encryption_scheme", &options.encryption_scheme)
            .query("location", &options.location)
            .query_opt("resource_group", options.resource_group.as_deref())
            .query_opt("limit", options.limit)
            .query_opt("sort", options.sort.as_deref());
        self.base().send_json(&request).await
    }
}
