use serde::{Deserialize, Serialize};

/// Customer-managed encryption keys the service uses in a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KmsSettings {
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KmsSettingsPrimaryCrk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_private_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_crn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KmsSettingsSecondaryCrk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_private_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_crn: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KmsDiscovery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_instances: Option<Vec<KmsInstances>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KmsInstances {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_private_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_public_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<KmsInstancesKeysItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KmsInstancesKeysItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
