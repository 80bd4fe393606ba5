//! Inventories: host lists for actions, inline or backed by resource queries.

use crate::models::{InventoryResourceRecord, InventoryResourceRecordList};
use crate::service::SchematicsV1;
use reqwest::Method;
use schematics_core::validation::require_non_empty;
use schematics_core::{DetailedResponse, Result};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct ListInventoriesOptions {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateInventoryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    /// Inline inventory in Ansible INI format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventories_ini: Option<String>,
    /// IDs of resource queries resolving to hosts; exclusive with `inventories_ini`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_queries: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct GetInventoryOptions {
    pub inventory_id: String,
    pub profile: Option<String>,
}

impl GetInventoryOptions {
    pub fn new(inventory_id: impl Into<String>) -> Self {
        Self {
            inventory_id: inventory_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplaceInventoryOptions {
    #[serde(skip)]
    pub inventory_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventories_ini: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_queries: Option<Vec<String>>,
}

impl ReplaceInventoryOptions {
    pub fn new(inventory_id: impl Into<String>) -> Self {
        Self {
            inventory_id: inventory_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInventoryOptions {
    #[serde(skip)]
    pub inventory_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventories_ini: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_queries: Option<Vec<String>>,
}

impl UpdateInventoryOptions {
    pub fn new(inventory_id: impl Into<String>) -> Self {
        Self {
            inventory_id: inventory_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteInventoryOptions {
    pub inventory_id: String,
    pub force: Option<bool>,
    pub propagate: Option<bool>,
}

impl DeleteInventoryOptions {
    pub fn new(inventory_id: impl Into<String>) -> Self {
        Self {
            inventory_id: inventory_id.into(),
            ..Default::default()
        }
    }
}

impl SchematicsV1 {
    pub async fn list_inventories(
        &self,
        options: &ListInventoriesOptions,
    ) -> Result<DetailedResponse<InventoryResourceRecordList>> {
        let request = self
            .prepare(Method::GET, "/v2/inventories", &[], "ListInventories")?
            .query_opt("offset", options.offset)
            .query_opt("limit", options.limit)
            .query_opt("sort", options.sort.as_deref())
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn create_inventory(
        &self,
        options: &CreateInventoryOptions,
    ) -> Result<DetailedResponse<InventoryResourceRecord>> {
        let request = self
            .prepare(Method::POST, "/v2/inventories", &[], "CreateInventory")?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn get_inventory(
        &self,
        options: &GetInventoryOptions,
    ) -> Result<DetailedResponse<InventoryResourceRecord>> {
        require_non_empty("inventory_id", &options.inventory_id)?;

        let request = self
            .prepare(
                Method::GET,
                "/v2/inventories/{inventory_id}",
                &[("inventory_id", options.inventory_id.as_str())],
                "GetInventory",
            )?
            .query_opt("profile", options.profile.as_deref());
        self.base().send_json(&request).await
    }

    pub async fn replace_inventory(
        &self,
        options: &ReplaceInventoryOptions,
    ) -> Result<DetailedResponse<InventoryResourceRecord>> {
        require_non_empty("inventory_id", &options.inventory_id)?;

        let request = self
            .prepare(
                Method::PUT,
                "/v2/inventories/{inventory_id}",
                &[("inventory_id", options.inventory_id.as_str())],
                "ReplaceInventory",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn update_inventory(
        &self,
        options: &UpdateInventoryOptions,
    ) -> Result<DetailedResponse<InventoryResourceRecord>> {
        require_non_empty("inventory_id", &options.inventory_id)?;

        let request = self
            .prepare(
                Method::PATCH,
                "/v2/inventories/{inventory_id}",
                &[("inventory_id", options.inventory_id.as_str())],
                "UpdateInventory",
            )?
            .json(options)?;
        self.base().send_json(&request).await
    }

    pub async fn delete_inventory(
        &self,
        options: &DeleteInventoryOptions,
    ) -> Result<DetailedResponse<()>> {
        require_non_empty("inventory_id", &options.inventory_id)?;

        let request = self
            .prepare(
                Method::DELETE,
                "/v2/inventories/{inventory_id}",
                &[("inventory_id", options.inventory_id.as_str())],
                "DeleteInventory",
            )?
            .header_opt("force", options.force)
            .header_opt("propagate", options.propagate);
        self.base().send_empty(&request).await
    }
}
