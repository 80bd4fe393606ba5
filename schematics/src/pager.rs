//! Offset/limit pagination over the list operations.
//!
//! List endpoints return one page at a time together with the total number of
//! records. [`collect_all`] keeps requesting pages until that total is reached.
//! A page may hold fewer records than asked for when the service caps the page
//! size, so a short page only ends the walk when no total is reported.

use crate::models::{
    ActionLite, AgentData, InventoryResourceRecord, JobLite, PolicyLite, WorkspaceResponse,
};
use crate::operations::{
    ListActionsOptions, ListAgentDataOptions, ListInventoriesOptions, ListJobsOptions,
    ListPolicyOptions, ListWorkspacesOptions,
};
use crate::service::SchematicsV1;
use schematics_core::{CoreError, Result};
use std::future::Future;
use tracing::debug;

/// Page size used when the caller's options leave `limit` unset.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of records across all pages, when the service reports it.
    pub total_count: Option<i64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: Option<i64>) -> Self {
        Self { items, total_count }
    }
}

/// Call `fetch(offset, limit)` page by page and concatenate the results.
pub async fn collect_all<T, F, Fut>(page_size: i64, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(i64, i64) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    if page_size <= 0 {
        return Err(CoreError::Validation(format!(
            "page size must be positive, got {page_size}"
        )));
    }

    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let page = fetch(offset, page_size).await?;
        let fetched = page.items.len() as i64;
        items.extend(page.items);
        debug!(offset, fetched, total = ?page.total_count, "Fetched page");

        let done = match page.total_count {
            Some(total) => items.len() as i64 >= total,
            None => fetched < page_size,
        };
        if fetched == 0 || done {
            return Ok(items);
        }
        offset += fetched;
    }
}

impl SchematicsV1 {
    /// Every workspace matching `options`; its `offset` is ignored.
    pub async fn list_all_workspaces(
        &self,
        options: &ListWorkspacesOptions,
    ) -> Result<Vec<WorkspaceResponse>> {
        collect_all(options.limit.unwrap_or(DEFAULT_PAGE_SIZE), |offset, limit| {
            let options = ListWorkspacesOptions {
                offset: Some(offset),
                limit: Some(limit),
                ..options.clone()
            };
            async move {
                let page = self.list_workspaces(&options).await?.result;
                Ok(Page::new(page.workspaces.unwrap_or_default(), page.count))
            }
        })
        .await
    }

    pub async fn list_all_actions(&self, options: &ListActionsOptions) -> Result<Vec<ActionLite>> {
        collect_all(options.limit.unwrap_or(DEFAULT_PAGE_SIZE), |offset, limit| {
            let options = ListActionsOptions {
                offset: Some(offset),
                limit: Some(limit),
                ..options.clone()
            };
            async move {
                let page = self.list_actions(&options).await?.result;
                Ok(Page::new(page.actions.unwrap_or_default(), page.total_count))
            }
        })
        .await
    }

    pub async fn list_all_jobs(&self, options: &ListJobsOptions) -> Result<Vec<JobLite>> {
        collect_all(options.limit.unwrap_or(DEFAULT_PAGE_SIZE), |offset, limit| {
            let options = ListJobsOptions {
                offset: Some(offset),
                limit: Some(limit),
                ..options.clone()
            };
            async move {
                let page = self.list_jobs(&options).await?.result;
                Ok(Page::new(page.jobs.unwrap_or_default(), page.total_count))
            }
        })
        .await
    }

    pub async fn list_all_inventories(
        &self,
        options: &ListInventoriesOptions,
    ) -> Result<Vec<InventoryResourceRecord>> {
        collect_all(options.limit.unwrap_or(DEFAULT_PAGE_SIZE), |offset, limit| {
            let options = ListInventoriesOptions {
                offset: Some(offset),
                limit: Some(limit),
                ..options.clone()
            };
            async move {
                let page = self.list_inventories(&options).await?.result;
                Ok(Page::new(page.inventories.unwrap_or_default(), page.total_count))
            }
        })
        .await
    }

    pub async fn list_all_policies(&self, options: &ListPolicyOptions) -> Result<Vec<PolicyLite>> {
        collect_all(options.limit.unwrap_or(DEFAULT_PAGE_SIZE), |offset, limit| {
            let options = ListPolicyOptions {
                offset: Some(offset),
                limit: Some(limit),
                ..options.clone()
            };
            async move {
                let page = self.list_policy(&options).await?.result;
                Ok(Page::new(page.policies.unwrap_or_default(), page.total_count))
            }
        })
        .await
    }

    pub async fn list_all_agent_data(
        &self,
        options: &ListAgentDataOptions,
    ) -> Result<Vec<AgentData>> {
        collect_all(options.limit.unwrap_or(DEFAULT_PAGE_SIZE), |offset, limit| {
            let options = ListAgentDataOptions {
                offset: Some(offset),
                limit: Some(limit),
                ..options.clone()
            };
            async move {
                let page = self.list_agent_data(&options).await?.result;
                Ok(Page::new(page.agents.unwrap_or_default(), page.total_count))
            }
        })
        .await
    }
}
