//! The Schematics v1 service client.
//!
//! [`SchematicsV1`] wraps a [`BaseService`] and adds one method per API
//! operation (see the `operations` modules). Construction is either explicit,
//! with an authenticator in hand, or driven entirely by external
//! configuration:
//!
//! ```rust,no_run
//! # async fn run() -> schematics::Result<()> {
//! use schematics::{SchematicsV1, SchematicsV1Options};
//! use schematics::operations::ListWorkspacesOptions;
//!
//! // Reads SCHEMATICS_APIKEY, SCHEMATICS_URL, ... from ibm-credentials.env or the environment
//! let client = SchematicsV1::new_using_external_config(SchematicsV1Options::default())?;
//! let page = client.list_workspaces(&ListWorkspacesOptions::default()).await?;
//! println!("{} workspaces", page.result.count.unwrap_or(0));
//! # Ok(())
//! # }
//! ```

use reqwest::header::HeaderMap;
use reqwest::Method;
use schematics_core::{
    get_authenticator_from_environment, get_service_properties, Authenticator, BaseService,
    CoreError, Result, ServiceRequest,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_SERVICE_URL: &str = "https://schematics.cloud.ibm.com";
pub const DEFAULT_SERVICE_NAME: &str = "schematics";
const SERVICE_VERSION: &str = "V1";

const REGIONAL_ENDPOINTS: &[(&str, &str)] = &[
    ("us-south", "https://us-south.schematics.cloud.ibm.com"),
    ("us-east", "https://us-east.schematics.cloud.ibm.com"),
    ("eu-gb", "https://eu-gb.schematics.cloud.ibm.com"),
    ("eu-de", "https://eu-de.schematics.cloud.ibm.com"),
    ("ca-tor", "https://ca-tor.schematics.cloud.ibm.com"),
];

/// Endpoint serving `region`, e.g. `eu-de`.
pub fn get_service_url_for_region(region: &str) -> Result<&'static str> {
    REGIONAL_ENDPOINTS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, url)| *url)
        .ok_or_else(|| CoreError::Validation(format!("service URL for region '{region}' not found")))
}

#[derive(Debug, Clone, Default)]
pub struct SchematicsV1Options {
    /// Prefix used for external configuration lookups. Defaults to `schematics`.
    pub service_name: Option<String>,
    pub url: Option<String>,
    pub authenticator: Option<Arc<dyn Authenticator>>,
}

#[derive(Debug, Clone)]
pub struct SchematicsV1 {
    service: BaseService,
}

impl SchematicsV1 {
    /// Build a client from explicit options. An authenticator is required.
    pub fn new(options: SchematicsV1Options) -> Result<Self> {
        let authenticator = options.authenticator.ok_or_else(|| {
            CoreError::Config("an authenticator is required to create the client".to_string())
        })?;
        let url = options.url.as_deref().unwrap_or(DEFAULT_SERVICE_URL);
        let service = BaseService::new(url, authenticator)?;
        Ok(Self { service })
    }

    /// Build a client whose authenticator and settings come from the
    /// credentials file, the environment or `VCAP_SERVICES`.
    ///
    /// An explicit `url` in `options` overrides the configured one.
    pub fn new_using_external_config(options: SchematicsV1Options) -> Result<Self> {
        let service_name = options
            .service_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let authenticator = match options.authenticator {
            Some(auth) => auth,
            None => get_authenticator_from_environment(&service_name)?,
        };

        let mut client = Self::new(SchematicsV1Options {
            service_name: Some(service_name.clone()),
            url: None,
            authenticator: Some(authenticator),
        })?;

        let props = get_service_properties(&service_name)?;
        client.service.configure_service(&props)?;

        if let Some(url) = options.url {
            client.set_service_url(&url)?;
        }

        debug!(service = %service_name, url = %client.service_url(), "Configured Schematics client");
        Ok(client)
    }

    pub fn service_url(&self) -> &str {
        self.service.service_url()
    }

    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        self.service.set_service_url(url)
    }

    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.service.set_default_headers(headers);
    }

    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.service.enable_retries(max_retries, max_interval);
    }

    pub fn disable_retries(&mut self) {
        self.service.disable_retries();
    }

    pub fn disable_ssl_verification(&mut self) -> Result<()> {
        self.service.disable_ssl_verification()
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.service.set_timeout(timeout)
    }

    /// Start a request carrying the SDK analytics header and a JSON `Accept`.
    pub(crate) fn prepare(
        &self,
        method: Method,
        path: &str,
        path_params: &[(&str, &str)],
        operation_id: &str,
    ) -> Result<ServiceRequest> {
        Ok(self
            .service
            .request(method, path, path_params)?
            .header("Accept", "application/json")
            .header("X-IBMCloud-SDK-Analytics", analytics_header(operation_id)))
    }

    pub(crate) fn base(&self) -> &BaseService {
        &self.service
    }
}

fn analytics_header(operation_id: &str) -> String {
    format!(
        "service_name={DEFAULT_SERVICE_NAME};service_version={SERVICE_VERSION};operation_id={operation_id}"
    )
}
