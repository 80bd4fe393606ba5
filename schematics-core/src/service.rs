//! Shared HTTP plumbing for generated service clients.
//!
//! [`BaseService`] owns the connection pool, the service URL, the
//! authenticator and the retry policy. Service clients describe a call as a
//! [`ServiceRequest`] and hand it to one of the `send_*` methods, which
//! authenticate, execute, retry and decode it.

use crate::authenticator::Authenticator;
use crate::credentials::{is_truthy, ServiceProperties};
use crate::error::{extract_error_message, CoreError, Result};
use crate::request::{build_url, RequestBody, ServiceRequest};
use crate::response::DetailedResponse;
use crate::retry::{parse_retry_after, RetryPolicy};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub fn default_user_agent() -> String {
    format!("schematics-rust-sdk/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Clone)]
pub struct BaseService {
    client: Client,
    service_url: String,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HeaderMap,
    user_agent: String,
    retry_policy: Option<RetryPolicy>,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl BaseService {
    pub fn new(service_url: &str, authenticator: Arc<dyn Authenticator>) -> Result<Self> {
        let client = build_client(DEFAULT_TIMEOUT, false)?;
        let mut service = Self {
            client,
            service_url: String::new(),
            authenticator,
            default_headers: HeaderMap::new(),
            user_agent: default_user_agent(),
            retry_policy: None,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        };
        service.set_service_url(service_url)?;
        Ok(service)
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Point the client at a different endpoint. A trailing `/` is dropped.
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(CoreError::Config("service URL must not be empty".to_string()));
        }
        url::Url::parse(trimmed)?;
        self.service_url = trimmed.to_string();
        Ok(())
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    pub fn set_authenticator(&mut self, authenticator: Arc<dyn Authenticator>) {
        self.authenticator = authenticator;
    }

    /// Headers added to every request before the per-operation ones.
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.default_headers = headers;
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    pub fn enable_retries(&mut self, max_retries: u32, max_interval: Duration) {
        self.retry_policy = Some(RetryPolicy::new(max_retries, max_interval));
    }

    pub fn disable_retries(&mut self) {
        self.retry_policy = None;
    }

    pub fn retry_policy(&self) -> Option<RetryPolicy> {
        self.retry_policy
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.client = build_client(timeout, self.accept_invalid_certs)?;
        self.timeout = timeout;
        Ok(())
    }

    /// Accept any TLS certificate. Only meant for test and private endpoints.
    pub fn disable_ssl_verification(&mut self) -> Result<()> {
        warn!(url = %self.service_url, "TLS certificate verification disabled");
        self.client = build_client(self.timeout, true)?;
        self.accept_invalid_certs = true;
        Ok(())
    }

    /// Apply `URL`, `DISABLE_SSL`, `ENABLE_RETRIES`, `MAX_RETRIES` and
    /// `RETRY_INTERVAL` (seconds) from discovered service properties.
    pub fn configure_service(&mut self, props: &ServiceProperties) -> Result<()> {
        if let Some(url) = props.get("URL") {
            self.set_service_url(url)?;
        }
        if is_truthy(props.get("DISABLE_SSL")) {
            self.disable_ssl_verification()?;
        }
        if is_truthy(props.get("ENABLE_RETRIES")) {
            let max_retries = props
                .get("MAX_RETRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
            let interval = props
                .get("RETRY_INTERVAL")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::ZERO);
            self.enable_retries(max_retries, interval);
        }
        Ok(())
    }

    /// Start a request against `path_template` with its path parameters filled in.
    pub fn request(
        &self,
        method: Method,
        path_template: &str,
        path_params: &[(&str, &str)],
    ) -> Result<ServiceRequest> {
        let url = build_url(&self.service_url, path_template, path_params)?;
        Ok(ServiceRequest::new(method, url))
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: &ServiceRequest,
    ) -> Result<DetailedResponse<T>> {
        let response = self.execute(request).await?;
        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let result = serde_json::from_slice(&bytes).map_err(|e| {
            CoreError::Deserialization(format!(
                "{} {}: {e}",
                request.method(),
                request.url().path()
            ))
        })?;
        Ok(DetailedResponse::new(status_code, headers, result))
    }

    pub async fn send_text(&self, request: &ServiceRequest) -> Result<DetailedResponse<String>> {
        let response = self.execute(request).await?;
        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let text = response.text().await?;
        Ok(DetailedResponse::new(status_code, headers, text))
    }

    /// For operations that answer with no body, typically 204.
    pub async fn send_empty(&self, request: &ServiceRequest) -> Result<DetailedResponse<()>> {
        let response = self.execute(request).await?;
        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        Ok(DetailedResponse::new(status_code, headers, ()))
    }

    async fn execute(&self, request: &ServiceRequest) -> Result<Response> {
        let mut attempt: u32 = 0;

        loop {
            let outgoing = self.build(request).await?;
            let started = Instant::now();
            let policy = self.retry_policy.filter(|p| attempt < p.max_retries);

            match self.client.execute(outgoing).await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    debug!(
                        method = %request.method(),
                        url = %request.url(),
                        status,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Service request completed"
                    );

                    if let Some(policy) = policy.filter(|_| RetryPolicy::should_retry_status(status))
                    {
                        let delay = policy.backoff(attempt, parse_retry_after(response.headers()));
                        warn!(
                            url = %request.url(),
                            status,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    if response.status().is_success() {
                        return Ok(response);
                    }
                    return Err(service_error(response).await);
                }
                Err(err) => {
                    if let Some(policy) = policy.filter(|_| is_transient(&err)) {
                        let delay = policy.backoff(attempt, None);
                        warn!(
                            url = %request.url(),
                            error = %err,
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request after transport error"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(CoreError::Transport(err));
                }
            }
        }
    }

    /// Assemble a fresh `reqwest::Request` for one attempt.
    async fn build(&self, request: &ServiceRequest) -> Result<reqwest::Request> {
        let mut headers = self.default_headers.clone();
        headers.insert(USER_AGENT, header_value(&self.user_agent)?);

        if !request.has_header(AUTHORIZATION.as_str()) {
            if let Some(auth) = self.authenticator.authorization().await? {
                headers.insert(AUTHORIZATION, header_value(&auth)?);
            }
        }

        for (name, value) in request.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CoreError::Validation(format!("invalid header name '{name}': {e}")))?;
            headers.insert(name, header_value(value)?);
        }

        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(headers);

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }

        builder = match request.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    let mut file = Part::bytes(part.data.clone());
                    if let Some(name) = &part.file_name {
                        file = file.file_name(name.clone());
                    }
                    let content_type = part
                        .content_type
                        .as_deref()
                        .unwrap_or("application/octet-stream");
                    file = file.mime_str(content_type)?;
                    form = form.part(part.field.clone(), file);
                }
                builder.multipart(form)
            }
        };

        Ok(builder.build()?)
    }
}

impl fmt::Debug for BaseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseService")
            .field("service_url", &self.service_url)
            .field("authenticator", &self.authenticator)
            .field("retry_policy", &self.retry_policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn build_client(timeout: Duration, accept_invalid_certs: bool) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .map_err(|e| CoreError::Config(format!("Failed to create HTTP client: {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| CoreError::Validation(format!("invalid header value: {e}")))
}

/// Connection refused, timed out, or dropped before a response arrived.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout() || err.is_request()
}

async fn service_error(response: Response) -> CoreError {
    let status = response.status();
    let body: Option<Value> = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice(&bytes).ok(),
        Err(_) => None,
    };
    let message = body
        .as_ref()
        .and_then(extract_error_message)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Unknown error".to_string());

    debug!(status = status.as_u16(), message = %message, "Service returned an error");
    CoreError::Service {
        status: status.as_u16(),
        message,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authenticator::NoAuthAuthenticator;

    fn service(url: &str) -> Result<BaseService> {
        BaseService::new(url, Arc::new(NoAuthAuthenticator))
    }

    #[test]
    fn test_service_url_validation() {
        let svc = service("https://schematics.cloud.ibm.com/").unwrap();
        assert_eq!(svc.service_url(), "https://schematics.cloud.ibm.com");

        assert!(service("").is_err());
        assert!(service("not a url").is_err());
    }

    #[test]
    fn test_configure_service_from_properties() {
        let mut svc = service("https://schematics.cloud.ibm.com").unwrap();
        let mut props = ServiceProperties::new();
        props.insert("URL".into(), "https://eu-de.schematics.cloud.ibm.com".into());
        props.insert("ENABLE_RETRIES".into(), "true".into());
        props.insert("MAX_RETRIES".into(), "2".into());
        props.insert("RETRY_INTERVAL".into(), "7".into());

        svc.configure_service(&props).unwrap();
        assert_eq!(svc.service_url(), "https://eu-de.schematics.cloud.ibm.com");
        assert_eq!(
            svc.retry_policy(),
            Some(RetryPolicy::new(2, Duration::from_secs(7)))
        );

        svc.disable_retries();
        assert!(svc.retry_policy().is_none());
    }

    #[test]
    fn test_request_builds_url() {
        let svc = service("https://schematics.cloud.ibm.com").unwrap();
        let req = svc
            .request(Method::GET, "/v2/jobs/{job_id}/logs", &[("job_id", "job 1")])
            .unwrap();
        assert_eq!(
            req.url().as_str(),
            "https://schematics.cloud.ibm.com/v2/jobs/job%201/logs"
        );
    }
}
