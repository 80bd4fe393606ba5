//! IAM API-key authentication.
//!
//! The API key is exchanged for a short-lived bearer token at the IAM token
//! endpoint. Tokens are cached and shared by every clone of the
//! authenticator; a new one is fetched once 80% of the current token's
//! lifetime has passed.

use crate::authenticator::{validate_credential, AuthType, Authenticator, BasicAuthenticator};
use crate::error::{extract_error_message, CoreError, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";
const REQUEST_TOKEN_PATH: &str = "/identity/token";
const GRANT_TYPE_APIKEY: &str = "urn:ibm:params:oauth:grant-type:apikey";
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body returned by the IAM token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IamTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub expires_in: i64,
    pub expiration: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: i64,
}

impl CachedToken {
    fn from_response(response: &IamTokenResponse) -> Self {
        let refresh_at = response.expiration - (response.expires_in as f64 * 0.2) as i64;
        Self {
            access_token: response.access_token.clone(),
            refresh_at,
        }
    }

    fn needs_refresh(&self) -> bool {
        Utc::now().timestamp() >= self.refresh_at
    }
}

#[derive(Clone)]
pub struct IamAuthenticator {
    apikey: String,
    url: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    scope: Option<String>,
    client: Client,
    cache: Arc<Mutex<Option<CachedToken>>>,
}

impl IamAuthenticator {
    pub fn new(apikey: impl Into<String>) -> Result<Self> {
        Self::builder(apikey).build()
    }

    pub fn builder(apikey: impl Into<String>) -> IamAuthenticatorBuilder {
        IamAuthenticatorBuilder {
            apikey: apikey.into(),
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
            disable_ssl_verification: false,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Exchange the API key for a new token without touching the cache.
    pub async fn request_token(&self) -> Result<IamTokenResponse> {
        let endpoint = format!("{}{}", self.url, REQUEST_TOKEN_PATH);
        debug!(url = %endpoint, "Requesting IAM access token");

        let mut form = vec![
            ("grant_type", GRANT_TYPE_APIKEY),
            ("apikey", self.apikey.as_str()),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = &self.scope {
            form.push(("scope", scope.as_str()));
        }

        let mut request = self
            .client
            .post(&endpoint)
            .header("Accept", "application/json")
            .form(&form);
        if let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) {
            request = request.header(
                "Authorization",
                BasicAuthenticator::header_value(id, secret),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| CoreError::Authentication(format!("IAM token request failed: {e}")))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoreError::Authentication(format!("Failed to read IAM response: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_slice(&bytes)
                .ok()
                .and_then(|body| extract_error_message(&body))
                .unwrap_or_else(|| status.to_string());
            return Err(CoreError::Authentication(format!(
                "IAM token request rejected ({}): {message}",
                status.as_u16()
            )));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| CoreError::Authentication(format!("Malformed IAM token response: {e}")))
    }

    async fn access_token(&self) -> Result<String> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.as_ref().filter(|t| !t.needs_refresh()) {
            return Ok(token.access_token.clone());
        }

        let response = self.request_token().await?;
        let token = CachedToken::from_response(&response);
        info!(expires_in = response.expires_in, "Obtained new IAM access token");
        let access_token = token.access_token.clone();
        *cache = Some(token);
        Ok(access_token)
    }
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("url", &self.url)
            .field("apikey", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .finish()
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Iam
    }

    async fn authorization(&self) -> Result<Option<String>> {
        let token = self.access_token().await?;
        Ok(Some(format!("Bearer {token}")))
    }
}

pub struct IamAuthenticatorBuilder {
    apikey: String,
    url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    scope: Option<String>,
    disable_ssl_verification: bool,
}

impl IamAuthenticatorBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.disable_ssl_verification = disable;
        self
    }

    pub fn build(self) -> Result<IamAuthenticator> {
        validate_credential("apikey", &self.apikey)?;
        if self.client_id.is_some() != self.client_secret.is_some() {
            return Err(CoreError::Config(
                "client_id and client_secret must be supplied together".to_string(),
            ));
        }

        let url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IAM_URL.to_string());
        let url = url.trim_end_matches('/').to_string();
        let url = url
            .strip_suffix(REQUEST_TOKEN_PATH)
            .map(str::to_string)
            .unwrap_or(url);

        let client = Client::builder()
            .timeout(TOKEN_REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(self.disable_ssl_verification)
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to create IAM HTTP client: {e}")))?;

        Ok(IamAuthenticator {
            apikey: self.apikey,
            url,
            client_id: self.client_id,
            client_secret: self.client_secret,
            scope: self.scope,
            client,
            cache: Arc::new(Mutex::new(None)),
        })
    }
}
