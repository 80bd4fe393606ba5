//! Request authentication.
//!
//! An [`Authenticator`] produces the `Authorization` header for each outgoing
//! request. The static variants live here; the token-exchanging IAM variant
//! lives in [`crate::iam`].

use crate::error::{CoreError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    NoAuth,
    BearerToken,
    Basic,
    Iam,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::NoAuth => "noauth",
            AuthType::BearerToken => "bearertoken",
            AuthType::Basic => "basic",
            AuthType::Iam => "iam",
        }
    }

    /// Case-insensitive parse of the `AUTH_TYPE` credential property.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "noauth" | "none" => Some(AuthType::NoAuth),
            "bearertoken" | "bearer" => Some(AuthType::BearerToken),
            "basic" => Some(AuthType::Basic),
            "iam" => Some(AuthType::Iam),
            _ => None,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait Authenticator: Send + Sync + fmt::Debug {
    fn auth_type(&self) -> AuthType;

    /// Value for the `Authorization` header, or `None` to send the request as is.
    async fn authorization(&self) -> Result<Option<String>>;
}

/// Values wrapped in braces or quotes are almost always a copy/paste accident.
pub(crate) fn has_bad_first_or_last_char(value: &str) -> bool {
    value.starts_with('{')
        || value.starts_with('"')
        || value.ends_with('}')
        || value.ends_with('"')
}

pub(crate) fn validate_credential(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Config(format!("{name} must not be empty")));
    }
    if has_bad_first_or_last_char(value) {
        return Err(CoreError::Config(format!(
            "{name} must not start or end with curly brackets or quotes; remove them from your credential"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::NoAuth
    }

    async fn authorization(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        validate_credential("bearer token", &token)?;
        Ok(Self { token })
    }

    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        validate_credential("bearer token", &token)?;
        self.token = token;
        Ok(())
    }
}

impl fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::BearerToken
    }

    async fn authorization(&self) -> Result<Option<String>> {
        Ok(Some(format!("Bearer {}", self.token)))
    }
}

#[derive(Clone)]
pub struct BasicAuthenticator {
    username: String,
    password: String,
}

impl BasicAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        validate_credential("username", &username)?;
        validate_credential("password", &password)?;
        Ok(Self { username, password })
    }

    pub(crate) fn header_value(username: &str, password: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
    }
}

impl fmt::Debug for BasicAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthenticator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BasicAuthenticator {
    fn auth_type(&self) -> AuthType {
        AuthType::Basic
    }

    async fn authorization(&self) -> Result<Option<String>> {
        Ok(Some(Self::header_value(&self.username, &self.password)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_parse() {
        assert_eq!(AuthType::parse("IAM"), Some(AuthType::Iam));
        assert_eq!(AuthType::parse("bearerToken"), Some(AuthType::BearerToken));
        assert_eq!(AuthType::parse(" basic "), Some(AuthType::Basic));
        assert_eq!(AuthType::parse("noAuth"), Some(AuthType::NoAuth));
        assert_eq!(AuthType::parse("cp4d"), None);
    }

    #[tokio::test]
    async fn test_bearer_header() {
        let auth = BearerTokenAuthenticator::new("abc.def").unwrap();
        assert_eq!(
            auth.authorization().await.unwrap().as_deref(),
            Some("Bearer abc.def")
        );
        assert!(!format!("{auth:?}").contains("abc.def"));
    }

    #[tokio::test]
    async fn test_basic_header() {
        let auth = BasicAuthenticator::new("user", "pass").unwrap();
        assert_eq!(
            auth.authorization().await.unwrap().as_deref(),
            Some("Basic dXNlcjpwYXNz")
        );
    }

    #[tokio::test]
    async fn test_noauth_sends_nothing() {
        assert_eq!(NoAuthAuthenticator.authorization().await.unwrap(), None);
    }

    #[test]
    fn test_rejects_empty_and_quoted_credentials() {
        assert!(BearerTokenAuthenticator::new("").is_err());
        assert!(BearerTokenAuthenticator::new("\"token\"").is_err());
        assert!(BasicAuthenticator::new("{user}", "pass").is_err());
        assert!(BasicAuthenticator::new("user", "  ").is_err());
    }
}
