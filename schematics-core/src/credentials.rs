//! # External Configuration
//!
//! Service properties such as `URL`, `APIKEY` or `AUTH_TYPE` are discovered
//! from three sources. The first source that yields anything for the service
//! wins; sources are never merged.
//!
//! 1. A credentials file: `$IBM_CREDENTIALS_FILE`, else `./ibm-credentials.env`,
//!    else `$HOME/ibm-credentials.env`
//! 2. Process environment variables
//! 3. The Cloud Foundry `VCAP_SERVICES` JSON document
//!
//! In the file and environment sources a property for service `schematics`
//! is spelled `SCHEMATICS_URL`, `SCHEMATICS_APIKEY` and so on. The returned
//! map uses the bare property names.

use crate::authenticator::{
    AuthType, Authenticator, BasicAuthenticator, BearerTokenAuthenticator, NoAuthAuthenticator,
};
use crate::error::{CoreError, Result};
use crate::iam::IamAuthenticator;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";
const VCAP_SERVICES_ENV: &str = "VCAP_SERVICES";

pub const PROPNAME_AUTH_TYPE: &str = "AUTH_TYPE";
pub const PROPNAME_APIKEY: &str = "APIKEY";
pub const PROPNAME_BEARER_TOKEN: &str = "BEARER_TOKEN";
pub const PROPNAME_USERNAME: &str = "USERNAME";
pub const PROPNAME_PASSWORD: &str = "PASSWORD";
pub const PROPNAME_AUTH_URL: &str = "AUTH_URL";
pub const PROPNAME_AUTH_DISABLE_SSL: &str = "AUTH_DISABLE_SSL";
pub const PROPNAME_CLIENT_ID: &str = "CLIENT_ID";
pub const PROPNAME_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const PROPNAME_SCOPE: &str = "SCOPE";

pub type ServiceProperties = HashMap<String, String>;

/// `my-service` becomes `MY_SERVICE_`.
pub fn property_prefix(service_name: &str) -> String {
    format!("{}_", service_name.to_ascii_uppercase().replace('-', "_"))
}

/// Look up the configuration for `service_name` across all sources.
pub fn get_service_properties(service_name: &str) -> Result<ServiceProperties> {
    if service_name.trim().is_empty() {
        return Err(CoreError::Validation(
            "service name must not be empty".to_string(),
        ));
    }

    if let Some(path) = credentials_file_path() {
        let props = read_credentials_file(&path, service_name)?;
        if !props.is_empty() {
            debug!(path = %path.display(), service = service_name, "Loaded service properties from credentials file");
            return Ok(props);
        }
    }

    let props = properties_from_vars(std::env::vars(), service_name);
    if !props.is_empty() {
        debug!(service = service_name, "Loaded service properties from environment");
        return Ok(props);
    }

    if let Ok(vcap) = std::env::var(VCAP_SERVICES_ENV) {
        let props = properties_from_vcap(&vcap, service_name)?;
        if !props.is_empty() {
            debug!(service = service_name, "Loaded service properties from VCAP_SERVICES");
        }
        return Ok(props);
    }

    Ok(ServiceProperties::new())
}

fn credentials_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CREDENTIALS_FILE_ENV) {
        let path = PathBuf::from(path);
        return path.is_file().then_some(path);
    }

    let local = PathBuf::from(DEFAULT_CREDENTIALS_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_CREDENTIALS_FILE_NAME))
        .filter(|p| p.is_file())
}

/// Read a credentials file and keep the entries belonging to `service_name`.
pub fn read_credentials_file(path: &Path, service_name: &str) -> Result<ServiceProperties> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_properties(&content, service_name))
}

/// Parse `KEY=value` lines. Blank lines and `#` comments are skipped, and
/// only keys carrying the service prefix are kept.
pub fn parse_properties(content: &str, service_name: &str) -> ServiceProperties {
    let pairs = content.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (key, value) = line.split_once('=')?;
        Some((key.trim().to_string(), value.trim().to_string()))
    });
    properties_from_vars(pairs, service_name)
}

pub fn properties_from_vars<I>(vars: I, service_name: &str) -> ServiceProperties
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = property_prefix(service_name);
    vars.into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(&prefix)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), value))
        })
        .collect()
}

/// Extract credentials from a `VCAP_SERVICES` document.
///
/// An entry whose `name` matches the service is preferred; otherwise the
/// first entry listed under the service's key is used.
pub fn properties_from_vcap(vcap: &str, service_name: &str) -> Result<ServiceProperties> {
    let doc: Value = serde_json::from_str(vcap)
        .map_err(|e| CoreError::Config(format!("VCAP_SERVICES is not valid JSON: {e}")))?;

    let Some(services) = doc.as_object() else {
        return Ok(ServiceProperties::new());
    };

    let by_name = services
        .values()
        .filter_map(Value::as_array)
        .flatten()
        .find(|entry| entry.get("name").and_then(Value::as_str) == Some(service_name));

    let entry = by_name.or_else(|| {
        services
            .get(service_name)
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
    });

    let Some(credentials) = entry.and_then(|e| e.get("credentials")) else {
        return Ok(ServiceProperties::new());
    };

    let mut props = ServiceProperties::new();
    for (vcap_key, prop) in [
        ("apikey", PROPNAME_APIKEY),
        ("url", "URL"),
        ("username", PROPNAME_USERNAME),
        ("password", PROPNAME_PASSWORD),
        ("iam_url", PROPNAME_AUTH_URL),
    ] {
        if let Some(value) = credentials.get(vcap_key).and_then(Value::as_str) {
            props.insert(prop.to_string(), value.to_string());
        }
    }
    if props.contains_key(PROPNAME_APIKEY) {
        props.insert(
            PROPNAME_AUTH_TYPE.to_string(),
            AuthType::Iam.as_str().to_string(),
        );
    }
    Ok(props)
}

/// Build the authenticator configured for `service_name`.
pub fn get_authenticator_from_environment(service_name: &str) -> Result<Arc<dyn Authenticator>> {
    let props = get_service_properties(service_name)?;
    if props.is_empty() {
        return Err(CoreError::Config(format!(
            "no configuration found for service '{service_name}'"
        )));
    }
    authenticator_from_properties(&props)
}

pub fn authenticator_from_properties(props: &ServiceProperties) -> Result<Arc<dyn Authenticator>> {
    let auth_type = match props.get(PROPNAME_AUTH_TYPE) {
        Some(raw) => AuthType::parse(raw)
            .ok_or_else(|| CoreError::Config(format!("unrecognized AUTH_TYPE '{raw}'")))?,
        None if props.contains_key(PROPNAME_APIKEY) => AuthType::Iam,
        None => {
            return Err(CoreError::Config(
                "AUTH_TYPE is not set and no APIKEY was found".to_string(),
            ))
        }
    };

    let require = |name: &str| {
        props
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::Config(format!("{auth_type} authentication requires {name}")))
    };

    let authenticator: Arc<dyn Authenticator> = match auth_type {
        AuthType::NoAuth => Arc::new(NoAuthAuthenticator),
        AuthType::BearerToken => Arc::new(BearerTokenAuthenticator::new(require(
            PROPNAME_BEARER_TOKEN,
        )?)?),
        AuthType::Basic => Arc::new(BasicAuthenticator::new(
            require(PROPNAME_USERNAME)?,
            require(PROPNAME_PASSWORD)?,
        )?),
        AuthType::Iam => {
            let mut builder = IamAuthenticator::builder(require(PROPNAME_APIKEY)?)
                .disable_ssl_verification(is_truthy(props.get(PROPNAME_AUTH_DISABLE_SSL)));
            if let Some(url) = props.get(PROPNAME_AUTH_URL) {
                builder = builder.url(url);
            }
            if let (Some(id), Some(secret)) = (
                props.get(PROPNAME_CLIENT_ID),
                props.get(PROPNAME_CLIENT_SECRET),
            ) {
                builder = builder.client_credentials(id, secret);
            }
            if let Some(scope) = props.get(PROPNAME_SCOPE) {
                builder = builder.scope(scope);
            }
            Arc::new(builder.build()?)
        }
    };
    Ok(authenticator)
}

pub(crate) fn is_truthy(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}
