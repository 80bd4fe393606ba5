//! Credential discovery tests
//!
//! These mutate process environment variables, so each test is serialized.

use schematics_core::{get_authenticator_from_environment, get_service_properties, AuthType};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

const VARS: &[&str] = &[
    "IBM_CREDENTIALS_FILE",
    "VCAP_SERVICES",
    "SCHEMATICS_URL",
    "SCHEMATICS_APIKEY",
    "SCHEMATICS_AUTH_TYPE",
    "SCHEMATICS_BEARER_TOKEN",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

fn credentials_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_credentials_file_wins_over_environment() {
    clear_env();
    let file = credentials_file(
        "SCHEMATICS_URL=https://from-file.example.com\nSCHEMATICS_APIKEY=file-key\n",
    );
    std::env::set_var("IBM_CREDENTIALS_FILE", file.path());
    std::env::set_var("SCHEMATICS_URL", "https://from-env.example.com");

    let props = get_service_properties("schematics").unwrap();
    assert_eq!(
        props.get("URL").map(String::as_str),
        Some("https://from-file.example.com")
    );
    assert_eq!(props.get("APIKEY").map(String::as_str), Some("file-key"));

    clear_env();
}

#[test]
#[serial]
fn test_environment_wins_over_vcap() {
    clear_env();
    std::env::set_var("IBM_CREDENTIALS_FILE", "/nonexistent/ibm-credentials.env");
    std::env::set_var("SCHEMATICS_URL", "https://from-env.example.com");
    std::env::set_var("SCHEMATICS_AUTH_TYPE", "noauth");
    std::env::set_var(
        "VCAP_SERVICES",
        r#"{"schematics":[{"name":"schematics","credentials":{"url":"https://from-vcap.example.com","apikey":"v"}}]}"#,
    );

    let props = get_service_properties("schematics").unwrap();
    assert_eq!(
        props.get("URL").map(String::as_str),
        Some("https://from-env.example.com")
    );
    assert!(!props.contains_key("APIKEY"));

    clear_env();
}

#[test]
#[serial]
fn test_vcap_used_when_nothing_else_is_set() {
    clear_env();
    std::env::set_var("IBM_CREDENTIALS_FILE", "/nonexistent/ibm-credentials.env");
    std::env::set_var(
        "VCAP_SERVICES",
        r#"{"schematics":[{"name":"schematics","credentials":{"url":"https://from-vcap.example.com","apikey":"v"}}]}"#,
    );

    let props = get_service_properties("schematics").unwrap();
    assert_eq!(
        props.get("URL").map(String::as_str),
        Some("https://from-vcap.example.com")
    );
    assert_eq!(props.get("AUTH_TYPE").map(String::as_str), Some("iam"));

    clear_env();
}

#[test]
#[serial]
fn test_authenticator_from_environment() {
    clear_env();
    std::env::set_var("IBM_CREDENTIALS_FILE", "/nonexistent/ibm-credentials.env");
    std::env::set_var("SCHEMATICS_AUTH_TYPE", "bearertoken");
    std::env::set_var("SCHEMATICS_BEARER_TOKEN", "env-token");

    let auth = get_authenticator_from_environment("schematics").unwrap();
    assert_eq!(auth.auth_type(), AuthType::BearerToken);

    clear_env();
    std::env::set_var("IBM_CREDENTIALS_FILE", "/nonexistent/ibm-credentials.env");
    assert!(get_authenticator_from_environment("schematics").is_err());

    clear_env();
}
