//! Transport layer for the Schematics API client.
//!
//! This crate knows nothing about workspaces or jobs. It supplies what every
//! service operation needs: authentication, credential discovery, request
//! assembly, retries and typed responses.

pub mod authenticator;
pub mod credentials;
pub mod error;
pub mod iam;
pub mod request;
pub mod response;
pub mod retry;
pub mod service;
pub mod validation;

pub use authenticator::{
    AuthType, Authenticator, BasicAuthenticator, BearerTokenAuthenticator, NoAuthAuthenticator,
};
pub use credentials::{
    authenticator_from_properties, get_authenticator_from_environment, get_service_properties,
    ServiceProperties,
};
pub use error::{CoreError, Result};
pub use iam::{IamAuthenticator, IamAuthenticatorBuilder};
pub use request::{FilePart, RequestBody, ServiceRequest};
pub use response::DetailedResponse;
pub use retry::RetryPolicy;
pub use service::BaseService;
