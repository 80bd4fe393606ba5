//! Typed async client for the IBM Cloud Schematics API.
//!
//! [`SchematicsV1`] exposes every operation of the v1/v2 REST API as an async
//! method returning a [`DetailedResponse`]. Request and response shapes live
//! in [`models`], per-operation option structs in [`operations`], and
//! [`pager`] walks paginated listings.

pub mod models;
pub mod operations;
pub mod pager;
pub mod service;

pub use service::{
    get_service_url_for_region, SchematicsV1, SchematicsV1Options, DEFAULT_SERVICE_NAME,
    DEFAULT_SERVICE_URL,
};

pub use schematics_core::{
    AuthType, Authenticator, BasicAuthenticator, BearerTokenAuthenticator, CoreError,
    DetailedResponse, FilePart, IamAuthenticator, NoAuthAuthenticator, Result,
};
