//! One method on [`SchematicsV1`](crate::SchematicsV1) per API operation,
//! grouped the way the service documents them.
//!
//! Each operation takes a borrowed `XxxOptions` struct. Path, query and header
//! parameters are plain fields; everything else is serialized as the JSON
//! request body. Required path parameters and headers are checked before
//! anything is sent and surface as [`CoreError::Validation`](crate::CoreError).

pub mod actions;
pub mod agents;
pub mod blueprints;
pub mod bulk;
pub mod inventories;
pub mod jobs;
pub mod policies;
pub mod resource_queries;
pub mod settings;
pub mod utility;
pub mod workspace_jobs;
pub mod workspaces;

pub use actions::*;
pub use agents::*;
pub use blueprints::*;
pub use bulk::*;
pub use inventories::*;
pub use jobs::*;
pub use policies::*;
pub use resource_queries::*;
pub use settings::*;
pub use utility::*;
pub use workspace_jobs::*;
pub use workspaces::*;
