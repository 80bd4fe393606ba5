//! Request and response shapes of the Schematics API.
//!
//! Field names match the wire format. Almost every field is optional and
//! unset fields are left out of request bodies; unknown response fields are
//! ignored so newer service versions keep deserializing.

pub mod action;
pub mod activity;
pub mod agent;
pub mod blueprint;
pub mod common;
pub mod inventory;
pub mod job;
pub mod policy;
pub mod settings;
pub mod utility;
pub mod workspace;

pub use action::*;
pub use activity::*;
pub use agent::*;
pub use blueprint::*;
pub use common::*;
pub use inventory::*;
pub use job::*;
pub use policy::*;
pub use settings::*;
pub use utility::*;
pub use workspace::*;
