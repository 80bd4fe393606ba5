//! Presence checks for required operation inputs.
//!
//! These run before a request is built; a failure means nothing was sent.

use crate::error::{CoreError, Result};

pub fn require_non_empty(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} must not be empty")));
    }
    Ok(())
}
