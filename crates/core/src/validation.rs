//! Small input validation helpers shared by handlers.

use validator::Validate;

use crate::error::CoreError;

/// Reject a required string field that is empty or whitespace only.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Run `validator` derive rules on a request body.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(CoreError::from)
}
