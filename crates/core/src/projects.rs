//! Project validation.

use crate::error::CoreError;

/// Maximum length for a project name.
pub const MAX_PROJECT_NAME_LENGTH: usize = 200;

/// Maximum length for a project description.
pub const MAX_PROJECT_DESCRIPTION_LENGTH: usize = 2_000;

/// Validate a project name: must be non-empty (after trimming) and within
/// the length limit.
pub fn validate_project_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_PROJECT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project name exceeds maximum length of {MAX_PROJECT_NAME_LENGTH} characters (got {})",
            name.len()
        )));
    }
    Ok(())
}

/// Validate a project description: length check only.
pub fn validate_project_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_PROJECT_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project description exceeds maximum length of {MAX_PROJECT_DESCRIPTION_LENGTH} characters (got {})",
            description.len()
        )));
    }
    Ok(())
}
