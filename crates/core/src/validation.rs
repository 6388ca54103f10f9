//! Field validation shared by the store and the HTTP layer.

use crate::error::CoreError;

/// Reject an empty required field.
///
/// Only the empty string counts as blank; whitespace is stored as given.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} cannot be blank.")));
    }
    Ok(())
}

/// Validate a category name that will be used to build a file name
/// (`<category>.json`) for bulk loading.
///
/// The name must be non-empty and must not be able to escape the pictures
/// directory.
pub fn validate_category_file_name(category: &str) -> Result<(), CoreError> {
    require_non_empty("Category", category)?;
    if category.contains('/') || category.contains('\\') || category.contains("..") {
        return Err(CoreError::Validation(format!(
            "Category '{category}' is not a valid file name."
        )));
    }
    if category.chars().any(char::is_control) {
        return Err(CoreError::Validation(
            "Category must not contain control characters.".into(),
        ));
    }
    Ok(())
}
