//! Name-list parsing and identifier validation.
//!
//! Install scripts pass permission and role sets as comma-separated lists
//! (`"gallery_view, gallery_edit"`). [`split_names`] normalizes those lists;
//! [`validate_identifier`] guards the table names that get interpolated into
//! raw DDL.

use crate::error::StoreError;

/// Splits a comma-separated name list, trimming surrounding whitespace.
///
/// Names that are empty after trimming are dropped, so `"a,,b, "` yields
/// `["a", "b"]` and the empty string yields nothing. Set operations treat
/// an empty name as absent rather than provisioning a nameless entity.
///
/// # Examples
///
/// ```
/// use plugin_installer_core::split_names;
///
/// let names: Vec<&str> = split_names("gallery_view, gallery_edit,").collect();
/// assert_eq!(names, ["gallery_view", "gallery_edit"]);
/// ```
pub fn split_names(csv: &str) -> impl Iterator<Item = &str> {
    csv.split(',').map(str::trim).filter(|name| !name.is_empty())
}

/// Validates that a name is a bare SQL identifier.
///
/// Only alphanumeric characters and underscores are accepted. Table names
/// are interpolated directly into probe and drop statements, so anything
/// else is rejected before it reaches the connection.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIdentifier`] if the name is empty or
/// contains any other character.
pub fn validate_identifier(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(StoreError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}
