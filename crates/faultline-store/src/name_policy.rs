use super::*;

// Resource names map 1:1 onto files directly under the store root.

pub(crate) fn validate_name(name: &str) -> Result<(), StoreError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.starts_with('.') {
        "name must not start with '.'"
    } else if name.contains(['/', '\\', '\0']) {
        "name must be a single path component"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

pub(crate) fn path_for(root: &Path, name: &str) -> Result<PathBuf, StoreError> {
    validate_name(name)?;
    Ok(root.join(name))
}

/// Sibling used for temp-write + rename. Hidden so listings skip it, and unique per write
/// so concurrent writers of one name never share it.
pub(crate) fn staging_path_for(root: &Path, name: &str) -> PathBuf {
    root.join(format!(".{name}.{}.tmp", uuid::Uuid::new_v4()))
}
