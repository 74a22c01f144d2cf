use super::*;
use crate::name_policy::{path_for, staging_path_for};

/// One UTF-8 file per resource, directly under `root`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at an existing directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        let meta = tokio::fs::metadata(&root)
            .await
            .map_err(|e| StoreError::file_operation("open", &root, e))?;
        if !meta.is_dir() {
            return Err(StoreError::NotADirectory { root });
        }
        tracing::debug!(root = %root.display(), "opened fs store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Store for FsStore {
    fn backend(&self) -> &'static str {
        "fs"
    }

    async fn read(&self, name: &str) -> Result<String, StoreError> {
        let path = path_for(&self.root, name)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    name: name.to_string(),
                });
            }
            Err(e) => return Err(StoreError::file_operation("read", &path, e)),
        };
        String::from_utf8(bytes).map_err(|e| StoreError::Utf8 { path, source: e })
    }

    async fn write(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        let path = path_for(&self.root, name)?;
        let staging = staging_path_for(&self.root, name);
        let result = match tokio::fs::write(&staging, contents).await {
            Ok(()) => tokio::fs::rename(&staging, &path)
                .await
                .map_err(|e| StoreError::file_operation("rename", &path, e)),
            Err(e) => Err(StoreError::file_operation("write", &staging, e)),
        };
        if result.is_err() {
            // best effort: the staging file may not exist if the write itself failed
            if let Err(e) = tokio::fs::remove_file(&staging).await {
                tracing::debug!(path = %staging.display(), error = %e, "staging file not removed");
            }
            return result;
        }
        tracing::trace!(name, bytes = contents.len(), "wrote resource");
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StoreError> {
        let path = path_for(&self.root, name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(StoreError::file_operation("remove", &path, e)),
        }
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::file_operation("list", &self.root, e))?;
        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::file_operation("list", &self.root, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::file_operation("stat", &entry.path(), e))?;
            if !file_type.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
