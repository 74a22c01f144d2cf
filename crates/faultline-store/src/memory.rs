use dashmap::DashMap;

use super::*;
use crate::name_policy::validate_name;

/// In-memory store, mostly for tests and for wiring a repository without a disk.
///
/// `fail_with` arms a fault for one resource name: the next read, write, or remove of
/// that name returns the armed error instead of touching the map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
    faults: DashMap<String, StoreError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (k, v) in entries {
            store.entries.insert(k.into(), v.into());
        }
        store
    }

    pub fn fail_with(&self, name: impl Into<String>, error: StoreError) {
        self.faults.insert(name.into(), error);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn take_fault(&self, name: &str) -> Result<(), StoreError> {
        match self.faults.remove(name) {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }
}

impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn read(&self, name: &str) -> Result<String, StoreError> {
        validate_name(name)?;
        self.take_fault(name)?;
        self.entries
            .get(name)
            .map(|v| v.value().clone())
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    async fn write(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        self.take_fault(name)?;
        self.entries.insert(name.to_string(), contents.to_string());
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), StoreError> {
        validate_name(name)?;
        self.take_fault(name)?;
        self.entries
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names)
    }
}
