use faultline_store::Store;

use crate::RepoError;

/// Record-level access over any [`Store`].
///
/// Every method declares its failures as [`RepoError`]; storage errors never escape
/// untranslated.
#[derive(Debug)]
pub struct Repository<S> {
    store: S,
}

impl<S: Store> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn load(&self, key: &str) -> Result<String, RepoError> {
        tracing::debug!(key, backend = self.store.backend(), "loading record");
        self.store
            .read(key)
            .await
            .map_err(|e| RepoError::from_store(key, e))
    }

    pub async fn save(&self, key: &str, contents: &str) -> Result<(), RepoError> {
        self.store
            .write(key, contents)
            .await
            .map_err(|e| RepoError::from_store(key, e))
    }

    pub async fn delete(&self, key: &str) -> Result<(), RepoError> {
        self.store
            .remove(key)
            .await
            .map_err(|e| RepoError::from_store(key, e))
    }

    pub async fn keys(&self) -> Result<Vec<String>, RepoError> {
        self.store
            .list()
            .await
            .map_err(|e| RepoError::from_store("*", e))
    }

    /// The first `count` lines of a record. A negative count is the caller's bug and is
    /// rejected before the store is touched.
    pub async fn head(&self, key: &str, count: i64) -> Result<Vec<String>, RepoError> {
        let Ok(count) = usize::try_from(count) else {
            return Err(RepoError::NegativeCount { count });
        };
        let contents = self.load(key).await?;
        Ok(contents.lines().take(count).map(str::to_string).collect())
    }

    /// A record holding a single integer.
    pub async fn counter(&self, key: &str) -> Result<i64, RepoError> {
        let contents = self.load(key).await?;
        contents
            .trim()
            .parse::<i64>()
            .map_err(|source| RepoError::Malformed {
                key: key.to_string(),
                source,
            })
    }

    /// Add `by` to a counter and store it. A counter that does not exist yet starts at zero.
    pub async fn increment(&self, key: &str, by: i64) -> Result<i64, RepoError> {
        let current = match self.counter(key).await {
            Ok(value) => value,
            Err(RepoError::Missing { .. }) => {
                tracing::debug!(key, "counter missing, starting from zero");
                0
            }
            Err(e) => return Err(e),
        };
        let next = current.checked_add(by).ok_or_else(|| RepoError::Overflow {
            key: key.to_string(),
        })?;
        self.save(key, &next.to_string()).await?;
        Ok(next)
    }
}
