//! Error types for faultline-repo

use std::num::ParseIntError;

use faultline_error::{Classify, Domain, Failure, FailureKind, Subkind};
use faultline_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RepoError {
    #[error("record `{key}` does not exist")]
    Missing {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("record `{key}` is unavailable")]
    Unavailable {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("`{key}` is not a valid record key")]
    InvalidKey {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("record `{key}` does not hold a number: {source}")]
    Malformed {
        key: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line count must not be negative, got {count}")]
    NegativeCount { count: i64 },

    #[error("counter `{key}` would overflow")]
    Overflow { key: String },
}

impl RepoError {
    /// Pick the repository-level meaning of a storage failure for `key`.
    pub(crate) fn from_store(key: &str, source: StoreError) -> Self {
        let key = key.to_string();
        match source {
            StoreError::NotFound { .. } => RepoError::Missing { key, source },
            StoreError::InvalidName { .. } => RepoError::InvalidKey { key, source },
            _ => RepoError::Unavailable { key, source },
        }
    }

    fn store_source(&self) -> Option<&StoreError> {
        match self {
            RepoError::Missing { source, .. }
            | RepoError::Unavailable { source, .. }
            | RepoError::InvalidKey { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Classify for RepoError {
    fn kind(&self) -> FailureKind {
        match self {
            RepoError::Missing { .. } | RepoError::Malformed { .. } => {
                FailureKind::RecoverableExternal
            }
            RepoError::InvalidKey { .. }
            | RepoError::NegativeCount { .. }
            | RepoError::Overflow { .. } => FailureKind::ProgrammingDefect,
            // Whatever the store says, including fatal.
            RepoError::Unavailable { source, .. } => source.kind(),
        }
    }

    fn subkind(&self) -> Option<Subkind> {
        match self {
            RepoError::Missing { .. } => Some(Subkind::NOT_FOUND),
            RepoError::Malformed { .. } => Some(Subkind::MALFORMED_INPUT),
            RepoError::InvalidKey { .. } | RepoError::NegativeCount { .. } => {
                Some(Subkind::INVALID_ARGUMENT)
            }
            RepoError::Overflow { .. } => Some(Subkind::new("overflow")),
            RepoError::Unavailable { source, .. } => source.subkind(),
        }
    }
}

/// Storage failures never leave this crate as storage failures: they are translated into
/// the repository domain with the store's failure kept as the cause. A fatal store
/// failure is the exception and passes through as-is.
impl From<RepoError> for Failure {
    fn from(e: RepoError) -> Failure {
        match e.store_source() {
            Some(source) => Failure::from(source.clone()).translate_as(
                Domain::REPOSITORY,
                e.kind(),
                e.subkind(),
                e.to_string(),
            ),
            None => e.to_failure(Domain::REPOSITORY),
        }
    }
}
