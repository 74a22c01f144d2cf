use std::sync::Arc;

use super::*;

/// Failures whose cause lies outside the caller's control but whose remedy the caller
/// knows: ask for another name, retry later, fix the input.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExternalError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Permission denied for {resource}")]
    PermissionDenied { resource: String },

    #[error("Endpoint unreachable: {endpoint}")]
    Unreachable { endpoint: String },

    #[error("Address already in use: {address}")]
    AddressInUse { address: String },

    #[error("Malformed input from {origin}: {detail}")]
    MalformedInput { origin: String, detail: String },

    #[error("Operation interrupted: {0}")]
    Interrupted(String),

    #[error("Operation timed out: {0}")]
    TimedOut(String),

    #[error("I/O failure on {path:?}: {operation}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        source: Arc<std::io::Error>,
    },
}

impl ExternalError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        ExternalError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn malformed(origin: impl Into<String>, detail: impl ToString) -> Self {
        ExternalError::MalformedInput {
            origin: origin.into(),
            detail: detail.to_string(),
        }
    }
}

impl Classify for ExternalError {
    fn kind(&self) -> FailureKind {
        FailureKind::RecoverableExternal
    }

    fn subkind(&self) -> Option<Subkind> {
        Some(match self {
            ExternalError::NotFound { .. } => Subkind::NOT_FOUND,
            ExternalError::PermissionDenied { .. } => Subkind::PERMISSION_DENIED,
            ExternalError::Unreachable { .. } => Subkind::UNREACHABLE,
            ExternalError::AddressInUse { .. } => Subkind::ADDRESS_IN_USE,
            ExternalError::MalformedInput { .. } => Subkind::MALFORMED_INPUT,
            ExternalError::Interrupted(_) => Subkind::INTERRUPTED,
            ExternalError::TimedOut(_) => Subkind::TIMED_OUT,
            // The io error's own kind is more specific than "io" when it agrees on the kind.
            ExternalError::Io { source, .. } => {
                let io_kind = source.kind();
                return match io_kind.kind() {
                    FailureKind::RecoverableExternal => io_kind.subkind(),
                    _ => None,
                }
                .or(Some(Subkind::IO));
            }
        })
    }
}

impl From<ExternalError> for Failure {
    fn from(e: ExternalError) -> Failure {
        e.to_failure(Domain::UNSPECIFIED)
    }
}
