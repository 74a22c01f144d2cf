use super::*;

/// Conditions the process cannot continue from. These are never handled; they are
/// observed and the process exits.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FatalError {
    #[error("Out of memory while {context}")]
    OutOfMemory { context: String },

    #[error("Stack overflow in {location}")]
    StackOverflow { location: String },

    #[error("Initialization of {component} failed: {reason}")]
    Initialization { component: String, reason: String },

    #[error("Corrupted invariant: {0}")]
    CorruptedInvariant(String),

    #[error("Unrecoverable environment failure: {0}")]
    Environment(String),

    #[error("Shutdown initiated")]
    ShutdownInitiated,
}

impl Classify for FatalError {
    fn kind(&self) -> FailureKind {
        FailureKind::Fatal
    }

    fn subkind(&self) -> Option<Subkind> {
        Some(match self {
            FatalError::OutOfMemory { .. } => Subkind::OUT_OF_MEMORY,
            FatalError::StackOverflow { .. } => Subkind::STACK_OVERFLOW,
            FatalError::Initialization { .. } => Subkind::INITIALIZATION,
            FatalError::CorruptedInvariant(_) => Subkind::CORRUPTED_INVARIANT,
            FatalError::Environment(_) => Subkind::ENVIRONMENT,
            FatalError::ShutdownInitiated => Subkind::SHUTDOWN,
        })
    }
}

impl From<FatalError> for Failure {
    fn from(e: FatalError) -> Failure {
        e.to_failure(Domain::RUNTIME)
    }
}
