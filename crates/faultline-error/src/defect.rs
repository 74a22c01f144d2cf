use super::*;

/// Violated preconditions and invalid internal state caused by the calling code.
///
/// Nothing needs to declare these; the fix is a code change. They still travel up the
/// call chain until someone catches them or the process ends.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DefectError {
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("Missing value: {0}")]
    NullReference(String),

    #[error("Cannot cast {from} to {to}")]
    InvalidCast { from: String, to: String },

    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Unexpected state: {0}")]
    IllegalState(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("No such element: {0}")]
    NoSuchElement(String),

    #[error("Collection modified during iteration: {0}")]
    ConcurrentModification(String),

    #[error("Unit of work panicked: {0}")]
    Panicked(String),
}

impl DefectError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        DefectError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl Classify for DefectError {
    fn kind(&self) -> FailureKind {
        FailureKind::ProgrammingDefect
    }

    fn subkind(&self) -> Option<Subkind> {
        Some(match self {
            DefectError::InvalidArgument { .. } => Subkind::INVALID_ARGUMENT,
            DefectError::OutOfBounds { .. } => Subkind::OUT_OF_BOUNDS,
            DefectError::NullReference(_) => Subkind::NULL_REFERENCE,
            DefectError::InvalidCast { .. } => Subkind::INVALID_CAST,
            DefectError::DivisionByZero => Subkind::DIVISION_BY_ZERO,
            DefectError::IllegalState(_) => Subkind::ILLEGAL_STATE,
            DefectError::Unsupported(_) => Subkind::UNSUPPORTED,
            DefectError::NoSuchElement(_) => Subkind::NO_SUCH_ELEMENT,
            DefectError::ConcurrentModification(_) => Subkind::CONCURRENT_MODIFICATION,
            DefectError::Panicked(_) => Subkind::PANICKED,
        })
    }
}

impl From<DefectError> for Failure {
    fn from(e: DefectError) -> Failure {
        e.to_failure(Domain::UNSPECIFIED)
    }
}

/// Integer division that reports a zero divisor as a defect instead of panicking.
pub fn checked_div(dividend: i64, divisor: i64) -> Result<i64> {
    if divisor == 0 {
        return Err(DefectError::DivisionByZero.into());
    }
    dividend
        .checked_div(divisor)
        .ok_or_else(|| DefectError::invalid_argument("dividend", "quotient overflows i64").into())
}
