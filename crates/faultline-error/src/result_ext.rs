use super::{ErrorPolicy, Failure, FailureKind, Result};

/// Extension trait for `Result` enabling policy-driven emission without
/// contaminating core control-flow with side-effects.
///
/// Typical usage: at subsystem boundaries in applications, call one of the
/// helpers to emit failures via your chosen [`ErrorPolicy`], while preserving
/// the original result for further handling.
///
/// Example
/// ```rust
/// use faultline_error::{ExternalError, NoopPolicy, Result, ResultExt};
///
/// fn do_work() -> Result<()> {
///     let r: Result<()> = Err(ExternalError::not_found("config.toml").into());
///     r.emit_external(&NoopPolicy) // Emitted according to policy, still Err for caller to handle
/// }
/// assert!(do_work().is_err());
/// ```
pub trait ResultExt<T> {
    /// Emit the failure using the provided policy and return the result unchanged
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self;

    /// If the policy classifies the failure as recoverable-external, emit it
    fn emit_external(self, policy: &impl ErrorPolicy) -> Self;

    /// If the policy classifies the failure as a programming defect, emit it
    fn emit_defect(self, policy: &impl ErrorPolicy) -> Self;

    /// If the policy classifies the failure as fatal, emit it
    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn emit_event(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }

    fn emit_external(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(self, policy, FailureKind::RecoverableExternal)
    }

    fn emit_defect(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(self, policy, FailureKind::ProgrammingDefect)
    }

    fn emit_fatal(self, policy: &impl ErrorPolicy) -> Self {
        emit_if(self, policy, FailureKind::Fatal)
    }
}

fn emit_if<T>(result: Result<T>, policy: &impl ErrorPolicy, kind: FailureKind) -> Result<T> {
    if let Err(ref e) = result {
        if policy.classify(e) == kind {
            policy.emit(e);
        }
    }
    result
}

/// Iterator helpers over `Result` to reduce boilerplate at boundaries.
///
/// - `collect_ok`: eagerly collects `Ok` items, returning the first `Failure`
///   (equivalent to `collect::<Result<Vec<_>>>()` but clearer at call sites).
/// - `first_error`: scans and returns the first `Failure` without allocation.
///
/// Example
/// ```rust
/// use faultline_error::{ExternalError, Result, result_ext::IterResultExt};
///
/// let items: Vec<Result<u32>> = vec![Ok(1), Ok(2), Err(ExternalError::not_found("disk").into())];
/// assert!(items.clone().first_error().is_some());
/// assert!(items.collect_ok().is_err());
/// ```
pub trait IterResultExt<T>: Sized {
    fn collect_ok(self) -> Result<Vec<T>>;
    fn first_error(self) -> Option<Failure>;
}

impl<I, T> IterResultExt<T> for I
where
    I: IntoIterator<Item = Result<T>>,
{
    fn collect_ok(self) -> Result<Vec<T>> {
        let mut out = Vec::new();
        for r in self {
            out.push(r?);
        }
        Ok(out)
    }

    fn first_error(self) -> Option<Failure> {
        self.into_iter().find_map(|r| r.err())
    }
}
