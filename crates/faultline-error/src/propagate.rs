//! What a call boundary does with a failure: handle it, defer it, or translate it.
//!
//! Fatal failures can only be deferred. Every combinator here hands a fatal failure back
//! untouched so it reaches the outermost boundary, where [`crate::terminate`] observes it
//! and ends the process.
use super::{Domain, ErrorPolicy, Failure, FailureKind, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Consume the failure here and continue.
    Handle,
    /// Re-signal the same failure to the caller.
    Defer,
    /// Re-raise as a failure of this boundary's domain, keeping the original as cause.
    Translate,
}

impl Disposition {
    pub fn permitted(self, kind: FailureKind, policy: &PropagationPolicy) -> bool {
        match (self, kind) {
            (Disposition::Defer, _) => true,
            (_, FailureKind::Fatal) => false,
            (Disposition::Translate, _) => true,
            (Disposition::Handle, FailureKind::RecoverableExternal) => true,
            (Disposition::Handle, FailureKind::ProgrammingDefect) => policy.tolerate_defects,
        }
    }
}

/// Per-application knobs for the propagation rules.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationPolicy {
    /// Let boundaries consume programming defects. Meant for development builds only.
    pub tolerate_defects: bool,
}

/// Outcome of asking a boundary whether it may consume a failure.
#[derive(Debug)]
pub enum Admission {
    /// The boundary may remedy the failure; it has already been emitted.
    Consume(Failure),
    /// The failure must keep travelling towards the caller.
    Propagate(Failure),
}

/// A named call boundary between two abstraction levels.
///
/// The boundary owns the domain failures are translated into, the emission policy used
/// when a failure is consumed, and the propagation rules.
pub struct Boundary<P> {
    domain: Domain,
    emitter: P,
    policy: PropagationPolicy,
}

impl<P: ErrorPolicy> Boundary<P> {
    pub fn new(domain: Domain, emitter: P) -> Self {
        Self {
            domain,
            emitter,
            policy: PropagationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PropagationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn emitter(&self) -> &P {
        &self.emitter
    }

    /// Whether `disposition` is allowed for `failure` here. Uses the emitter's
    /// classification, so a policy that escalates defects to fatal also forbids handling them.
    /// A fatal failure anywhere in the cause chain counts as fatal.
    pub fn permits(&self, disposition: Disposition, failure: &Failure) -> bool {
        disposition.permitted(self.effective_kind(failure), &self.policy)
    }

    fn effective_kind(&self, failure: &Failure) -> FailureKind {
        if failure.carries_fatal() {
            FailureKind::Fatal
        } else {
            self.emitter.classify(failure)
        }
    }

    pub fn admit(&self, failure: Failure) -> Admission {
        if self.permits(Disposition::Handle, &failure) {
            self.emitter.emit(&failure);
            Admission::Consume(failure)
        } else {
            Admission::Propagate(failure)
        }
    }

    /// Consume the failure with `handler` when allowed; otherwise hand it back.
    pub fn handle<T, E>(&self, result: Result<T, E>, handler: impl FnOnce(Failure) -> T) -> Result<T>
    where
        E: Into<Failure>,
    {
        let result: Result<T> = result.map_err(Into::into);
        match result {
            Ok(value) => Ok(value),
            Err(failure) => match self.admit(failure) {
                Admission::Consume(failure) => Ok(handler(failure)),
                Admission::Propagate(failure) => Err(failure),
            },
        }
    }

    /// Pass the failure to the caller unchanged.
    pub fn defer<T, E>(&self, result: Result<T, E>) -> Result<T>
    where
        E: Into<Failure>,
    {
        result.map_err(Into::into)
    }

    /// Re-express a lower-level failure in this boundary's domain. A failure this boundary
    /// classifies as fatal is handed back unchanged.
    pub fn translate<T, E>(
        &self,
        result: Result<T, E>,
        message: impl FnOnce(&Failure) -> String,
    ) -> Result<T>
    where
        E: Into<Failure>,
    {
        result.map_err(|e| {
            let failure: Failure = e.into();
            if !self.permits(Disposition::Translate, &failure) {
                return failure;
            }
            let message = message(&failure);
            failure.translate(self.domain.clone(), message)
        })
    }
}

/// Boundary-free versions of the three dispositions.
pub trait PropagateExt<T> {
    /// Pass the failure on unchanged, converting typed errors into a [`Failure`].
    fn defer(self) -> Result<T>;

    fn translate_to(self, domain: Domain, message: impl Into<String>) -> Result<T>;

    fn translate_with(self, domain: Domain, message: impl FnOnce(&Failure) -> String)
    -> Result<T>;

    /// Handle recoverable-external failures with `handler`; anything else is passed on.
    fn recover_external(self, handler: impl FnOnce(Failure) -> T) -> Result<T>;

    /// Like [`PropagateExt::recover_external`] but only for failures matching `pred`.
    fn recover_where(
        self,
        pred: impl FnOnce(&Failure) -> bool,
        handler: impl FnOnce(Failure) -> T,
    ) -> Result<T>;
}

impl<T, E: Into<Failure>> PropagateExt<T> for Result<T, E> {
    fn defer(self) -> Result<T> {
        self.map_err(Into::into)
    }

    fn translate_to(self, domain: Domain, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let failure: Failure = e.into();
            failure.translate(domain, message)
        })
    }

    fn translate_with(
        self,
        domain: Domain,
        message: impl FnOnce(&Failure) -> String,
    ) -> Result<T> {
        self.map_err(|e| {
            let failure: Failure = e.into();
            let message = message(&failure);
            failure.translate(domain, message)
        })
    }

    fn recover_external(self, handler: impl FnOnce(Failure) -> T) -> Result<T> {
        self.recover_where(|_| true, handler)
    }

    fn recover_where(
        self,
        pred: impl FnOnce(&Failure) -> bool,
        handler: impl FnOnce(Failure) -> T,
    ) -> Result<T> {
        let result: Result<T> = self.map_err(Into::into);
        match result {
            Ok(value) => Ok(value),
            Err(failure) => {
                if failure.kind() == FailureKind::RecoverableExternal
                    && !failure.carries_fatal()
                    && pred(&failure)
                {
                    Ok(handler(failure))
                } else {
                    Err(failure)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefectError, ExternalError, FatalError, NoopPolicy, Subkind};
    use pretty_assertions::assert_eq;

    fn boundary() -> Boundary<NoopPolicy> {
        Boundary::new(Domain::REPOSITORY, NoopPolicy)
    }

    #[test]
    fn fatal_is_only_deferrable() {
        let policy = PropagationPolicy {
            tolerate_defects: true,
        };
        assert!(Disposition::Defer.permitted(FailureKind::Fatal, &policy));
        assert!(!Disposition::Handle.permitted(FailureKind::Fatal, &policy));
        assert!(!Disposition::Translate.permitted(FailureKind::Fatal, &policy));
    }

    #[test]
    fn handle_consumes_external() {
        let r: Result<u32, ExternalError> = Err(ExternalError::not_found("limits.toml"));
        assert_eq!(boundary().handle(r, |_| 10).unwrap(), 10);
    }

    #[test]
    fn handle_refuses_fatal_and_returns_it_unchanged() {
        let original: Failure = FatalError::OutOfMemory {
            context: "loading index".into(),
        }
        .into();
        let r: Result<u32> = Err(original.clone());
        let boundary = boundary().with_policy(PropagationPolicy {
            tolerate_defects: true,
        });
        assert_eq!(boundary.handle(r, |_| 0).unwrap_err(), original);
    }

    #[test]
    fn handle_refuses_external_with_fatal_cause() {
        let wrapped = Failure::external("retry later").caused_by(Failure::fatal("heap exhausted"));
        let r: Result<u32> = Err(wrapped);
        let err = boundary().handle(r, |_| 7).unwrap_err();
        assert!(err.carries_fatal());

        let r: Result<u32> = Err(Failure::external("retry later")
            .caused_by(Failure::fatal("heap exhausted")));
        assert!(r.recover_external(|_| 7).is_err());
    }

    /// Treats defects as fatal.
    struct Strict;

    impl ErrorPolicy for Strict {
        fn classify(&self, failure: &Failure) -> FailureKind {
            match failure.kind() {
                FailureKind::ProgrammingDefect => FailureKind::Fatal,
                other => other,
            }
        }

        fn emit(&self, _failure: &Failure) {}
    }

    #[test]
    fn translate_follows_escalating_policy() {
        let strict = Boundary::new(Domain::CLI, Strict);
        let defect: Failure = DefectError::OutOfBounds { index: 9, len: 1 }.into();
        assert!(!strict.permits(Disposition::Translate, &defect));

        let passed = strict
            .translate(Err::<(), _>(defect.clone()), |_| "hidden".into())
            .unwrap_err();
        assert_eq!(passed, defect);

        let external: Result<(), ExternalError> = Err(ExternalError::not_found("a.txt"));
        let translated = strict.translate(external, |f| format!("lookup: {f}")).unwrap_err();
        assert_eq!(translated.domain(), &Domain::CLI);
        assert!(translated.cause().is_some());
    }

    #[test]
    fn handle_defect_depends_on_tolerance() {
        let defect = || -> Result<u32, DefectError> {
            Err(DefectError::OutOfBounds { index: 4, len: 2 })
        };
        assert!(boundary().handle(defect(), |_| 0).is_err());

        let tolerant = boundary().with_policy(PropagationPolicy {
            tolerate_defects: true,
        });
        assert_eq!(tolerant.handle(defect(), |_| 0).unwrap(), 0);
    }

    #[test]
    fn translate_rehomes_non_fatal_and_passes_fatal() {
        let lower: Result<(), ExternalError> = Err(ExternalError::not_found("orders.txt"));
        let err = boundary()
            .translate(lower, |f| format!("record unavailable: {f}"))
            .unwrap_err();
        assert_eq!(err.domain(), &Domain::REPOSITORY);
        assert_eq!(err.cause().unwrap().message(), "Resource not found: orders.txt");

        let fatal: Failure = FatalError::CorruptedInvariant("page table".into()).into();
        let passed = boundary()
            .translate(Err::<(), _>(fatal.clone()), |_| "hidden".into())
            .unwrap_err();
        assert_eq!(passed, fatal);
    }

    #[test]
    fn defer_keeps_the_failure() {
        let r: Result<(), DefectError> = Err(DefectError::DivisionByZero);
        let err = r.defer().unwrap_err();
        assert_eq!(err.subkind(), Some(&Subkind::DIVISION_BY_ZERO));
        assert!(err.cause().is_none());
    }

    #[test]
    fn recover_external_ignores_other_kinds() {
        let external: Result<&str> = Err(Failure::external("offline"));
        assert_eq!(external.recover_external(|_| "cached").unwrap(), "cached");

        let defect: Result<&str> = Err(Failure::defect("negative count"));
        assert!(defect.recover_external(|_| "cached").is_err());

        let fatal: Result<&str> = Err(Failure::fatal("oom"));
        assert!(fatal.recover_external(|_| "cached").unwrap_err().is_fatal());
    }

    #[test]
    fn recover_where_matches_subkind() {
        let r: Result<u8, ExternalError> = Err(ExternalError::Unreachable {
            endpoint: "db:5432".into(),
        });
        let r = r.recover_where(|f| f.subkind() == Some(&Subkind::NOT_FOUND), |_| 0);
        assert_eq!(r.unwrap_err().subkind(), Some(&Subkind::UNREACHABLE));
    }
}
