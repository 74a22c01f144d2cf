use super::{Failure, FailureKind};

/// A policy for classifying and emitting failures.
///
/// Libraries should not log or print directly; instead, they return [`crate::Result`] and let
/// the application install an `ErrorPolicy` to decide how to present or route failures.
///
/// A policy may escalate a failure's kind (treat a defect as fatal in production, say) but
/// the combinators in this crate never let it lower one.
///
/// Example
/// ```rust
/// use faultline_error::{ErrorPolicy, Failure, FailureKind};
///
/// struct PrintPolicy;
/// impl ErrorPolicy for PrintPolicy {
///     fn classify(&self, f: &Failure) -> FailureKind { f.kind() }
///     fn emit(&self, f: &Failure) { eprintln!("[{}] {f}", self.classify(f)); }
/// }
/// ```
pub trait ErrorPolicy: Send + Sync {
    /// Classify the failure's kind
    fn classify(&self, failure: &Failure) -> FailureKind;

    /// Emit the failure according to the policy (e.g., log, render a report)
    fn emit(&self, failure: &Failure);
}

impl<P: ErrorPolicy + ?Sized> ErrorPolicy for &P {
    fn classify(&self, failure: &Failure) -> FailureKind {
        (**self).classify(failure)
    }

    fn emit(&self, failure: &Failure) {
        (**self).emit(failure)
    }
}

/// A no-operation policy that does nothing
#[derive(Debug, Clone, Default)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn classify(&self, failure: &Failure) -> FailureKind {
        failure.kind()
    }

    fn emit(&self, _failure: &Failure) {}
}

/// A policy that uses the failure's own kind and emits via tracing
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn classify(&self, failure: &Failure) -> FailureKind {
        failure.kind()
    }

    fn emit(&self, failure: &Failure) {
        use tracing::{Level, event};

        let subkind = failure.subkind().map(|s| s.as_str()).unwrap_or("-");
        let domain = failure.domain().as_str();
        let chain = failure.display_chain();
        match failure.kind() {
            FailureKind::RecoverableExternal => event!(
                Level::WARN,
                kind = %failure.kind(),
                subkind,
                domain,
                chain = %chain,
                "{failure}"
            ),
            FailureKind::ProgrammingDefect => event!(
                Level::ERROR,
                kind = %failure.kind(),
                subkind,
                domain,
                chain = %chain,
                "{failure}"
            ),
            FailureKind::Fatal => event!(
                Level::ERROR,
                fatal = true,
                kind = %failure.kind(),
                subkind,
                domain,
                chain = %chain,
                "{failure}"
            ),
        }
    }
}

#[cfg(feature = "diagnostic")]
#[derive(Debug, Clone, Default)]
pub struct MiettePolicy;

#[cfg(feature = "diagnostic")]
impl ErrorPolicy for MiettePolicy {
    fn classify(&self, failure: &Failure) -> FailureKind {
        failure.kind()
    }

    fn emit(&self, failure: &Failure) {
        let report = miette::Report::new(failure.clone());
        eprintln!("{report:?}");
    }
}

#[cfg(feature = "diagnostic")]
impl miette::Diagnostic for Failure {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.subkind() {
            Some(subkind) => format!("{}::{}::{}", self.domain(), self.kind(), subkind),
            None => format!("{}::{}", self.domain(), self.kind()),
        };
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.kind() {
            FailureKind::RecoverableExternal => miette::Severity::Warning,
            FailureKind::ProgrammingDefect | FailureKind::Fatal => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let help = match self.kind() {
            FailureKind::RecoverableExternal => "check the input or environment and try again",
            FailureKind::ProgrammingDefect => "this is a bug in the calling code",
            FailureKind::Fatal => "the process cannot continue",
        };
        Some(Box::new(help))
    }
}

/// A composite policy that delegates to multiple policies.
///
/// Behavior
/// - classify: returns the most severe kind among inner policies, never lower than the
///   failure's own kind.
/// - emit: delegates emission to all inner policies in insertion order.
///
/// Example
/// ```rust
/// use faultline_error::{policy::{CombinedPolicy, NoopPolicy}, ErrorPolicy};
/// let policy = CombinedPolicy::new()
///     .push(NoopPolicy::default());
/// // Optionally add feature-gated policies:
/// // #[cfg(feature = "tracing")] let policy = policy.push(faultline_error::policy::TracingPolicy::default());
/// ```
#[derive(Default)]
pub struct CombinedPolicy {
    policies: Vec<Box<dyn ErrorPolicy>>,
}

impl CombinedPolicy {
    /// Create an empty CombinedPolicy.
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Pre-allocate capacity for N policies.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            policies: Vec::with_capacity(capacity),
        }
    }

    /// Construct from an existing vector of boxed policies.
    pub fn from_vec(policies: Vec<Box<dyn ErrorPolicy>>) -> Self {
        Self { policies }
    }

    /// Add a policy by value (boxed internally). Consumes and returns Self for builder-style chaining.
    pub fn push<P: ErrorPolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Add an already boxed policy. Consumes and returns Self for builder-style chaining.
    pub fn add_boxed(mut self, policy: Box<dyn ErrorPolicy>) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl ErrorPolicy for CombinedPolicy {
    fn classify(&self, failure: &Failure) -> FailureKind {
        self.policies
            .iter()
            .map(|p| p.classify(failure))
            .fold(failure.kind(), FailureKind::escalate)
    }

    fn emit(&self, failure: &Failure) {
        for p in &self.policies {
            p.emit(failure);
        }
    }
}
