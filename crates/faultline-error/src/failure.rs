use std::fmt;

use super::{Domain, FailureKind, Subkind};

/// A failure raised where an operation could not satisfy its contract.
///
/// A failure is either consumed by some caller or re-raised until the process
/// terminates. Crossing an abstraction boundary goes through [`Failure::translate`],
/// which keeps the original as [`Failure::cause`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: FailureKind,
    subkind: Option<Subkind>,
    domain: Domain,
    message: String,
    cause: Option<Box<Failure>>,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            subkind: None,
            domain: Domain::default(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Fatal, message)
    }

    pub fn external(message: impl Into<String>) -> Self {
        Self::new(FailureKind::RecoverableExternal, message)
    }

    pub fn defect(message: impl Into<String>) -> Self {
        Self::new(FailureKind::ProgrammingDefect, message)
    }

    pub fn with_subkind(mut self, subkind: Subkind) -> Self {
        self.subkind = Some(subkind);
        self
    }

    pub fn in_domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    /// Attach an underlying failure. Used when building a translated failure by hand;
    /// prefer [`Failure::translate`].
    ///
    /// A fatal cause cannot be wrapped: it is returned in place of `self`.
    pub fn caused_by(mut self, cause: impl Into<Failure>) -> Self {
        let cause = cause.into();
        if cause.carries_fatal() {
            return cause;
        }
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn subkind(&self) -> Option<&Subkind> {
        self.subkind.as_ref()
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&Failure> {
        self.cause.as_deref()
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }

    /// True when this failure or anything in its cause chain is fatal.
    pub fn carries_fatal(&self) -> bool {
        self.any_in_chain(Failure::is_fatal)
    }

    /// True when the kind matches and, if given, the subkind matches as well.
    pub fn is(&self, kind: FailureKind, subkind: Option<&Subkind>) -> bool {
        self.kind == kind && subkind.is_none_or(|s| self.subkind.as_ref() == Some(s))
    }

    /// Re-express this failure in `domain` with a new message, keeping `self` as the cause.
    ///
    /// The translated failure keeps this failure's kind and subkind. Fatal failures are
    /// returned untouched.
    pub fn translate(self, domain: Domain, message: impl Into<String>) -> Failure {
        let (kind, subkind) = (self.kind, self.subkind.clone());
        self.translate_as(domain, kind, subkind, message)
    }

    /// Like [`Failure::translate`], but re-kinds the result. A recoverable failure in a
    /// lower layer may be a defect from the caller's point of view and vice versa.
    ///
    /// Fatal failures (or failures with a fatal cause) are returned untouched, and nothing
    /// can be re-kinded to hide one.
    pub fn translate_as(
        self,
        domain: Domain,
        kind: FailureKind,
        subkind: Option<Subkind>,
        message: impl Into<String>,
    ) -> Failure {
        if self.carries_fatal() {
            return self;
        }
        Failure {
            kind,
            subkind,
            domain,
            message: message.into(),
            cause: Some(Box::new(self)),
        }
    }

    /// Iterate over this failure and every cause beneath it, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    pub fn root_cause(&self) -> &Failure {
        self.chain().last().unwrap_or(self)
    }

    /// True when any failure in the chain (including `self`) satisfies `pred`.
    pub fn any_in_chain(&self, pred: impl Fn(&Failure) -> bool) -> bool {
        self.chain().any(pred)
    }

    /// Single-line rendering of the whole chain, e.g. for a final report.
    pub fn display_chain(&self) -> String {
        self.chain()
            .map(|f| format!("[{}/{}] {}", f.domain, f.kind, f.message))
            .collect::<Vec<_>>()
            .join(" <- caused by: ")
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

pub struct Chain<'a> {
    next: Option<&'a Failure>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Failure;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn storage_not_found() -> Failure {
        Failure::external("resource `orders.txt` not found")
            .with_subkind(Subkind::NOT_FOUND)
            .in_domain(Domain::STORAGE)
    }

    #[test]
    fn translate_rehomes_and_keeps_cause() {
        let translated = storage_not_found().translate(Domain::REPOSITORY, "no such record");

        assert_eq!(translated.domain(), &Domain::REPOSITORY);
        assert_eq!(translated.kind(), FailureKind::RecoverableExternal);
        assert_eq!(translated.subkind(), Some(&Subkind::NOT_FOUND));
        let cause = translated.cause().expect("cause retained");
        assert_eq!(cause.message(), "resource `orders.txt` not found");
        assert_eq!(cause.domain(), &Domain::STORAGE);
    }

    #[test]
    fn translate_leaves_fatal_untouched() {
        let fatal = Failure::fatal("heap exhausted")
            .with_subkind(Subkind::OUT_OF_MEMORY)
            .in_domain(Domain::STORAGE);
        let after = fatal.clone().translate_as(
            Domain::REPOSITORY,
            FailureKind::RecoverableExternal,
            None,
            "try again later",
        );
        assert_eq!(after, fatal);
    }

    #[test]
    fn fatal_cause_is_not_wrapped() {
        let fatal = Failure::fatal("heap exhausted").in_domain(Domain::RUNTIME);
        let built = Failure::external("retry later").caused_by(fatal.clone());
        assert_eq!(built, fatal);
        assert!(built.carries_fatal());

        let plain = Failure::external("retry later").caused_by(storage_not_found());
        assert!(!plain.carries_fatal());
        assert_eq!(plain.cause(), Some(&storage_not_found()));
    }

    #[test]
    fn chain_walks_outermost_first() {
        let top = storage_not_found()
            .translate(Domain::REPOSITORY, "no such record")
            .translate(Domain::CLI, "could not open order book");

        let domains: Vec<_> = top.chain().map(|f| f.domain().as_str().to_string()).collect();
        assert_eq!(domains, vec!["cli", "repository", "storage"]);
        assert_eq!(top.root_cause().message(), "resource `orders.txt` not found");
        assert!(top.any_in_chain(|f| f.domain() == &Domain::STORAGE));
    }

    #[test]
    fn source_matches_cause() {
        use std::error::Error as _;
        let top = storage_not_found().translate(Domain::REPOSITORY, "no such record");
        let source = top.source().expect("source");
        assert_eq!(source.to_string(), "resource `orders.txt` not found");
    }

    #[test]
    fn display_chain_names_every_layer() {
        let top = storage_not_found().translate(Domain::REPOSITORY, "no such record");
        assert_eq!(
            top.display_chain(),
            "[repository/recoverable-external] no such record <- caused by: \
             [storage/recoverable-external] resource `orders.txt` not found"
        );
    }
}
