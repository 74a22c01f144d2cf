use std::borrow::Cow;
use std::fmt;

/// Open refinement of [`crate::FailureKind`].
///
/// Handlers match on the kind first and, when they need to, on the subkind. The set is
/// open: layers may mint their own with [`Subkind::new`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subkind(Cow<'static, str>);

impl Subkind {
    // fatal
    pub const OUT_OF_MEMORY: Subkind = Subkind::named("out-of-memory");
    pub const STACK_OVERFLOW: Subkind = Subkind::named("stack-overflow");
    pub const INITIALIZATION: Subkind = Subkind::named("initialization");
    pub const CORRUPTED_INVARIANT: Subkind = Subkind::named("corrupted-invariant");
    pub const ENVIRONMENT: Subkind = Subkind::named("environment");
    pub const SHUTDOWN: Subkind = Subkind::named("shutdown");

    // recoverable external
    pub const NOT_FOUND: Subkind = Subkind::named("not-found");
    pub const PERMISSION_DENIED: Subkind = Subkind::named("permission-denied");
    pub const UNREACHABLE: Subkind = Subkind::named("unreachable");
    pub const ADDRESS_IN_USE: Subkind = Subkind::named("address-in-use");
    pub const MALFORMED_INPUT: Subkind = Subkind::named("malformed-input");
    pub const INTERRUPTED: Subkind = Subkind::named("interrupted");
    pub const TIMED_OUT: Subkind = Subkind::named("timed-out");
    pub const IO: Subkind = Subkind::named("io");

    // programming defect
    pub const INVALID_ARGUMENT: Subkind = Subkind::named("invalid-argument");
    pub const OUT_OF_BOUNDS: Subkind = Subkind::named("out-of-bounds");
    pub const NULL_REFERENCE: Subkind = Subkind::named("null-reference");
    pub const INVALID_CAST: Subkind = Subkind::named("invalid-cast");
    pub const DIVISION_BY_ZERO: Subkind = Subkind::named("division-by-zero");
    pub const ILLEGAL_STATE: Subkind = Subkind::named("illegal-state");
    pub const UNSUPPORTED: Subkind = Subkind::named("unsupported");
    pub const NO_SUCH_ELEMENT: Subkind = Subkind::named("no-such-element");
    pub const CONCURRENT_MODIFICATION: Subkind = Subkind::named("concurrent-modification");
    pub const PANICKED: Subkind = Subkind::named("panicked");

    pub const fn named(name: &'static str) -> Self {
        Subkind(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Subkind(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subkind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
