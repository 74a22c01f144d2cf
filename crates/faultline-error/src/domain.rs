use std::borrow::Cow;
use std::fmt;

/// The abstraction level a failure belongs to.
///
/// Translation at a boundary always re-homes a failure into the caller's domain.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Domain(Cow<'static, str>);

impl Domain {
    pub const UNSPECIFIED: Domain = Domain::named("unspecified");
    pub const STORAGE: Domain = Domain::named("storage");
    pub const REPOSITORY: Domain = Domain::named("repository");
    pub const CLI: Domain = Domain::named("cli");
    pub const RUNTIME: Domain = Domain::named("runtime");

    pub const fn named(name: &'static str) -> Self {
        Domain(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Domain(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Domain {
    fn default() -> Self {
        Domain::UNSPECIFIED
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
