//! Coarse-grained classification of failures.
//!
//! Typical mappings:
//! - RecoverableExternal: the world got in the way (missing file, endpoint down, bad input)
//!   and the caller knows a remedy
//! - ProgrammingDefect: the calling code broke a precondition; the fix is a code change
//! - Fatal: the process cannot continue; observe and terminate
use std::fmt;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    RecoverableExternal,
    ProgrammingDefect,
    Fatal,
}

impl FailureKind {
    /// Whether every boundary between origin and handler must signal this kind explicitly.
    pub fn must_declare(self) -> bool {
        matches!(self, FailureKind::RecoverableExternal)
    }

    pub fn is_fatal(self) -> bool {
        matches!(self, FailureKind::Fatal)
    }

    /// Ordering used when several classifiers disagree: the most severe wins.
    pub fn rank(self) -> u8 {
        match self {
            FailureKind::RecoverableExternal => 0,
            FailureKind::ProgrammingDefect => 1,
            FailureKind::Fatal => 2,
        }
    }

    /// Returns whichever of the two kinds is more severe.
    pub fn escalate(self, other: FailureKind) -> FailureKind {
        if other.rank() > self.rank() { other } else { self }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::RecoverableExternal => "recoverable-external",
            FailureKind::ProgrammingDefect => "programming-defect",
            FailureKind::Fatal => "fatal",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
