//! Assigning exactly one [`FailureKind`] to a failure site.
//!
//! Classification is a pure function of the value being classified, so asking twice
//! always gives the same answer. Layers implement [`Classify`] for their own error types
//! and get a [`Failure`] out of [`Classify::to_failure`].
use std::io;
use std::num::{ParseFloatError, ParseIntError, TryFromIntError};

use super::{Domain, Failure, FailureKind, Subkind};

pub trait Classify {
    fn kind(&self) -> FailureKind;

    fn subkind(&self) -> Option<Subkind> {
        None
    }

    /// Build a failure in `domain` carrying this site's kind, subkind and Display text.
    fn to_failure(&self, domain: Domain) -> Failure
    where
        Self: std::fmt::Display,
    {
        let failure = Failure::new(self.kind(), self.to_string()).in_domain(domain);
        match self.subkind() {
            Some(subkind) => failure.with_subkind(subkind),
            None => failure,
        }
    }
}

impl Classify for Failure {
    fn kind(&self) -> FailureKind {
        Failure::kind(self)
    }

    fn subkind(&self) -> Option<Subkind> {
        Failure::subkind(self).cloned()
    }
}

impl Classify for io::ErrorKind {
    fn kind(&self) -> FailureKind {
        use io::ErrorKind::*;
        match self {
            OutOfMemory => FailureKind::Fatal,
            InvalidInput | Unsupported => FailureKind::ProgrammingDefect,
            _ => FailureKind::RecoverableExternal,
        }
    }

    fn subkind(&self) -> Option<Subkind> {
        use io::ErrorKind::*;
        let subkind = match self {
            OutOfMemory => Subkind::OUT_OF_MEMORY,
            NotFound => Subkind::NOT_FOUND,
            PermissionDenied => Subkind::PERMISSION_DENIED,
            ConnectionRefused | ConnectionReset | ConnectionAborted | NotConnected
            | BrokenPipe | AddrNotAvailable => Subkind::UNREACHABLE,
            AddrInUse => Subkind::ADDRESS_IN_USE,
            InvalidData | UnexpectedEof => Subkind::MALFORMED_INPUT,
            Interrupted => Subkind::INTERRUPTED,
            TimedOut | WouldBlock => Subkind::TIMED_OUT,
            InvalidInput => Subkind::INVALID_ARGUMENT,
            Unsupported => Subkind::UNSUPPORTED,
            _ => Subkind::IO,
        };
        Some(subkind)
    }
}

impl Classify for io::Error {
    fn kind(&self) -> FailureKind {
        self.kind().kind()
    }

    fn subkind(&self) -> Option<Subkind> {
        io::Error::kind(self).subkind()
    }
}

impl From<io::Error> for Failure {
    fn from(e: io::Error) -> Failure {
        e.to_failure(Domain::UNSPECIFIED)
    }
}

// Text that failed to parse came from outside the program.
impl Classify for ParseIntError {
    fn kind(&self) -> FailureKind {
        FailureKind::RecoverableExternal
    }

    fn subkind(&self) -> Option<Subkind> {
        Some(Subkind::MALFORMED_INPUT)
    }
}

impl Classify for ParseFloatError {
    fn kind(&self) -> FailureKind {
        FailureKind::RecoverableExternal
    }

    fn subkind(&self) -> Option<Subkind> {
        Some(Subkind::MALFORMED_INPUT)
    }
}

// A narrowing conversion the caller did not guard.
impl Classify for TryFromIntError {
    fn kind(&self) -> FailureKind {
        FailureKind::ProgrammingDefect
    }

    fn subkind(&self) -> Option<Subkind> {
        Some(Subkind::INVALID_CAST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefectError, ExternalError, FatalError};

    #[test]
    fn io_kinds_map_to_the_taxonomy() {
        assert_eq!(io::ErrorKind::NotFound.kind(), FailureKind::RecoverableExternal);
        assert_eq!(io::ErrorKind::OutOfMemory.kind(), FailureKind::Fatal);
        assert_eq!(io::ErrorKind::InvalidInput.kind(), FailureKind::ProgrammingDefect);
        assert_eq!(
            io::ErrorKind::ConnectionRefused.subkind(),
            Some(Subkind::UNREACHABLE)
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let sites: Vec<Box<dyn Fn() -> Failure>> = vec![
            Box::new(|| io::Error::new(io::ErrorKind::NotFound, "gone").into()),
            Box::new(|| ExternalError::not_found("a.txt").into()),
            Box::new(|| DefectError::OutOfBounds { index: 5, len: 3 }.into()),
            Box::new(|| FatalError::ShutdownInitiated.into()),
            Box::new(|| {
                let e = "abc".parse::<i32>().unwrap_err();
                e.to_failure(Domain::UNSPECIFIED)
            }),
        ];
        for site in &sites {
            let first = site();
            for _ in 0..3 {
                let again = site();
                assert_eq!(first.kind(), again.kind());
                assert_eq!(first.subkind(), again.subkind());
                // Classifying an already-built failure is a fixed point.
                assert_eq!(Classify::kind(&again), first.kind());
            }
        }
    }

    #[test]
    fn parse_failures_are_external() {
        let e = "twelve".parse::<u32>().unwrap_err();
        let failure = e.to_failure(Domain::REPOSITORY);
        assert!(failure.is(
            FailureKind::RecoverableExternal,
            Some(&Subkind::MALFORMED_INPUT)
        ));
        assert_eq!(failure.domain(), &Domain::REPOSITORY);
    }

    #[test]
    fn narrowing_failures_are_defects() {
        let e = u8::try_from(300_i32).unwrap_err();
        assert_eq!(e.kind(), FailureKind::ProgrammingDefect);
    }
}
