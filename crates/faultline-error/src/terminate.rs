//! The outermost boundary: where unhandled failures are reported and the process ends.
use std::any::Any;
use std::panic::UnwindSafe;
use std::process::ExitCode;

use super::{DefectError, ErrorPolicy, Failure, FailureKind, Result};

/// Process exit status per failure kind.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExitCodes {
    pub external: u8,
    pub defect: u8,
    pub fatal: u8,
}

impl Default for ExitCodes {
    fn default() -> Self {
        // 70 and 71 are EX_SOFTWARE and EX_OSERR from sysexits.h
        Self {
            external: 1,
            defect: 70,
            fatal: 71,
        }
    }
}

impl ExitCodes {
    pub fn for_kind(&self, kind: FailureKind) -> u8 {
        match kind {
            FailureKind::RecoverableExternal => self.external,
            FailureKind::ProgrammingDefect => self.defect,
            FailureKind::Fatal => self.fatal,
        }
    }
}

/// Turn the result of a program's top-level work into an exit code, reporting the
/// failure through `policy` first.
pub fn conclude<T>(result: Result<T>, policy: &impl ErrorPolicy, codes: &ExitCodes) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(failure) => {
            policy.emit(&failure);
            ExitCode::from(exit_status(&failure, policy, codes))
        }
    }
}

/// The status a failure reaching the top ends the process with.
pub fn exit_status(failure: &Failure, policy: &impl ErrorPolicy, codes: &ExitCodes) -> u8 {
    codes.for_kind(policy.classify(failure))
}

/// Best-effort emission, then exit. The only thing allowed to happen to a fatal failure.
pub fn observe_and_exit(failure: &Failure, policy: &impl ErrorPolicy, codes: &ExitCodes) -> ! {
    policy.emit(failure);
    std::process::exit(i32::from(exit_status(failure, policy, codes)))
}

/// Pass non-fatal results through; a fatal failure ends the process on the spot.
pub fn exit_on_fatal<T>(
    result: Result<T>,
    policy: &impl ErrorPolicy,
    codes: &ExitCodes,
) -> Result<T> {
    match result {
        Err(failure) if policy.classify(&failure).is_fatal() => {
            observe_and_exit(&failure, policy, codes)
        }
        other => other,
    }
}

/// Run `f`, turning a panic into a programming-defect failure.
pub fn catch_defect<T>(f: impl FnOnce() -> T + UnwindSafe) -> Result<T> {
    std::panic::catch_unwind(f)
        .map_err(|payload| DefectError::Panicked(panic_message(&*payload)).into())
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoopPolicy, Subkind};

    #[test]
    fn exit_status_follows_kind() {
        let codes = ExitCodes::default();
        let status = |f: Failure| exit_status(&f, &NoopPolicy, &codes);
        assert_eq!(status(Failure::external("missing")), 1);
        assert_eq!(status(Failure::defect("bad index")), 70);
        assert_eq!(status(Failure::fatal("oom")), 71);

        let custom = ExitCodes {
            external: 2,
            ..ExitCodes::default()
        };
        assert_eq!(exit_status(&Failure::external("x"), &NoopPolicy, &custom), 2);
    }

    #[test]
    fn exit_on_fatal_passes_other_failures() {
        let codes = ExitCodes::default();
        let r: Result<()> = Err(Failure::external("offline"));
        assert!(exit_on_fatal(r, &NoopPolicy, &codes).is_err());
        assert_eq!(exit_on_fatal(Ok(3), &NoopPolicy, &codes).unwrap(), 3);
    }

    #[test]
    fn panics_become_defects() {
        let err = catch_defect(|| -> u32 { panic!("worker exploded") }).unwrap_err();
        assert!(err.is(FailureKind::ProgrammingDefect, Some(&Subkind::PANICKED)));
        assert_eq!(err.message(), "Unit of work panicked: worker exploded");

        let owned = catch_defect(|| -> u32 { panic!("{} items left", 3) }).unwrap_err();
        assert_eq!(owned.message(), "Unit of work panicked: 3 items left");

        assert_eq!(catch_defect(|| 5).unwrap(), 5);
    }
}
