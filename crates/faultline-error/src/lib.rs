//! Failure classification and propagation.
//!
//! Every failure is one of three kinds ([`FailureKind`]): fatal, recoverable-external, or
//! a programming defect. Each call boundary then handles, defers, or translates it
//! ([`propagate`]), and whatever reaches the top is reported by [`terminate`].
pub mod classify;
pub mod defect;
pub mod domain;
pub mod external;
pub mod failure;
pub mod fatal;
pub mod kind;
pub mod policy;
pub mod pretty;
pub mod propagate;
pub mod result_ext;
pub mod subkind;
pub mod terminate;

// public exports
pub use classify::Classify;
pub use defect::{DefectError, checked_div};
pub use domain::Domain;
pub use external::ExternalError;
pub use failure::{Chain, Failure};
pub use fatal::FatalError;
pub use kind::FailureKind;
#[cfg(feature = "diagnostic")]
pub use policy::MiettePolicy;
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use policy::{CombinedPolicy, ErrorPolicy, NoopPolicy};
#[cfg(feature = "serde")]
pub use pretty::PrettyDebug;
pub use propagate::{Admission, Boundary, Disposition, PropagateExt, PropagationPolicy};
pub use result_ext::{IterResultExt, ResultExt};
pub use subkind::Subkind;
pub use terminate::{
    ExitCodes, catch_defect, conclude, exit_on_fatal, exit_status, observe_and_exit, panic_message,
};

// common imports for submodules
use std::path::PathBuf;

pub type Result<T, E = Failure> = std::result::Result<T, E>;
