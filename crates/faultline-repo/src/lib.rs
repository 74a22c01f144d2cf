//! faultline-repo: records on top of a `faultline_store::Store`.
//!
//! This crate is an abstraction boundary. Callers see [`RepoError`] (or, through `?`, a
//! `faultline_error::Failure` in the `repository` domain) and never a storage error of
//! the backend underneath, except as the diagnostic cause.
pub mod error;
pub mod repository;

pub use error::RepoError;
pub use repository::Repository;
