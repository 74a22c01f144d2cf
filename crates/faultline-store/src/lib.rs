//! faultline-store: the storage layer.
//!
//! Resources are named blobs of UTF-8 text. Two backends are provided:
//! - [`FsStore`]: one file per resource under a root directory, written with
//!   temp-write + rename.
//! - [`MemoryStore`]: a `DashMap`, with armable faults for exercising callers.
//!
//! Errors are storage-specific ([`StoreError`]). They convert into
//! `faultline_error::Failure` in the `storage` domain; callers one level up are expected
//! to translate them into their own domain rather than pass them through.
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use faultline_error::{Classify, Domain, Failure, FailureKind, Subkind};
use thiserror::Error;

pub mod errors;
pub mod fs;
pub mod memory;
mod name_policy;

pub use errors::StoreError;
pub use fs::FsStore;
pub use memory::MemoryStore;

pub trait Store: Send + Sync {
    /// Short backend label for logs.
    fn backend(&self) -> &'static str;

    fn read(&self, name: &str) -> impl Future<Output = Result<String, StoreError>> + Send;

    fn write(
        &self,
        name: &str,
        contents: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn remove(&self, name: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn list(&self) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}
