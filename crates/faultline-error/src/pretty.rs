//! Structured, log-friendly pretty-print helpers.
//!
//! Gated behind the `serde` feature to avoid pulling serialization dependencies into
//! consumers that don't need them.

#![cfg(feature = "serde")]

use serde::Serialize;

use super::{Failure, FailureKind};

/// Provide a structured view of a failure or diagnostic for logging/UI.
///
/// Implementors expose a lightweight set of serializable fields; callers can
/// choose between the raw fields, a `serde_json::Value`, or a pretty JSON
/// string for human consumption.
pub trait PrettyDebug {
    type Fields<'a>: Serialize + 'a
    where
        Self: 'a;

    /// Return the structured fields, if available.
    fn fields(&self) -> Option<Self::Fields<'_>>;

    /// Convert fields to a JSON value without pretty whitespace.
    fn to_value(&self) -> Option<serde_json::Value> {
        self.fields().and_then(|f| serde_json::to_value(&f).ok())
    }

    /// Convert fields to a pretty JSON string (for logs or UI).
    fn pretty_json(&self) -> Option<String> {
        self.fields()
            .and_then(|f| serde_json::to_string_pretty(&f).ok())
    }
}

#[derive(Debug, Serialize)]
pub struct FailureFields<'a> {
    pub kind: FailureKind,
    pub subkind: Option<&'a str>,
    pub domain: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<FailureFields<'a>>>,
}

impl<'a> FailureFields<'a> {
    fn of(failure: &'a Failure) -> Self {
        FailureFields {
            kind: failure.kind(),
            subkind: failure.subkind().map(|s| s.as_str()),
            domain: failure.domain().as_str(),
            message: failure.message(),
            cause: failure.cause().map(|c| Box::new(FailureFields::of(c))),
        }
    }
}

impl PrettyDebug for Failure {
    type Fields<'a> = FailureFields<'a>;

    fn fields(&self) -> Option<Self::Fields<'_>> {
        Some(FailureFields::of(self))
    }
}
