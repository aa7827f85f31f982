//! Error types for the engine's three failure families.
//!
//! - [`SaveError`]: rendering cannot proceed without violating a model
//!   guarantee. Fatal for the current save pass; nothing partial is left
//!   in the caller's output.
//! - [`MutationError`]: the name-keyed mutation surface rejected a call.
//!   The tree is left exactly as it was.
//! - [`WriteError`]: file output failed. Aborts only the current unit's
//!   write; other units are unaffected.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::node::Kind;

/// Rendering failures.
#[derive(Debug, Error)]
pub enum SaveError {
    /// A discriminant reached a printer with no table entry. The node
    /// model and the printer tables have drifted out of sync; this is a
    /// bug, not a user-recoverable condition.
    #[error("no printer entry for kind {kind:?} in the {table} table")]
    InvalidKind { kind: Kind, table: &'static str },

    /// A model guarantee did not hold at save time (an unmodified node
    /// without a valid source span, or a required field that is absent).
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },
}

impl SaveError {
    /// Create an [`SaveError::InvariantViolation`].
    pub fn invariant(message: impl Into<String>) -> Self {
        SaveError::InvariantViolation {
            message: message.into(),
        }
    }
}

/// Mutation-surface failures. Every variant leaves the tree unmodified.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MutationError {
    /// The property name is not in this kind's fixed enumeration.
    #[error("kind {kind:?} has no property named '{name}'")]
    UnknownProperty { kind: Kind, name: String },

    /// The supplied value has the wrong shape for the property.
    #[error("property '{name}' on kind {kind:?} expects {expected}, got {given}")]
    TypeMismatch {
        kind: Kind,
        name: String,
        expected: &'static str,
        given: &'static str,
    },

    /// The supplied kind is outside the closed set a slot accepts.
    #[error("kind {kind:?} is not supported: {message}")]
    UnsupportedKind { kind: Kind, message: String },
}

/// File-output failures of the unit orchestrator.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The target path exists and is a directory.
    #[error("cannot write to {}: it is a directory", path.display())]
    TargetIsDirectory { path: PathBuf },

    /// The target's parent exists but is not a directory.
    #[error("cannot write to {}: {} is not a directory", path.display(), parent.display())]
    ParentNotADirectory { path: PathBuf, parent: PathBuf },

    /// The target's parent directory could not be created.
    #[error("cannot create {}: {source}", path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Writing the target failed (missing permission, read-only file, ...).
    #[error("cannot write to {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// Rendering failed before any file was touched.
    #[error(transparent)]
    Save(#[from] SaveError),
}
