//! The render-state contract every node obeys.
//!
//! # Action state machine
//!
//! Each node carries an [`Action`] that decides how it is emitted:
//!
//! - `Unmodified`: the node's original source bytes are copied verbatim.
//! - `Changed`: the node is re-printed structurally from its fields.
//! - `Ignored`: the node is omitted from output entirely.
//!
//! Transitions are monotonic within one mutation session:
//! `Unmodified -> Changed -> Ignored`, never backward. The variant order
//! below encodes that: escalation is a `max`.

use serde::{Deserialize, Serialize};

/// Per-node render state.
///
/// The derived `Ord` follows escalation order; [`Action::escalate`] relies
/// on it to make every transition forward-only.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Action {
    /// Untouched since analysis; eligible for verbatim copy.
    #[default]
    Unmodified,
    /// Mutated (or synthesized); re-printed from fields.
    Changed,
    /// Excluded from output.
    Ignored,
}

impl Action {
    /// Whether this node takes the structural-printer path.
    pub fn is_changed(&self) -> bool {
        *self == Action::Changed
    }

    /// Whether this node is omitted from output.
    pub fn is_ignored(&self) -> bool {
        *self == Action::Ignored
    }

    /// Monotonic transition: moves forward to `target` or stays put.
    #[must_use]
    pub fn escalate(self, target: Action) -> Action {
        self.max(target)
    }
}

/// Qualified name of the marker annotation that excludes a declaration at
/// analysis time. A declaration whose modifiers carry this annotation is
/// escalated straight to [`Action::Ignored`] before any mutation runs.
pub const IGNORE_ANNOTATION: &str = "Remint.Ignore";
