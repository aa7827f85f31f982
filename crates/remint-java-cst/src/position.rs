//! Position tracking: resolving nodes to byte spans and line/column.
//!
//! The front end supplies a [`PositionLookup`] service; the oracle
//! ([`resolve`]) turns it into a [`Position`] for a node, or the explicit
//! [`Position::INVALID`] sentinel when the node cannot be resolved
//! (synthesized nodes, documentation-comment nodes the front end does not
//! track). Absence of position information is a normal, representable
//! state, never an error.

use std::collections::HashMap;
use std::fmt;

use remint_core::{LineMap, Span};
use serde::{Deserialize, Serialize};

use crate::parse::ParsedId;

/// A resolved source position: byte offsets plus 1-indexed line/column.
///
/// All four fields are `-1` for the [`Position::INVALID`] sentinel;
/// [`Position::is_valid`] requires all four to be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Start byte offset (inclusive), or -1.
    pub start: i64,
    /// End byte offset (exclusive), or -1.
    pub end: i64,
    /// 1-indexed line of `start`, or -1.
    pub line: i64,
    /// 1-indexed column of `start`, or -1.
    pub column: i64,
}

impl Position {
    /// The unresolvable sentinel.
    pub const INVALID: Position = Position {
        start: -1,
        end: -1,
        line: -1,
        column: -1,
    };

    /// Build a position from a byte span, deriving line/column from the
    /// unit's line map.
    pub fn from_span(span: Span, line_map: &LineMap) -> Position {
        let (line, column) = line_map.line_col(span.start);
        Position {
            start: span.start as i64,
            end: span.end as i64,
            line: i64::from(line),
            column: i64::from(column),
        }
    }

    /// A position is valid only when all four fields are non-negative.
    pub fn is_valid(&self) -> bool {
        self.start >= 0 && self.end >= 0 && self.line >= 0 && self.column >= 0
    }

    /// Length of the spanned source text in bytes.
    pub fn length(&self) -> i64 {
        self.end - self.start
    }

    /// The byte range for slicing the original text, if valid.
    pub fn byte_range(&self) -> Option<std::ops::Range<usize>> {
        if self.is_valid() {
            Some(self.start as usize..self.end as usize)
        } else {
            None
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::INVALID
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S: {}, E: {}, L: {}, C: {}",
            self.start, self.end, self.line, self.column
        )
    }
}

/// The position service the front end supplies alongside the parse tree.
///
/// Implementations report the byte span a parsed node covers in the
/// original text, or `None` when they do not track one.
pub trait PositionLookup {
    /// Byte span of the given parsed node, if recorded.
    fn span_of(&self, id: ParsedId) -> Option<Span>;
}

/// A table of parsed-node spans, the usual [`PositionLookup`] backing.
///
/// Front ends insert one entry per node whose source position matters;
/// nodes without entries resolve to [`Position::INVALID`].
#[derive(Debug, Default)]
pub struct SpanMap {
    spans: HashMap<ParsedId, Span>,
}

impl SpanMap {
    /// Create an empty span map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a span for a parsed node.
    pub fn insert(&mut self, id: ParsedId, span: Span) {
        self.spans.insert(id, span);
    }

    /// Whether a span is recorded for the node.
    pub fn contains(&self, id: ParsedId) -> bool {
        self.spans.contains_key(&id)
    }

    /// Number of recorded spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

impl PositionLookup for SpanMap {
    fn span_of(&self, id: ParsedId) -> Option<Span> {
        self.spans.get(&id).copied()
    }
}

/// The position oracle: resolve an optional parsed-tree handle to a
/// [`Position`]. Never fails; unresolvable handles yield the sentinel.
pub fn resolve(
    lookup: &dyn PositionLookup,
    line_map: &LineMap,
    original: Option<ParsedId>,
) -> Position {
    match original.and_then(|id| lookup.span_of(id)) {
        Some(span) => Position::from_span(span, line_map),
        None => Position::INVALID,
    }
}
