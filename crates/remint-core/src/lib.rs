//! Core infrastructure shared across the remint workspace.
//!
//! This crate holds the primitives the rewriting engine is built on:
//!
//! - [`span::Span`]: half-open byte ranges into UTF-8 source text
//! - [`text`]: byte offset to line/column conversions and the [`text::LineMap`]
//!
//! Nothing in here knows about Java or about syntax trees; the engine crate
//! (`remint-java-cst`) layers the node model on top of these types.

pub mod span;
pub mod text;

pub use span::Span;
pub use text::LineMap;
