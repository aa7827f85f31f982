//! A lossless Java syntax tree and selective-regeneration engine.
//!
//! remint rewrites structured program text without disturbing what it does
//! not touch: load a parsed syntax tree, mutate fields through a generic
//! name-keyed surface, then re-emit text that is byte-identical to the
//! input everywhere nothing changed and freshly printed everywhere
//! something did — including clean deletion of individual elements from
//! lists, with no dangling punctuation.
//!
//! # Overview
//!
//! - **Analysis**: [`analyze`] instantiates the node tree from an external
//!   front end's [`ParseInput`] (parse tree + position lookup + text).
//! - **Mutation**: [`Unit::get`] / [`Unit::set`] expose each node's fixed
//!   property enumeration; setters escalate the node and its ancestors to
//!   `Changed` eagerly, so saving stays a pure read pass.
//! - **Rendering**: [`Unit::render`] copies `Unmodified` nodes verbatim
//!   from their recorded spans and dispatches `Changed` nodes to their
//!   structural printers; `Ignored` nodes vanish cleanly.
//!
//! # Quick start
//!
//! ```
//! use remint_core::Span;
//! use remint_java_cst::{
//!     analyze, ParseInput, ParsedNode, ParsedTree, PropertyValue, RenderOptions, SpanMap,
//! };
//!
//! // A front end hands over the parse tree, the positions, and the text.
//! let source = "import a.b;\n";
//! let mut tree = ParsedTree::default();
//! let a = tree.alloc(ParsedNode::Identifier { name: "a".to_string() });
//! let ab = tree.alloc(ParsedNode::FieldAccess { expression: a, name: "b".to_string() });
//! let import = tree.alloc(ParsedNode::Import { is_static: false, qualified: ab });
//! let root = tree.alloc(ParsedNode::CompilationUnit {
//!     package: None,
//!     imports: vec![import],
//!     module: None,
//!     types: vec![],
//! });
//! let mut positions = SpanMap::new();
//! positions.insert(a, Span::new(7, 8));
//! positions.insert(ab, Span::new(7, 10));
//! positions.insert(import, Span::new(0, 11));
//!
//! let mut unit = analyze(
//!     ParseInput {
//!         source: source.to_string(),
//!         tree,
//!         root,
//!         positions,
//!         file_name: None,
//!     },
//!     RenderOptions::default(),
//! );
//!
//! // Untouched units re-emit byte-for-byte.
//! assert_eq!(unit.render().unwrap().as_deref(), Some(source));
//!
//! // Mutations re-print exactly what they touch.
//! let imports = unit.get(unit.root(), "imports").unwrap();
//! let PropertyValue::Nodes(imports) = imports else { unreachable!() };
//! unit.set(imports[0], "staticImport", PropertyValue::Bool(true)).unwrap();
//! let name = unit.new_qualified_name("c.d.e");
//! unit.set(imports[0], "qualifiedIdentifier", PropertyValue::Node(name)).unwrap();
//! assert_eq!(
//!     unit.render().unwrap().as_deref(),
//!     Some("import static c.d.e;\n")
//! );
//! ```

mod analyze;
mod contract;
mod error;
mod node;
mod parse;
mod position;
mod printer;
mod property;
mod style;
mod tree;
mod unit;

pub use analyze::analyze;
pub use contract::{Action, IGNORE_ANNOTATION};
pub use error::{MutationError, SaveError, WriteError};
pub use node::{Kind, LiteralValue, Modifier, Node, NodeData, NodeId};
pub use parse::{ParseInput, ParsedId, ParsedNode, ParsedTree};
pub use position::{resolve as resolve_position, Position, PositionLookup, SpanMap};
pub use property::{property_names, PropertyValue};
pub use style::{Keyword, NewlineStyle, RenderOptions, StyleWriter};
pub use unit::Unit;

// Spans come from remint-core; re-exported here so front ends only need
// one dependency.
pub use remint_core::Span;
