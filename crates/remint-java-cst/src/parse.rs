//! The front-end boundary: the foreign parse tree the engine consumes.
//!
//! remint does not parse Java itself. An external front end produces a
//! [`ParsedTree`] of [`ParsedNode`] records, a [`SpanMap`] (or any other
//! [`crate::PositionLookup`]) for position tracking, and the unit's full
//! original text; the three arrive together as a [`ParseInput`]. The
//! analyzer walks this tree exactly once, top-down, and never touches it
//! again afterwards.
//!
//! `ParsedNode` is a closed interchange enumeration: one variant per
//! supported grammar construct, holding child handles and token values
//! only. No semantic information crosses this boundary.

use la_arena::{Arena, Idx};

use crate::node::{Kind, LiteralValue, Modifier};
use crate::position::SpanMap;

/// Stable handle to a node of the foreign parse tree.
pub type ParsedId = Idx<ParsedNode>;

/// Arena holding one parsed compilation unit's nodes.
pub type ParsedTree = Arena<ParsedNode>;

/// One node of the foreign parse tree.
///
/// Child order within each variant is source order; the analyzer preserves
/// it when instantiating the engine's own nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedNode {
    /// The root of a unit: package, imports, module, type declarations.
    CompilationUnit {
        package: Option<ParsedId>,
        imports: Vec<ParsedId>,
        module: Option<ParsedId>,
        types: Vec<ParsedId>,
    },
    /// `package a.b.c;`
    Package { name: ParsedId },
    /// `import [static] a.b.C;` (or `a.b.*`; the name is opaque here).
    Import {
        is_static: bool,
        qualified: ParsedId,
    },
    /// A class-like declaration. `kind` is one of the class-decl kinds
    /// (class, enum, interface, record, annotation type).
    ClassDecl {
        kind: Kind,
        modifiers: Option<ParsedId>,
        name: String,
        type_parameters: Vec<ParsedId>,
        extends: Option<ParsedId>,
        implements: Vec<ParsedId>,
        permits: Vec<ParsedId>,
        members: Vec<ParsedId>,
    },
    /// `module a.b { ... }` header; directives are not modeled.
    Module { name: ParsedId },
    /// Modifier flags plus annotations, in source order.
    Modifiers {
        flags: Vec<Modifier>,
        annotations: Vec<ParsedId>,
    },
    /// `@Type(args...)`
    Annotation {
        annotation_type: ParsedId,
        arguments: Vec<ParsedId>,
    },
    /// `T extends A & B` (bounds may be empty).
    TypeParameter { name: String, bounds: Vec<ParsedId> },
    /// A simple name.
    Identifier { name: String },
    /// `expression.name`
    FieldAccess { expression: ParsedId, name: String },
    /// A literal token; the value decides the literal kind.
    Literal { value: LiteralValue },
    /// `A | B` in a catch clause.
    UnionType { alternatives: Vec<ParsedId> },
    /// `{ ... }`, optionally a static initializer.
    Block {
        is_static: bool,
        statements: Vec<ParsedId>,
    },
    /// `synchronized (expression) block`
    Synchronized { expression: ParsedId, block: ParsedId },
}

/// Everything the front end hands over for one compilation unit.
pub struct ParseInput {
    /// The unit's full original text.
    pub source: String,
    /// The foreign parse tree.
    pub tree: ParsedTree,
    /// Root of the tree; must be a [`ParsedNode::CompilationUnit`].
    pub root: ParsedId,
    /// Position service for the tree's nodes.
    pub positions: SpanMap,
    /// Simple file name of the unit (e.g. `Foo.java`), when known.
    pub file_name: Option<String>,
}
