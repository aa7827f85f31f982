//! The node model: kinds, modifier tokens, literal values, and the
//! arena-allocated [`Node`] record itself.
//!
//! Every syntax element is one [`Node`] owning kind-specific fields
//! ([`NodeData`]) whose children are [`NodeId`] handles into the unit's
//! arena. The parent link is the single permitted non-owning back-edge;
//! everything else is exclusive ownership (a child belongs to exactly one
//! parent slot at a time).

use la_arena::Idx;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::contract::Action;
use crate::parse::ParsedId;
use crate::position::Position;

/// Stable handle to a node in a unit's arena.
pub type NodeId = Idx<Node>;

/// Closed discriminant enumeration of the supported node kinds.
///
/// Class-like declarations report their concrete kind (`Class`, `Enum`,
/// `Interface`, `Record`, `AnnotationType`); literals report the kind of
/// their current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    CompilationUnit,
    Package,
    Import,
    Module,
    Class,
    Enum,
    Interface,
    Record,
    AnnotationType,
    Modifiers,
    Annotation,
    TypeParameter,
    Identifier,
    FieldAccess,
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    BooleanLiteral,
    CharLiteral,
    StringLiteral,
    NullLiteral,
    UnionType,
    Block,
    Synchronized,
}

impl Kind {
    /// Whether this kind is a class-like declaration.
    pub fn is_class_decl(&self) -> bool {
        matches!(
            self,
            Kind::Class | Kind::Enum | Kind::Interface | Kind::Record | Kind::AnnotationType
        )
    }

    /// Whether this kind is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Kind::IntLiteral
                | Kind::LongLiteral
                | Kind::FloatLiteral
                | Kind::DoubleLiteral
                | Kind::BooleanLiteral
                | Kind::CharLiteral
                | Kind::StringLiteral
                | Kind::NullLiteral
        )
    }
}

/// A Java modifier token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Sealed,
    NonSealed,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Modifier {
    /// The source token for this modifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value of a literal node. The variant decides the literal [`Kind`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Char(char),
    Str(String),
    Null,
}

impl LiteralValue {
    /// The literal kind for this value.
    pub fn kind(&self) -> Kind {
        match self {
            LiteralValue::Int(_) => Kind::IntLiteral,
            LiteralValue::Long(_) => Kind::LongLiteral,
            LiteralValue::Float(_) => Kind::FloatLiteral,
            LiteralValue::Double(_) => Kind::DoubleLiteral,
            LiteralValue::Bool(_) => Kind::BooleanLiteral,
            LiteralValue::Char(_) => Kind::CharLiteral,
            LiteralValue::Str(_) => Kind::StringLiteral,
            LiteralValue::Null => Kind::NullLiteral,
        }
    }

    /// Render the value as Java literal source text.
    pub fn to_source(&self) -> String {
        match self {
            LiteralValue::Int(v) => v.to_string(),
            LiteralValue::Long(v) => format!("{}L", v),
            LiteralValue::Float(v) => format!("{:?}F", v),
            LiteralValue::Double(v) => format!("{:?}", v),
            LiteralValue::Bool(v) => v.to_string(),
            LiteralValue::Char(v) => format!("'{}'", escape_char(*v)),
            LiteralValue::Str(v) => {
                let mut out = String::with_capacity(v.len() + 2);
                out.push('"');
                for c in v.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        _ => out.push_str(&escape_char(c)),
                    }
                }
                out.push('"');
                out
            }
            LiteralValue::Null => "null".to_string(),
        }
    }
}

fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        _ => c.to_string(),
    }
}

/// Kind-specific fields of a node. Children are arena handles; each child
/// handle appears in exactly one slot across the whole unit.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    CompilationUnit {
        package: Option<NodeId>,
        imports: Vec<NodeId>,
        module: Option<NodeId>,
        types: Vec<NodeId>,
    },
    Package {
        name: Option<NodeId>,
    },
    Import {
        is_static: bool,
        qualified: Option<NodeId>,
    },
    ClassDecl {
        kind: Kind,
        modifiers: Option<NodeId>,
        name: String,
        type_parameters: Vec<NodeId>,
        extends: Option<NodeId>,
        implements: Vec<NodeId>,
        permits: Vec<NodeId>,
        members: Vec<NodeId>,
    },
    Module {
        name: Option<NodeId>,
    },
    Modifiers {
        flags: Vec<Modifier>,
        annotations: Vec<NodeId>,
    },
    Annotation {
        annotation_type: Option<NodeId>,
        arguments: Vec<NodeId>,
    },
    TypeParameter {
        name: String,
        bounds: Vec<NodeId>,
    },
    Identifier {
        name: String,
    },
    FieldAccess {
        expression: Option<NodeId>,
        name: String,
    },
    Literal {
        value: LiteralValue,
    },
    UnionType {
        alternatives: Vec<NodeId>,
    },
    Block {
        is_static: bool,
        statements: Vec<NodeId>,
    },
    Synchronized {
        expression: Option<NodeId>,
        block: Option<NodeId>,
    },
}

impl NodeData {
    /// The discriminant kind for this data.
    pub fn kind(&self) -> Kind {
        match self {
            NodeData::CompilationUnit { .. } => Kind::CompilationUnit,
            NodeData::Package { .. } => Kind::Package,
            NodeData::Import { .. } => Kind::Import,
            NodeData::ClassDecl { kind, .. } => *kind,
            NodeData::Module { .. } => Kind::Module,
            NodeData::Modifiers { .. } => Kind::Modifiers,
            NodeData::Annotation { .. } => Kind::Annotation,
            NodeData::TypeParameter { .. } => Kind::TypeParameter,
            NodeData::Identifier { .. } => Kind::Identifier,
            NodeData::FieldAccess { .. } => Kind::FieldAccess,
            NodeData::Literal { value } => value.kind(),
            NodeData::UnionType { .. } => Kind::UnionType,
            NodeData::Block { .. } => Kind::Block,
            NodeData::Synchronized { .. } => Kind::Synchronized,
        }
    }
}

/// One syntax element of a unit.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) data: NodeData,
    pub(crate) original: Option<ParsedId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) action: Action,
    pub(crate) position: Position,
}

impl Node {
    /// A node created by the analyzer from real input.
    pub(crate) fn analyzed(data: NodeData, original: ParsedId, position: Position) -> Node {
        Node {
            data,
            original: Some(original),
            parent: None,
            action: Action::Unmodified,
            position,
        }
    }

    /// A node synthesized by mutation code: no origin, no position, and
    /// born `Changed` so it always takes the structural-printer path.
    pub(crate) fn synthesized(data: NodeData) -> Node {
        Node {
            data,
            original: None,
            parent: None,
            action: Action::Changed,
            position: Position::INVALID,
        }
    }

    /// The node's discriminant kind.
    pub fn kind(&self) -> Kind {
        self.data.kind()
    }

    /// The node's render state.
    pub fn action(&self) -> Action {
        self.action
    }

    /// Kind-specific fields.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// The owning parent, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Handle to the foreign parse-tree node this was analyzed from.
    pub fn original(&self) -> Option<ParsedId> {
        self.original
    }

    /// The cached source position ([`Position::INVALID`] for synthesized
    /// nodes).
    pub fn position(&self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_kinds_follow_values() {
        assert_eq!(LiteralValue::Int(1).kind(), Kind::IntLiteral);
        assert_eq!(LiteralValue::Long(1).kind(), Kind::LongLiteral);
        assert_eq!(LiteralValue::Float(1.0).kind(), Kind::FloatLiteral);
        assert_eq!(LiteralValue::Double(1.0).kind(), Kind::DoubleLiteral);
        assert_eq!(LiteralValue::Bool(true).kind(), Kind::BooleanLiteral);
        assert_eq!(LiteralValue::Char('x').kind(), Kind::CharLiteral);
        assert_eq!(
            LiteralValue::Str("x".to_string()).kind(),
            Kind::StringLiteral
        );
        assert_eq!(LiteralValue::Null.kind(), Kind::NullLiteral);
    }

    #[test]
    fn literal_source_rendering() {
        assert_eq!(LiteralValue::Int(42).to_source(), "42");
        assert_eq!(LiteralValue::Long(42).to_source(), "42L");
        assert_eq!(LiteralValue::Float(1.5).to_source(), "1.5F");
        assert_eq!(LiteralValue::Double(2.0).to_source(), "2.0");
        assert_eq!(LiteralValue::Bool(false).to_source(), "false");
        assert_eq!(LiteralValue::Null.to_source(), "null");
        assert_eq!(LiteralValue::Char('a').to_source(), "'a'");
        assert_eq!(LiteralValue::Char('\'').to_source(), "'\\''");
        assert_eq!(
            LiteralValue::Str("say \"hi\"\n".to_string()).to_source(),
            "\"say \\\"hi\\\"\\n\""
        );
    }

    #[test]
    fn class_decl_data_reports_its_concrete_kind() {
        let data = NodeData::ClassDecl {
            kind: Kind::Interface,
            modifiers: None,
            name: "I".to_string(),
            type_parameters: Vec::new(),
            extends: None,
            implements: Vec::new(),
            permits: Vec::new(),
            members: Vec::new(),
        };
        assert_eq!(data.kind(), Kind::Interface);
    }

    #[test]
    fn modifier_tokens() {
        assert_eq!(Modifier::Public.as_str(), "public");
        assert_eq!(Modifier::NonSealed.as_str(), "non-sealed");
        assert_eq!(Modifier::Strictfp.to_string(), "strictfp");
    }

    #[test]
    fn synthesized_nodes_have_no_origin_and_start_changed() {
        let node = Node::synthesized(NodeData::Identifier {
            name: "x".to_string(),
        });
        assert_eq!(node.action(), Action::Changed);
        assert!(node.original().is_none());
        assert!(!node.position().is_valid());
    }
}
