//! The name-keyed mutation surface: `get`/`set` over a fixed, per-kind
//! enumeration of property names.
//!
//! This is the only channel through which an embedding scripting layer
//! observes or mutates the tree. It is a controlled substitute for
//! reflection: a closed `(kind, name)` table mapping property names to
//! typed accessors, so the interop boundary can discover and set fields by
//! name without any runtime reflection.
//!
//! `set` is strict: a wrong-typed value fails with
//! [`MutationError::TypeMismatch`] and leaves the tree untouched — never
//! silent coercion. A value reference-identical to the current one is a
//! no-op; anything else re-parents the new child, detaches the old one,
//! and escalates this node (and its ancestors) to `Changed`.

use crate::error::MutationError;
use crate::node::{Kind, LiteralValue, Modifier, NodeData, NodeId};
use crate::unit::Unit;

/// A value crossing the mutation surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// An absent optional child.
    Null,
    Bool(bool),
    Str(String),
    /// A kind token (the class-declaration kind slot).
    Kind(Kind),
    /// A literal value (the literal node's value slot).
    Literal(LiteralValue),
    /// Modifier flags (the modifiers node's flag list).
    Flags(Vec<Modifier>),
    /// A single child node.
    Node(NodeId),
    /// An ordered child list.
    Nodes(Vec<NodeId>),
}

impl PropertyValue {
    /// Shape name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Str(_) => "string",
            PropertyValue::Kind(_) => "kind",
            PropertyValue::Literal(_) => "literal",
            PropertyValue::Flags(_) => "modifier list",
            PropertyValue::Node(_) => "node",
            PropertyValue::Nodes(_) => "node list",
        }
    }

    fn from_opt(node: Option<NodeId>) -> PropertyValue {
        match node {
            Some(id) => PropertyValue::Node(id),
            None => PropertyValue::Null,
        }
    }
}

/// The fixed property-name enumeration for a kind, for interop discovery.
pub fn property_names(kind: Kind) -> &'static [&'static str] {
    match kind {
        Kind::CompilationUnit => &["package", "imports", "module", "typeDecls"],
        Kind::Package => &["packageName"],
        Kind::Import => &["qualifiedIdentifier", "staticImport"],
        Kind::Module => &["name"],
        Kind::Modifiers => &["flags", "annotations"],
        Kind::Annotation => &["annotationType", "arguments"],
        Kind::TypeParameter => &["name", "bounds"],
        Kind::Identifier => &["name"],
        Kind::FieldAccess => &["expression", "identifier"],
        Kind::UnionType => &["typeAlternatives"],
        Kind::Block => &["staticBlock", "statements"],
        Kind::Synchronized => &["expression", "block"],
        Kind::Class | Kind::Enum | Kind::Interface | Kind::Record | Kind::AnnotationType => &[
            "kind",
            "modifiers",
            "typeParameters",
            "simpleName",
            "extendsClause",
            "implementsClauses",
            "permitsClauses",
            "members",
        ],
        Kind::IntLiteral
        | Kind::LongLiteral
        | Kind::FloatLiteral
        | Kind::DoubleLiteral
        | Kind::BooleanLiteral
        | Kind::CharLiteral
        | Kind::StringLiteral
        | Kind::NullLiteral => &["value"],
    }
}

fn unknown(kind: Kind, name: &str) -> MutationError {
    MutationError::UnknownProperty {
        kind,
        name: name.to_string(),
    }
}

fn mismatch(kind: Kind, name: &str, expected: &'static str, given: &PropertyValue) -> MutationError {
    MutationError::TypeMismatch {
        kind,
        name: name.to_string(),
        expected,
        given: given.type_name(),
    }
}

fn expect_node(kind: Kind, name: &str, value: PropertyValue) -> Result<NodeId, MutationError> {
    match value {
        PropertyValue::Node(id) => Ok(id),
        other => Err(mismatch(kind, name, "node", &other)),
    }
}

fn expect_nodes(
    kind: Kind,
    name: &str,
    value: PropertyValue,
) -> Result<Vec<NodeId>, MutationError> {
    match value {
        PropertyValue::Nodes(ids) => Ok(ids),
        other => Err(mismatch(kind, name, "node list", &other)),
    }
}

fn expect_bool(kind: Kind, name: &str, value: PropertyValue) -> Result<bool, MutationError> {
    match value {
        PropertyValue::Bool(v) => Ok(v),
        other => Err(mismatch(kind, name, "bool", &other)),
    }
}

fn expect_str(kind: Kind, name: &str, value: PropertyValue) -> Result<String, MutationError> {
    match value {
        PropertyValue::Str(v) => Ok(v),
        other => Err(mismatch(kind, name, "string", &other)),
    }
}

fn expect_literal(
    kind: Kind,
    name: &str,
    value: PropertyValue,
) -> Result<LiteralValue, MutationError> {
    match value {
        PropertyValue::Literal(v) => Ok(v),
        other => Err(mismatch(kind, name, "literal", &other)),
    }
}

fn expect_flags(
    kind: Kind,
    name: &str,
    value: PropertyValue,
) -> Result<Vec<Modifier>, MutationError> {
    match value {
        PropertyValue::Flags(v) => Ok(v),
        other => Err(mismatch(kind, name, "modifier list", &other)),
    }
}

fn expect_kind(kind: Kind, name: &str, value: PropertyValue) -> Result<Kind, MutationError> {
    match value {
        PropertyValue::Kind(v) => Ok(v),
        other => Err(mismatch(kind, name, "kind", &other)),
    }
}

impl Unit {
    /// Read a property by name.
    pub fn get(&self, id: NodeId, name: &str) -> Result<PropertyValue, MutationError> {
        let value = match (self.node(id).data(), name) {
            (NodeData::CompilationUnit { package, .. }, "package") => {
                PropertyValue::from_opt(*package)
            }
            (NodeData::CompilationUnit { imports, .. }, "imports") => {
                PropertyValue::Nodes(imports.clone())
            }
            (NodeData::CompilationUnit { module, .. }, "module") => {
                PropertyValue::from_opt(*module)
            }
            (NodeData::CompilationUnit { types, .. }, "typeDecls") => {
                PropertyValue::Nodes(types.clone())
            }
            (NodeData::Package { name }, "packageName") => PropertyValue::from_opt(*name),
            (NodeData::Import { qualified, .. }, "qualifiedIdentifier") => {
                PropertyValue::from_opt(*qualified)
            }
            (NodeData::Import { is_static, .. }, "staticImport") => {
                PropertyValue::Bool(*is_static)
            }
            (NodeData::ClassDecl { kind, .. }, "kind") => PropertyValue::Kind(*kind),
            (NodeData::ClassDecl { modifiers, .. }, "modifiers") => {
                PropertyValue::from_opt(*modifiers)
            }
            (NodeData::ClassDecl {
                type_parameters, ..
            }, "typeParameters") => PropertyValue::Nodes(type_parameters.clone()),
            (NodeData::ClassDecl { name, .. }, "simpleName") => PropertyValue::Str(name.clone()),
            (NodeData::ClassDecl { extends, .. }, "extendsClause") => {
                PropertyValue::from_opt(*extends)
            }
            (NodeData::ClassDecl { implements, .. }, "implementsClauses") => {
                PropertyValue::Nodes(implements.clone())
            }
            (NodeData::ClassDecl { permits, .. }, "permitsClauses") => {
                PropertyValue::Nodes(permits.clone())
            }
            (NodeData::ClassDecl { members, .. }, "members") => {
                PropertyValue::Nodes(members.clone())
            }
            (NodeData::Module { name }, "name") => PropertyValue::from_opt(*name),
            (NodeData::Modifiers { flags, .. }, "flags") => PropertyValue::Flags(flags.clone()),
            (NodeData::Modifiers { annotations, .. }, "annotations") => {
                PropertyValue::Nodes(annotations.clone())
            }
            (NodeData::Annotation {
                annotation_type, ..
            }, "annotationType") => PropertyValue::from_opt(*annotation_type),
            (NodeData::Annotation { arguments, .. }, "arguments") => {
                PropertyValue::Nodes(arguments.clone())
            }
            (NodeData::TypeParameter { name, .. }, "name") => PropertyValue::Str(name.clone()),
            (NodeData::TypeParameter { bounds, .. }, "bounds") => {
                PropertyValue::Nodes(bounds.clone())
            }
            (NodeData::Identifier { name }, "name") => PropertyValue::Str(name.clone()),
            (NodeData::FieldAccess { expression, .. }, "expression") => {
                PropertyValue::from_opt(*expression)
            }
            (NodeData::FieldAccess { name, .. }, "identifier") => PropertyValue::Str(name.clone()),
            (NodeData::Literal { value }, "value") => PropertyValue::Literal(value.clone()),
            (NodeData::UnionType { alternatives }, "typeAlternatives") => {
                PropertyValue::Nodes(alternatives.clone())
            }
            (NodeData::Block { is_static, .. }, "staticBlock") => PropertyValue::Bool(*is_static),
            (NodeData::Block { statements, .. }, "statements") => {
                PropertyValue::Nodes(statements.clone())
            }
            (NodeData::Synchronized { expression, .. }, "expression") => {
                PropertyValue::from_opt(*expression)
            }
            (NodeData::Synchronized { block, .. }, "block") => PropertyValue::from_opt(*block),
            _ => return Err(unknown(self.kind(id), name)),
        };
        Ok(value)
    }

    /// Write a property by name.
    ///
    /// No-op when the value is reference-identical to the current one;
    /// otherwise installs it (transferring ownership of child nodes) and
    /// escalates this node to `Changed`. On any error the tree is left
    /// exactly as it was.
    pub fn set(
        &mut self,
        id: NodeId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), MutationError> {
        let kind = self.kind(id);
        match kind {
            Kind::CompilationUnit => match name {
                "package" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::CompilationUnit { package, .. } => *package,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::CompilationUnit { package, .. } = data {
                                *package = slot;
                            }
                        },
                    );
                    Ok(())
                }
                "imports" => {
                    let new = expect_nodes(kind, name, value)?;
                    self.install_nodes(
                        id,
                        new,
                        |data| match data {
                            NodeData::CompilationUnit { imports, .. } => imports.clone(),
                            _ => Vec::new(),
                        },
                        |data, list| {
                            if let NodeData::CompilationUnit { imports, .. } = data {
                                *imports = list;
                            }
                        },
                    );
                    Ok(())
                }
                "module" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::CompilationUnit { module, .. } => *module,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::CompilationUnit { module, .. } = data {
                                *module = slot;
                            }
                        },
                    );
                    Ok(())
                }
                "typeDecls" => {
                    let new = expect_nodes(kind, name, value)?;
                    self.install_nodes(
                        id,
                        new,
                        |data| match data {
                            NodeData::CompilationUnit { types, .. } => types.clone(),
                            _ => Vec::new(),
                        },
                        |data, list| {
                            if let NodeData::CompilationUnit { types, .. } = data {
                                *types = list;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Package => match name {
                "packageName" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::Package { name } => *name,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::Package { name } = data {
                                *name = slot;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Import => match name {
                "qualifiedIdentifier" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::Import { qualified, .. } => *qualified,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::Import { qualified, .. } = data {
                                *qualified = slot;
                            }
                        },
                    );
                    Ok(())
                }
                "staticImport" => {
                    let new = expect_bool(kind, name, value)?;
                    self.install_value(
                        id,
                        new,
                        |data| match data {
                            NodeData::Import { is_static, .. } => *is_static,
                            _ => false,
                        },
                        |data, v| {
                            if let NodeData::Import { is_static, .. } = data {
                                *is_static = v;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Module => match name {
                "name" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::Module { name } => *name,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::Module { name } = data {
                                *name = slot;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Modifiers => match name {
                "flags" => {
                    let new = expect_flags(kind, name, value)?;
                    self.install_value(
                        id,
                        new,
                        |data| match data {
                            NodeData::Modifiers { flags, .. } => flags.clone(),
                            _ => Vec::new(),
                        },
                        |data, v| {
                            if let NodeData::Modifiers { flags, .. } = data {
                                *flags = v;
                            }
                        },
                    );
                    Ok(())
                }
                "annotations" => {
                    let new = expect_nodes(kind, name, value)?;
                    self.install_nodes(
                        id,
                        new,
                        |data| match data {
                            NodeData::Modifiers { annotations, .. } => annotations.clone(),
                            _ => Vec::new(),
                        },
                        |data, list| {
                            if let NodeData::Modifiers { annotations, .. } = data {
                                *annotations = list;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Annotation => match name {
                "annotationType" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::Annotation {
                                annotation_type, ..
                            } => *annotation_type,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::Annotation {
                                annotation_type, ..
                            } = data
                            {
                                *annotation_type = slot;
                            }
                        },
                    );
                    Ok(())
                }
                "arguments" => {
                    let new = expect_nodes(kind, name, value)?;
                    self.install_nodes(
                        id,
                        new,
                        |data| match data {
                            NodeData::Annotation { arguments, .. } => arguments.clone(),
                            _ => Vec::new(),
                        },
                        |data, list| {
                            if let NodeData::Annotation { arguments, .. } = data {
                                *arguments = list;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::TypeParameter => match name {
                "name" => {
                    let new = expect_str(kind, name, value)?;
                    self.install_value(
                        id,
                        new,
                        |data| match data {
                            NodeData::TypeParameter { name, .. } => name.clone(),
                            _ => String::new(),
                        },
                        |data, v| {
                            if let NodeData::TypeParameter { name, .. } = data {
                                *name = v;
                            }
                        },
                    );
                    Ok(())
                }
                "bounds" => {
                    let new = expect_nodes(kind, name, value)?;
                    self.install_nodes(
                        id,
                        new,
                        |data| match data {
                            NodeData::TypeParameter { bounds, .. } => bounds.clone(),
                            _ => Vec::new(),
                        },
                        |data, list| {
                            if let NodeData::TypeParameter { bounds, .. } = data {
                                *bounds = list;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Identifier => match name {
                "name" => {
                    let new = expect_str(kind, name, value)?;
                    self.install_value(
                        id,
                        new,
                        |data| match data {
                            NodeData::Identifier { name } => name.clone(),
                            _ => String::new(),
                        },
                        |data, v| {
                            if let NodeData::Identifier { name } = data {
                                *name = v;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::FieldAccess => match name {
                "expression" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::FieldAccess { expression, .. } => *expression,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::FieldAccess { expression, .. } = data {
                                *expression = slot;
                            }
                        },
                    );
                    Ok(())
                }
                "identifier" => {
                    let new = expect_str(kind, name, value)?;
                    self.install_value(
                        id,
                        new,
                        |data| match data {
                            NodeData::FieldAccess { name, .. } => name.clone(),
                            _ => String::new(),
                        },
                        |data, v| {
                            if let NodeData::FieldAccess { name, .. } = data {
                                *name = v;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::UnionType => match name {
                "typeAlternatives" => {
                    let new = expect_nodes(kind, name, value)?;
                    self.install_nodes(
                        id,
                        new,
                        |data| match data {
                            NodeData::UnionType { alternatives } => alternatives.clone(),
                            _ => Vec::new(),
                        },
                        |data, list| {
                            if let NodeData::UnionType { alternatives } = data {
                                *alternatives = list;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Block => match name {
                "staticBlock" => {
                    let new = expect_bool(kind, name, value)?;
                    self.install_value(
                        id,
                        new,
                        |data| match data {
                            NodeData::Block { is_static, .. } => *is_static,
                            _ => false,
                        },
                        |data, v| {
                            if let NodeData::Block { is_static, .. } = data {
                                *is_static = v;
                            }
                        },
                    );
                    Ok(())
                }
                "statements" => {
                    let new = expect_nodes(kind, name, value)?;
                    self.install_nodes(
                        id,
                        new,
                        |data| match data {
                            NodeData::Block { statements, .. } => statements.clone(),
                            _ => Vec::new(),
                        },
                        |data, list| {
                            if let NodeData::Block { statements, .. } = data {
                                *statements = list;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Synchronized => match name {
                "expression" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::Synchronized { expression, .. } => *expression,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::Synchronized { expression, .. } = data {
                                *expression = slot;
                            }
                        },
                    );
                    Ok(())
                }
                "block" => {
                    let new = expect_node(kind, name, value)?;
                    self.install_node(
                        id,
                        new,
                        |data| match data {
                            NodeData::Synchronized { block, .. } => *block,
                            _ => None,
                        },
                        |data, slot| {
                            if let NodeData::Synchronized { block, .. } = data {
                                *block = slot;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
            Kind::Class | Kind::Enum | Kind::Interface | Kind::Record | Kind::AnnotationType => {
                self.set_class_decl_property(id, kind, name, value)
            }
            Kind::IntLiteral
            | Kind::LongLiteral
            | Kind::FloatLiteral
            | Kind::DoubleLiteral
            | Kind::BooleanLiteral
            | Kind::CharLiteral
            | Kind::StringLiteral
            | Kind::NullLiteral => match name {
                "value" => {
                    let new = expect_literal(kind, name, value)?;
                    self.install_value(
                        id,
                        new,
                        |data| match data {
                            NodeData::Literal { value } => value.clone(),
                            _ => LiteralValue::Null,
                        },
                        |data, v| {
                            if let NodeData::Literal { value } = data {
                                *value = v;
                            }
                        },
                    );
                    Ok(())
                }
                _ => Err(unknown(kind, name)),
            },
        }
    }

    fn set_class_decl_property(
        &mut self,
        id: NodeId,
        kind: Kind,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), MutationError> {
        match name {
            "kind" => {
                let new = expect_kind(kind, name, value)?;
                if !new.is_class_decl() {
                    return Err(MutationError::UnsupportedKind {
                        kind: new,
                        message: "not a class-declaration kind".to_string(),
                    });
                }
                self.install_value(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl { kind, .. } => *kind,
                        _ => Kind::Class,
                    },
                    |data, v| {
                        if let NodeData::ClassDecl { kind, .. } = data {
                            *kind = v;
                        }
                    },
                );
                Ok(())
            }
            "modifiers" => {
                let new = expect_node(kind, name, value)?;
                self.install_node(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl { modifiers, .. } => *modifiers,
                        _ => None,
                    },
                    |data, slot| {
                        if let NodeData::ClassDecl { modifiers, .. } = data {
                            *modifiers = slot;
                        }
                    },
                );
                Ok(())
            }
            "typeParameters" => {
                let new = expect_nodes(kind, name, value)?;
                self.install_nodes(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl {
                            type_parameters, ..
                        } => type_parameters.clone(),
                        _ => Vec::new(),
                    },
                    |data, list| {
                        if let NodeData::ClassDecl {
                            type_parameters, ..
                        } = data
                        {
                            *type_parameters = list;
                        }
                    },
                );
                Ok(())
            }
            "simpleName" => {
                let new = expect_str(kind, name, value)?;
                self.install_value(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl { name, .. } => name.clone(),
                        _ => String::new(),
                    },
                    |data, v| {
                        if let NodeData::ClassDecl { name, .. } = data {
                            *name = v;
                        }
                    },
                );
                Ok(())
            }
            "extendsClause" => {
                let new = expect_node(kind, name, value)?;
                self.install_node(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl { extends, .. } => *extends,
                        _ => None,
                    },
                    |data, slot| {
                        if let NodeData::ClassDecl { extends, .. } = data {
                            *extends = slot;
                        }
                    },
                );
                Ok(())
            }
            "implementsClauses" => {
                let new = expect_nodes(kind, name, value)?;
                self.install_nodes(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl { implements, .. } => implements.clone(),
                        _ => Vec::new(),
                    },
                    |data, list| {
                        if let NodeData::ClassDecl { implements, .. } = data {
                            *implements = list;
                        }
                    },
                );
                Ok(())
            }
            "permitsClauses" => {
                let new = expect_nodes(kind, name, value)?;
                self.install_nodes(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl { permits, .. } => permits.clone(),
                        _ => Vec::new(),
                    },
                    |data, list| {
                        if let NodeData::ClassDecl { permits, .. } = data {
                            *permits = list;
                        }
                    },
                );
                Ok(())
            }
            "members" => {
                let new = expect_nodes(kind, name, value)?;
                self.install_nodes(
                    id,
                    new,
                    |data| match data {
                        NodeData::ClassDecl { members, .. } => members.clone(),
                        _ => Vec::new(),
                    },
                    |data, list| {
                        if let NodeData::ClassDecl { members, .. } = data {
                            *members = list;
                        }
                    },
                );
                Ok(())
            }
            _ => Err(unknown(kind, name)),
        }
    }

    /// Install a single-node slot value: no-op when identical, otherwise
    /// transfer ownership, detach the replaced child, escalate.
    fn install_node(
        &mut self,
        id: NodeId,
        new: NodeId,
        read: impl Fn(&NodeData) -> Option<NodeId>,
        write: impl Fn(&mut NodeData, Option<NodeId>),
    ) {
        let current = read(self.node(id).data());
        if current == Some(new) {
            return;
        }
        self.claim(id, new);
        if let Some(old) = current {
            self.orphan(old);
        }
        write(&mut self.node_mut(id).data, Some(new));
        self.mark_changed(id);
    }

    /// Install a node-list slot value: no-op when the sequence is
    /// identical, otherwise transfer ownership of every element, detach
    /// the elements that fell out, escalate.
    fn install_nodes(
        &mut self,
        id: NodeId,
        new: Vec<NodeId>,
        read: impl Fn(&NodeData) -> Vec<NodeId>,
        write: impl Fn(&mut NodeData, Vec<NodeId>),
    ) {
        let current = read(self.node(id).data());
        if current == new {
            return;
        }
        for &node in &new {
            self.claim(id, node);
        }
        for old in current {
            if !new.contains(&old) {
                self.orphan(old);
            }
        }
        write(&mut self.node_mut(id).data, new);
        self.mark_changed(id);
    }

    /// Install a scalar slot value: no-op when equal, otherwise write and
    /// escalate.
    fn install_value<T: PartialEq>(
        &mut self,
        id: NodeId,
        new: T,
        read: impl Fn(&NodeData) -> T,
        write: impl Fn(&mut NodeData, T),
    ) {
        if read(self.node(id).data()) == new {
            return;
        }
        write(&mut self.node_mut(id).data, new);
        self.mark_changed(id);
    }
}
