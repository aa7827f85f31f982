//! The analyzer: one top-down pass instantiating the node tree from the
//! foreign parse tree.
//!
//! Purely structural — no semantic validation, no type resolution (both
//! belong to the external front end). Every created node caches its
//! foreign handle and its resolved position; ignore markers found on a
//! declaration's modifiers are applied here, once, before any scripted
//! mutation runs.

use la_arena::Arena;
use remint_core::LineMap;
use tracing::debug;

use crate::contract::{Action, IGNORE_ANNOTATION};
use crate::node::{Node, NodeData, NodeId};
use crate::parse::{ParseInput, ParsedId, ParsedNode, ParsedTree};
use crate::position::{self, SpanMap};
use crate::style::RenderOptions;
use crate::tree;
use crate::unit::Unit;

/// Build a [`Unit`] from the front end's parse input.
///
/// # Panics
/// Panics if the input's root is not a [`ParsedNode::CompilationUnit`].
pub fn analyze(input: ParseInput, options: RenderOptions) -> Unit {
    let ParseInput {
        source,
        tree: parsed,
        root,
        positions,
        file_name,
    } = input;
    assert!(
        matches!(parsed[root], ParsedNode::CompilationUnit { .. }),
        "parse input root must be a compilation unit"
    );
    let line_map = LineMap::new(&source);
    let mut ctx = AnalyzeCtx {
        parsed: &parsed,
        positions: &positions,
        line_map: &line_map,
        nodes: Arena::new(),
    };
    let root_id = ctx.analyze_node(root);
    debug!(node_count = ctx.nodes.len(), "analyzed compilation unit");
    Unit {
        nodes: ctx.nodes,
        root: root_id,
        source,
        options,
        file_name,
    }
}

struct AnalyzeCtx<'a> {
    parsed: &'a ParsedTree,
    positions: &'a SpanMap,
    line_map: &'a LineMap,
    nodes: Arena<Node>,
}

impl AnalyzeCtx<'_> {
    fn analyze_node(&mut self, parsed_id: ParsedId) -> NodeId {
        let parsed_node = self.parsed[parsed_id].clone();
        let data = match parsed_node {
            ParsedNode::CompilationUnit {
                package,
                imports,
                module,
                types,
            } => NodeData::CompilationUnit {
                package: package.map(|p| self.analyze_node(p)),
                imports: imports.into_iter().map(|i| self.analyze_node(i)).collect(),
                module: module.map(|m| self.analyze_node(m)),
                types: types.into_iter().map(|t| self.analyze_node(t)).collect(),
            },
            ParsedNode::Package { name } => NodeData::Package {
                name: Some(self.analyze_node(name)),
            },
            ParsedNode::Import {
                is_static,
                qualified,
            } => NodeData::Import {
                is_static,
                qualified: Some(self.analyze_node(qualified)),
            },
            ParsedNode::ClassDecl {
                kind,
                modifiers,
                name,
                type_parameters,
                extends,
                implements,
                permits,
                members,
            } => NodeData::ClassDecl {
                kind,
                modifiers: modifiers.map(|m| self.analyze_node(m)),
                name,
                type_parameters: type_parameters
                    .into_iter()
                    .map(|t| self.analyze_node(t))
                    .collect(),
                extends: extends.map(|e| self.analyze_node(e)),
                implements: implements.into_iter().map(|i| self.analyze_node(i)).collect(),
                permits: permits.into_iter().map(|p| self.analyze_node(p)).collect(),
                members: members.into_iter().map(|m| self.analyze_node(m)).collect(),
            },
            ParsedNode::Module { name } => NodeData::Module {
                name: Some(self.analyze_node(name)),
            },
            ParsedNode::Modifiers { flags, annotations } => NodeData::Modifiers {
                flags,
                annotations: annotations
                    .into_iter()
                    .map(|a| self.analyze_node(a))
                    .collect(),
            },
            ParsedNode::Annotation {
                annotation_type,
                arguments,
            } => NodeData::Annotation {
                annotation_type: Some(self.analyze_node(annotation_type)),
                arguments: arguments.into_iter().map(|a| self.analyze_node(a)).collect(),
            },
            ParsedNode::TypeParameter { name, bounds } => NodeData::TypeParameter {
                name,
                bounds: bounds.into_iter().map(|b| self.analyze_node(b)).collect(),
            },
            ParsedNode::Identifier { name } => NodeData::Identifier { name },
            ParsedNode::FieldAccess { expression, name } => NodeData::FieldAccess {
                expression: Some(self.analyze_node(expression)),
                name,
            },
            ParsedNode::Literal { value } => NodeData::Literal { value },
            ParsedNode::UnionType { alternatives } => NodeData::UnionType {
                alternatives: alternatives
                    .into_iter()
                    .map(|a| self.analyze_node(a))
                    .collect(),
            },
            ParsedNode::Block {
                is_static,
                statements,
            } => NodeData::Block {
                is_static,
                statements: statements.into_iter().map(|s| self.analyze_node(s)).collect(),
            },
            ParsedNode::Synchronized { expression, block } => NodeData::Synchronized {
                expression: Some(self.analyze_node(expression)),
                block: Some(self.analyze_node(block)),
            },
        };

        let node_position = position::resolve(self.positions, self.line_map, Some(parsed_id));
        let id = self.nodes.alloc(Node::analyzed(data, parsed_id, node_position));
        let children = tree::data_children(&self.nodes[id].data);
        for child in children {
            self.nodes[child].parent = Some(id);
        }
        if self.carries_ignore_marker(id) {
            // Declarative input, not a mutation: skips Changed entirely.
            self.nodes[id].action = Action::Ignored;
        }
        id
    }

    /// Whether a declaration's modifiers carry the ignore annotation.
    fn carries_ignore_marker(&self, id: NodeId) -> bool {
        let NodeData::ClassDecl {
            modifiers: Some(modifiers),
            ..
        } = &self.nodes[id].data
        else {
            return false;
        };
        let NodeData::Modifiers { annotations, .. } = &self.nodes[*modifiers].data else {
            return false;
        };
        annotations.iter().any(|&annotation| {
            if let NodeData::Annotation {
                annotation_type: Some(annotation_type),
                ..
            } = &self.nodes[annotation].data
            {
                tree::qualified_name_in(&self.nodes, *annotation_type).as_deref()
                    == Some(IGNORE_ANNOTATION)
            } else {
                false
            }
        })
    }
}
