//! Structural operations on a unit's node tree: access, parent linkage,
//! action escalation, ownership transfer, and synthesis of new nodes.
//!
//! Children are owned exclusively by one parent slot; the parent pointer is
//! the non-owning back-edge. Ownership transfer is immediate: installing a
//! child anywhere first removes it from its previous owner's slot.
//!
//! Dirty-state propagation is eager: `mark_changed` / `mark_ignored`
//! escalate every strict ancestor to `Changed` at mutation time, so the
//! save pass is a pure read.

use la_arena::Arena;

use crate::contract::Action;
use crate::error::MutationError;
use crate::node::{Kind, LiteralValue, Modifier, Node, NodeData, NodeId};
use crate::position::Position;
use crate::unit::Unit;

/// Ordered non-null child handles of a data record, slot order.
pub(crate) fn data_children(data: &NodeData) -> Vec<NodeId> {
    let mut children = Vec::new();
    match data {
        NodeData::CompilationUnit {
            package,
            imports,
            module,
            types,
        } => {
            children.extend(package.iter().copied());
            children.extend(imports.iter().copied());
            children.extend(module.iter().copied());
            children.extend(types.iter().copied());
        }
        NodeData::Package { name } => children.extend(name.iter().copied()),
        NodeData::Import { qualified, .. } => children.extend(qualified.iter().copied()),
        NodeData::ClassDecl {
            modifiers,
            type_parameters,
            extends,
            implements,
            permits,
            members,
            ..
        } => {
            children.extend(modifiers.iter().copied());
            children.extend(type_parameters.iter().copied());
            children.extend(extends.iter().copied());
            children.extend(implements.iter().copied());
            children.extend(permits.iter().copied());
            children.extend(members.iter().copied());
        }
        NodeData::Module { name } => children.extend(name.iter().copied()),
        NodeData::Modifiers { annotations, .. } => children.extend(annotations.iter().copied()),
        NodeData::Annotation {
            annotation_type,
            arguments,
        } => {
            children.extend(annotation_type.iter().copied());
            children.extend(arguments.iter().copied());
        }
        NodeData::TypeParameter { bounds, .. } => children.extend(bounds.iter().copied()),
        NodeData::Identifier { .. } | NodeData::Literal { .. } => {}
        NodeData::FieldAccess { expression, .. } => children.extend(expression.iter().copied()),
        NodeData::UnionType { alternatives } => children.extend(alternatives.iter().copied()),
        NodeData::Block { statements, .. } => children.extend(statements.iter().copied()),
        NodeData::Synchronized { expression, block } => {
            children.extend(expression.iter().copied());
            children.extend(block.iter().copied());
        }
    }
    children
}

/// Remove `child` from whichever slot of `data` holds it.
fn remove_child(data: &mut NodeData, child: NodeId) -> bool {
    fn take_opt(slot: &mut Option<NodeId>, child: NodeId) -> bool {
        if *slot == Some(child) {
            *slot = None;
            true
        } else {
            false
        }
    }
    fn take_vec(slot: &mut Vec<NodeId>, child: NodeId) -> bool {
        let before = slot.len();
        slot.retain(|&n| n != child);
        slot.len() != before
    }
    match data {
        NodeData::CompilationUnit {
            package,
            imports,
            module,
            types,
        } => {
            take_opt(package, child)
                || take_vec(imports, child)
                || take_opt(module, child)
                || take_vec(types, child)
        }
        NodeData::Package { name } => take_opt(name, child),
        NodeData::Import { qualified, .. } => take_opt(qualified, child),
        NodeData::ClassDecl {
            modifiers,
            type_parameters,
            extends,
            implements,
            permits,
            members,
            ..
        } => {
            take_opt(modifiers, child)
                || take_vec(type_parameters, child)
                || take_opt(extends, child)
                || take_vec(implements, child)
                || take_vec(permits, child)
                || take_vec(members, child)
        }
        NodeData::Module { name } => take_opt(name, child),
        NodeData::Modifiers { annotations, .. } => take_vec(annotations, child),
        NodeData::Annotation {
            annotation_type,
            arguments,
        } => take_opt(annotation_type, child) || take_vec(arguments, child),
        NodeData::TypeParameter { bounds, .. } => take_vec(bounds, child),
        NodeData::Identifier { .. } | NodeData::Literal { .. } => false,
        NodeData::FieldAccess { expression, .. } => take_opt(expression, child),
        NodeData::UnionType { alternatives } => take_vec(alternatives, child),
        NodeData::Block { statements, .. } => take_vec(statements, child),
        NodeData::Synchronized { expression, block } => {
            take_opt(expression, child) || take_opt(block, child)
        }
    }
}

/// Dotted name rendered from an identifier / field-access chain.
pub(crate) fn qualified_name_in(nodes: &Arena<Node>, id: NodeId) -> Option<String> {
    match &nodes[id].data {
        NodeData::Identifier { name } => Some(name.clone()),
        NodeData::FieldAccess { expression, name } => {
            let expression = (*expression)?;
            let mut qualified = qualified_name_in(nodes, expression)?;
            qualified.push('.');
            qualified.push_str(name);
            Some(qualified)
        }
        _ => None,
    }
}

impl Unit {
    /// The root compilation-unit node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// The node's discriminant kind.
    pub fn kind(&self, id: NodeId) -> Kind {
        self.nodes[id].kind()
    }

    /// The node's render state.
    pub fn action(&self, id: NodeId) -> Action {
        self.nodes[id].action
    }

    /// The node's cached source position.
    pub fn position(&self, id: NodeId) -> Position {
        self.nodes[id].position
    }

    /// The node's owning parent, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Re-point the node's parent back-edge. Pure bookkeeping: idempotent,
    /// no escalation.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.nodes[id].parent = parent;
    }

    /// Escalate the node to `Changed` (monotonic), and every strict
    /// ancestor with it: their original spans no longer match their
    /// current content.
    pub fn mark_changed(&mut self, id: NodeId) {
        let action = self.nodes[id].action;
        self.nodes[id].action = action.escalate(Action::Changed);
        self.escalate_ancestors(id);
    }

    /// Escalate the node to `Ignored` and every strict ancestor to
    /// `Changed` (a deletion changes the parent's rendered content).
    pub fn mark_ignored(&mut self, id: NodeId) {
        let action = self.nodes[id].action;
        self.nodes[id].action = action.escalate(Action::Ignored);
        self.escalate_ancestors(id);
    }

    fn escalate_ancestors(&mut self, id: NodeId) {
        let mut current = self.nodes[id].parent;
        while let Some(ancestor) = current {
            if self.nodes[ancestor].action != Action::Unmodified {
                // Already escalated; by induction so is everything above.
                break;
            }
            self.nodes[ancestor].action = Action::Changed;
            current = self.nodes[ancestor].parent;
        }
    }

    /// Ordered non-null immediate children, each defensively re-linked to
    /// this node (children may have been swapped between enumerations).
    pub fn collect_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = data_children(&self.nodes[id].data);
        for &child in &children {
            self.nodes[child].parent = Some(id);
        }
        children
    }

    /// Ordered non-null immediate children, read-only (used by the save
    /// pass, which must not mutate).
    pub(crate) fn child_slots(&self, id: NodeId) -> Vec<NodeId> {
        data_children(&self.nodes[id].data)
    }

    /// Transfer ownership of `child` to `parent`: remove it from any
    /// previous owner's slot (escalating that owner, whose content just
    /// changed) and re-point the back-edge. The caller installs the child
    /// into the new slot.
    pub(crate) fn claim(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child].parent {
            if remove_child(&mut self.nodes[old_parent].data, child) {
                self.mark_changed(old_parent);
            }
        }
        self.nodes[child].parent = Some(parent);
    }

    /// Detach a replaced child: it keeps its arena slot but no longer has
    /// an owner.
    pub(crate) fn orphan(&mut self, child: NodeId) {
        self.nodes[child].parent = None;
    }

    /// Dotted name rendered from an identifier / field-access chain, e.g.
    /// `a.b.c`. `None` for any other kind.
    pub fn qualified_name(&self, id: NodeId) -> Option<String> {
        qualified_name_in(&self.nodes, id)
    }

    /// Indentation column of a node: one indent unit per block-introducing
    /// strict ancestor (class-like declarations, blocks, modules).
    pub(crate) fn indent_of(&self, id: NodeId) -> usize {
        let mut columns = 0;
        let mut current = self.nodes[id].parent;
        while let Some(ancestor) = current {
            let kind = self.nodes[ancestor].kind();
            if kind.is_class_decl() || kind == Kind::Block || kind == Kind::Module {
                columns += self.options.indent_width;
            }
            current = self.nodes[ancestor].parent;
        }
        columns
    }

    // ------------------------------------------------------------------
    // Synthesis: nodes created by mutation code. No origin, no position,
    // born Changed so they always print structurally.
    // ------------------------------------------------------------------

    /// Allocate a synthesized node from raw data.
    pub fn synthesize(&mut self, data: NodeData) -> NodeId {
        self.nodes.alloc(Node::synthesized(data))
    }

    /// A synthesized simple name.
    pub fn new_identifier(&mut self, name: impl Into<String>) -> NodeId {
        self.synthesize(NodeData::Identifier { name: name.into() })
    }

    /// A synthesized dotted name: `a.b.c` becomes a field-access chain
    /// over identifiers, parent links included.
    ///
    /// # Panics
    /// Panics if `dotted` is empty.
    pub fn new_qualified_name(&mut self, dotted: &str) -> NodeId {
        assert!(!dotted.is_empty(), "qualified name must not be empty");
        let mut segments = dotted.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = self.new_identifier(first);
        for segment in segments {
            let access = self.synthesize(NodeData::FieldAccess {
                expression: Some(current),
                name: segment.to_string(),
            });
            self.set_parent(current, Some(access));
            current = access;
        }
        current
    }

    /// A synthesized literal.
    pub fn new_literal(&mut self, value: LiteralValue) -> NodeId {
        self.synthesize(NodeData::Literal { value })
    }

    /// A synthesized import with no name yet (`staticImport` false).
    pub fn new_import(&mut self) -> NodeId {
        self.synthesize(NodeData::Import {
            is_static: false,
            qualified: None,
        })
    }

    /// A synthesized package declaration with no name yet.
    pub fn new_package(&mut self) -> NodeId {
        self.synthesize(NodeData::Package { name: None })
    }

    /// A synthesized class-like declaration of the given kind.
    ///
    /// Rejects kinds outside the closed class-declaration set.
    pub fn new_class_decl(
        &mut self,
        kind: Kind,
        name: impl Into<String>,
    ) -> Result<NodeId, MutationError> {
        if !kind.is_class_decl() {
            return Err(MutationError::UnsupportedKind {
                kind,
                message: "not a class-declaration kind".to_string(),
            });
        }
        Ok(self.synthesize(NodeData::ClassDecl {
            kind,
            modifiers: None,
            name: name.into(),
            type_parameters: Vec::new(),
            extends: None,
            implements: Vec::new(),
            permits: Vec::new(),
            members: Vec::new(),
        }))
    }

    /// A synthesized modifier set with the given flags and no annotations.
    pub fn new_modifiers(&mut self, flags: Vec<Modifier>) -> NodeId {
        self.synthesize(NodeData::Modifiers {
            flags,
            annotations: Vec::new(),
        })
    }

    /// A synthesized type parameter.
    pub fn new_type_parameter(&mut self, name: impl Into<String>) -> NodeId {
        self.synthesize(NodeData::TypeParameter {
            name: name.into(),
            bounds: Vec::new(),
        })
    }

    /// A synthesized union type with no alternatives yet.
    pub fn new_union_type(&mut self) -> NodeId {
        self.synthesize(NodeData::UnionType {
            alternatives: Vec::new(),
        })
    }

    /// A synthesized block.
    pub fn new_block(&mut self, is_static: bool) -> NodeId {
        self.synthesize(NodeData::Block {
            is_static,
            statements: Vec::new(),
        })
    }

    /// A synthesized `synchronized` statement with empty slots.
    pub fn new_synchronized(&mut self) -> NodeId {
        self.synthesize(NodeData::Synchronized {
            expression: None,
            block: None,
        })
    }

    /// A synthesized annotation with no type yet.
    pub fn new_annotation(&mut self) -> NodeId {
        self.synthesize(NodeData::Annotation {
            annotation_type: None,
            arguments: Vec::new(),
        })
    }
}
