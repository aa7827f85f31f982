//! Structural printers: one per node kind, rendering a changed node from
//! its typed fields instead of its original text.
//!
//! Every printer follows the same template: validate required fields up
//! front (so a failure aborts before anything is written), emit keywords
//! from closed per-kind tables, and print every sub-list through the one
//! uniform rule in [`save_list`] — filter out `Ignored` slots, emit
//! nothing at all (no wrapper tokens, no introducing keyword) when the
//! filtered sequence is empty, otherwise prefix / separated elements /
//! suffix. That single rule is what makes deletion of one element from any
//! list come out clean, with no leftover commas or empty brackets.

use crate::error::SaveError;
use crate::node::{Kind, Modifier, NodeData, NodeId};
use crate::style::{Keyword, StyleWriter};
use crate::unit::Unit;

/// Wrapper and separator callbacks for one rendered list.
pub(crate) struct ListLayout<P, S, X> {
    pub prefix: P,
    pub separator: S,
    pub suffix: X,
}

/// A no-op wrapper/separator callback.
pub(crate) fn no_wrap(_: &mut StyleWriter) {}

/// The uniform list-printing rule.
///
/// Filters out `Ignored` slots. If nothing survives, emits nothing and
/// returns `Ok(false)` — the prefix and suffix callbacks are never
/// invoked, so no partial punctuation can appear. Otherwise emits prefix,
/// the surviving elements interleaved with the separator, then suffix.
pub(crate) fn save_list<I, P, S, X>(
    unit: &Unit,
    w: &mut StyleWriter,
    items: &[NodeId],
    mut item: I,
    layout: ListLayout<P, S, X>,
) -> Result<bool, SaveError>
where
    I: FnMut(&Unit, NodeId, &mut StyleWriter) -> Result<(), SaveError>,
    P: FnOnce(&mut StyleWriter),
    S: FnMut(&mut StyleWriter),
    X: FnOnce(&mut StyleWriter),
{
    let retained: Vec<NodeId> = items
        .iter()
        .copied()
        .filter(|&node| !unit.action(node).is_ignored())
        .collect();
    if retained.is_empty() {
        return Ok(false);
    }
    let ListLayout {
        prefix,
        mut separator,
        suffix,
    } = layout;
    prefix(w);
    for (index, &node) in retained.iter().enumerate() {
        if index > 0 {
            separator(w);
        }
        item(unit, node, w)?;
    }
    suffix(w);
    Ok(true)
}

/// Default list item: the node's own save.
fn save_item(unit: &Unit, id: NodeId, w: &mut StyleWriter) -> Result<(), SaveError> {
    unit.save_node(id, w)?;
    Ok(())
}

/// A required single child: present and not `Ignored`, checked before
/// anything is emitted.
fn require_retained(
    unit: &Unit,
    child: Option<NodeId>,
    what: &str,
) -> Result<NodeId, SaveError> {
    let id = child.ok_or_else(|| SaveError::invariant(format!("{} is absent", what)))?;
    if unit.action(id).is_ignored() {
        return Err(SaveError::invariant(format!(
            "{} is ignored but required",
            what
        )));
    }
    Ok(id)
}

/// Closed table from class-declaration kinds to their keywords. A kind
/// outside the table means the model and this printer have drifted.
fn class_keyword(kind: Kind) -> Result<Keyword, SaveError> {
    match kind {
        Kind::Class => Ok(Keyword::Class),
        Kind::Enum => Ok(Keyword::Enum),
        Kind::Interface | Kind::AnnotationType => Ok(Keyword::Interface),
        Kind::Record => Ok(Keyword::Record),
        other => Err(SaveError::InvalidKind {
            kind: other,
            table: "class keyword",
        }),
    }
}

/// Dispatch a changed node to its kind's printer.
pub(crate) fn print_node(unit: &Unit, id: NodeId, w: &mut StyleWriter) -> Result<(), SaveError> {
    match unit.node(id).data() {
        NodeData::CompilationUnit { .. } => unit.print_compilation_unit(w),
        NodeData::Package { name } => print_package(unit, *name, w),
        NodeData::Import {
            is_static,
            qualified,
        } => print_import(unit, *is_static, *qualified, w),
        NodeData::ClassDecl { .. } => print_class_decl(unit, id, w),
        NodeData::Module { name } => print_module(unit, *name, w),
        NodeData::Modifiers { flags, annotations } => {
            print_modifiers(unit, id, flags, annotations, w)
        }
        NodeData::Annotation {
            annotation_type,
            arguments,
        } => print_annotation(unit, *annotation_type, arguments, w),
        NodeData::TypeParameter { name, bounds } => print_type_parameter(unit, name, bounds, w),
        NodeData::Identifier { name } => {
            w.append(name);
            Ok(())
        }
        NodeData::FieldAccess { expression, name } => {
            print_field_access(unit, *expression, name, w)
        }
        NodeData::Literal { value } => {
            w.append(&value.to_source());
            Ok(())
        }
        NodeData::UnionType { alternatives } => print_union_type(unit, alternatives, w),
        NodeData::Block {
            is_static,
            statements,
        } => print_block(unit, id, *is_static, statements, w),
        NodeData::Synchronized { expression, block } => {
            print_synchronized(unit, *expression, *block, w)
        }
    }
}

fn print_package(
    unit: &Unit,
    name: Option<NodeId>,
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    let name = require_retained(unit, name, "package name")?;
    w.append_keyword(Keyword::Package).append_space();
    unit.save_node(name, w)?;
    w.append_semicolon();
    Ok(())
}

fn print_import(
    unit: &Unit,
    is_static: bool,
    qualified: Option<NodeId>,
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    let qualified = require_retained(unit, qualified, "import qualified identifier")?;
    w.append_keyword(Keyword::Import).append_space();
    if is_static {
        w.append_keyword(Keyword::Static).append_space();
    }
    unit.save_node(qualified, w)?;
    w.append_semicolon();
    Ok(())
}

fn print_class_decl(unit: &Unit, id: NodeId, w: &mut StyleWriter) -> Result<(), SaveError> {
    let NodeData::ClassDecl {
        kind,
        modifiers,
        name,
        type_parameters,
        extends,
        implements,
        permits,
        members,
    } = unit.node(id).data()
    else {
        return Err(SaveError::invariant(
            "class printer dispatched on a non-class node",
        ));
    };
    let keyword = class_keyword(*kind)?;
    let indent = unit.indent_of(id);
    let member_indent = indent + unit.options().indent_width;

    if let Some(modifiers) = *modifiers {
        unit.save_node(modifiers, w)?;
    }
    if *kind == Kind::AnnotationType {
        w.append_space_if_needed().append_at();
    } else {
        w.append_space_if_needed();
    }
    w.append_keyword(keyword);
    if !name.is_empty() {
        w.append_space_if_needed().append(name);
    }
    save_list(
        unit,
        w,
        type_parameters,
        save_item,
        ListLayout {
            prefix: |w: &mut StyleWriter| {
                w.append_left_arrow();
            },
            separator: |w: &mut StyleWriter| {
                w.append_comma().append_space();
            },
            suffix: |w: &mut StyleWriter| {
                w.append_right_arrow();
            },
        },
    )?;
    if let Some(extends) = *extends {
        save_list(
            unit,
            w,
            &[extends],
            save_item,
            ListLayout {
                prefix: |w: &mut StyleWriter| {
                    w.append_space_if_needed()
                        .append_keyword(Keyword::Extends)
                        .append_space();
                },
                separator: no_wrap,
                suffix: no_wrap,
            },
        )?;
    }
    save_list(
        unit,
        w,
        implements,
        save_item,
        ListLayout {
            prefix: |w: &mut StyleWriter| {
                w.append_space_if_needed()
                    .append_keyword(Keyword::Implements)
                    .append_space();
            },
            separator: |w: &mut StyleWriter| {
                w.append_comma().append_space();
            },
            suffix: no_wrap,
        },
    )?;
    save_list(
        unit,
        w,
        permits,
        save_item,
        ListLayout {
            prefix: |w: &mut StyleWriter| {
                w.append_space_if_needed()
                    .append_keyword(Keyword::Permits)
                    .append_space();
            },
            separator: |w: &mut StyleWriter| {
                w.append_comma().append_space();
            },
            suffix: no_wrap,
        },
    )?;
    w.append_space_if_needed()
        .append_left_curly_bracket()
        .append_line_separator();
    save_list(
        unit,
        w,
        members,
        |unit: &Unit, member: NodeId, w: &mut StyleWriter| {
            w.append_indent(member_indent);
            unit.save_node(member, w)?;
            w.append_line_if_needed();
            Ok(())
        },
        ListLayout {
            prefix: no_wrap,
            separator: |w: &mut StyleWriter| {
                w.append_line_separator();
            },
            suffix: no_wrap,
        },
    )?;
    w.append_indent(indent).append_right_curly_bracket();
    Ok(())
}

fn print_module(unit: &Unit, name: Option<NodeId>, w: &mut StyleWriter) -> Result<(), SaveError> {
    let name = require_retained(unit, name, "module name")?;
    w.append_keyword(Keyword::Module).append_space();
    unit.save_node(name, w)?;
    w.append_space_if_needed()
        .append_left_curly_bracket()
        .append_line_separator()
        .append_right_curly_bracket();
    Ok(())
}

fn print_modifiers(
    unit: &Unit,
    id: NodeId,
    flags: &[Modifier],
    annotations: &[NodeId],
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    // Annotations sit on their own lines above the declaration, indented
    // to the declaration's column.
    let indent = match unit.parent(id) {
        Some(parent) => unit.indent_of(parent),
        None => 0,
    };
    save_list(
        unit,
        w,
        annotations,
        |unit: &Unit, annotation: NodeId, w: &mut StyleWriter| {
            unit.save_node(annotation, w)?;
            w.append_line_separator().append_indent(indent);
            Ok(())
        },
        ListLayout {
            prefix: no_wrap,
            separator: no_wrap,
            suffix: no_wrap,
        },
    )?;
    for flag in flags {
        w.append_space_if_needed().append(flag.as_str());
    }
    Ok(())
}

fn print_annotation(
    unit: &Unit,
    annotation_type: Option<NodeId>,
    arguments: &[NodeId],
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    let annotation_type = require_retained(unit, annotation_type, "annotation type")?;
    w.append_at();
    unit.save_node(annotation_type, w)?;
    save_list(
        unit,
        w,
        arguments,
        save_item,
        ListLayout {
            prefix: |w: &mut StyleWriter| {
                w.append_left_parenthesis();
            },
            separator: |w: &mut StyleWriter| {
                w.append_comma().append_space();
            },
            suffix: |w: &mut StyleWriter| {
                w.append_right_parenthesis();
            },
        },
    )?;
    Ok(())
}

fn print_type_parameter(
    unit: &Unit,
    name: &str,
    bounds: &[NodeId],
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    w.append(name);
    save_list(
        unit,
        w,
        bounds,
        save_item,
        ListLayout {
            prefix: |w: &mut StyleWriter| {
                w.append_space_if_needed()
                    .append_keyword(Keyword::Extends)
                    .append_space();
            },
            separator: |w: &mut StyleWriter| {
                w.append_space_if_needed().append("&").append_space();
            },
            suffix: no_wrap,
        },
    )?;
    Ok(())
}

fn print_field_access(
    unit: &Unit,
    expression: Option<NodeId>,
    name: &str,
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    let expression = require_retained(unit, expression, "field access expression")?;
    unit.save_node(expression, w)?;
    w.append_dot().append(name);
    Ok(())
}

fn print_union_type(
    unit: &Unit,
    alternatives: &[NodeId],
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    save_list(
        unit,
        w,
        alternatives,
        save_item,
        ListLayout {
            prefix: no_wrap,
            separator: |w: &mut StyleWriter| {
                w.append_space_if_needed().append_pipe().append_space();
            },
            suffix: no_wrap,
        },
    )?;
    Ok(())
}

fn print_block(
    unit: &Unit,
    id: NodeId,
    is_static: bool,
    statements: &[NodeId],
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    let indent = unit.indent_of(id);
    let statement_indent = indent + unit.options().indent_width;
    if is_static {
        w.append_keyword(Keyword::Static).append_space();
    }
    w.append_left_curly_bracket().append_line_separator();
    save_list(
        unit,
        w,
        statements,
        |unit: &Unit, statement: NodeId, w: &mut StyleWriter| {
            w.append_indent(statement_indent);
            unit.save_node(statement, w)?;
            w.append_line_if_needed();
            Ok(())
        },
        ListLayout {
            prefix: no_wrap,
            separator: no_wrap,
            suffix: no_wrap,
        },
    )?;
    w.append_indent(indent).append_right_curly_bracket();
    Ok(())
}

fn print_synchronized(
    unit: &Unit,
    expression: Option<NodeId>,
    block: Option<NodeId>,
    w: &mut StyleWriter,
) -> Result<(), SaveError> {
    let expression = require_retained(unit, expression, "synchronized expression")?;
    let block = require_retained(unit, block, "synchronized block")?;
    w.append_keyword(Keyword::Synchronized)
        .append_space()
        .append_left_parenthesis();
    unit.save_node(expression, w)?;
    w.append_right_parenthesis().append_space_if_needed();
    unit.save_node(block, w)?;
    Ok(())
}
