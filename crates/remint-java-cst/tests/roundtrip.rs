//! Round-trip and selective-regeneration tests.
//!
//! These tests verify the engine's central promise: output is
//! byte-identical to the input everywhere nothing changed, and freshly
//! printed exactly where something did — with clean deletion of list
//! elements (no dangling separators, no empty wrapper tokens).
//!
//! Each fixture hand-builds the foreign parse tree a front end would
//! produce, recording spans by searching the source text, so verbatim
//! copies exercise real byte ranges.

use difference::assert_diff;
use itertools::Itertools;
use remint_core::Span;
use remint_java_cst::{
    analyze, Action, Kind, LiteralValue, Modifier, NodeId, ParseInput, ParsedId, ParsedNode,
    ParsedTree, PropertyValue, RenderOptions, SaveError, SpanMap, StyleWriter, Unit,
};

// ============================================================================
// Helpers
// ============================================================================

/// Visualize whitespace differences in test output.
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

fn assert_text_eq(expected: &str, got: &str) {
    if expected != got {
        let got = visualize(got);
        let expected = visualize(expected);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

/// Builds a parse input over a real source string, recording spans by
/// searching for the quoted text.
struct Builder {
    source: String,
    tree: ParsedTree,
    positions: SpanMap,
}

impl Builder {
    fn new(source: &str) -> Self {
        Builder {
            source: source.to_string(),
            tree: ParsedTree::default(),
            positions: SpanMap::new(),
        }
    }

    fn find(&self, needle: &str) -> Span {
        let start = self
            .source
            .find(needle)
            .unwrap_or_else(|| panic!("fixture text not found: {:?}", needle));
        Span::new(start, start + needle.len())
    }

    fn node(&mut self, parsed: ParsedNode, span: Option<Span>) -> ParsedId {
        let id = self.tree.alloc(parsed);
        if let Some(span) = span {
            self.positions.insert(id, span);
        }
        id
    }

    fn identifier(&mut self, name: &str, span: Span) -> ParsedId {
        self.node(
            ParsedNode::Identifier {
                name: name.to_string(),
            },
            Some(span),
        )
    }

    /// A dotted name as an identifier / field-access chain, with segment
    /// spans derived from the dotted span.
    fn qualified(&mut self, dotted: &str, span: Span) -> ParsedId {
        let mut offset = span.start;
        let mut segments = dotted.split('.');
        let first = segments.next().expect("dotted name");
        let first_span = Span::new(offset, offset + first.len());
        offset += first.len();
        let mut current = self.identifier(first, first_span);
        for segment in segments {
            offset += 1; // the dot
            let end = offset + segment.len();
            current = self.node(
                ParsedNode::FieldAccess {
                    expression: current,
                    name: segment.to_string(),
                },
                Some(Span::new(span.start, end)),
            );
            offset = end;
        }
        current
    }

    fn package(&mut self, dotted: &str) -> ParsedId {
        let decl_text = format!("package {};", dotted);
        let decl_span = self.find(&decl_text);
        let name_span = Span::new(decl_span.start + "package ".len(), decl_span.end - 1);
        let name = self.qualified(dotted, name_span);
        self.node(ParsedNode::Package { name }, Some(decl_span))
    }

    fn import(&mut self, dotted: &str) -> ParsedId {
        let decl_text = format!("import {};", dotted);
        let decl_span = self.find(&decl_text);
        let name_span = Span::new(decl_span.start + "import ".len(), decl_span.end - 1);
        let qualified = self.qualified(dotted, name_span);
        self.node(
            ParsedNode::Import {
                is_static: false,
                qualified,
            },
            Some(decl_span),
        )
    }

    fn public_modifiers(&mut self) -> ParsedId {
        let span = self.find("public");
        self.node(
            ParsedNode::Modifiers {
                flags: vec![Modifier::Public],
                annotations: Vec::new(),
            },
            Some(span),
        )
    }

    fn finish(self, root: ParsedId, file_name: Option<&str>) -> ParseInput {
        ParseInput {
            source: self.source,
            tree: self.tree,
            root,
            positions: self.positions,
            file_name: file_name.map(str::to_string),
        }
    }
}

fn nodes_of(unit: &Unit, id: NodeId, name: &str) -> Vec<NodeId> {
    match unit.get(id, name).expect("property") {
        PropertyValue::Nodes(ids) => ids,
        other => panic!("expected a node list for {}, got {:?}", name, other),
    }
}

fn node_of(unit: &Unit, id: NodeId, name: &str) -> NodeId {
    match unit.get(id, name).expect("property") {
        PropertyValue::Node(id) => id,
        other => panic!("expected a node for {}, got {:?}", name, other),
    }
}

fn render(unit: &Unit) -> String {
    unit.render()
        .expect("render")
        .expect("unit not excluded from output")
}

// ============================================================================
// Fixtures
// ============================================================================

const IMPLEMENTS_SOURCE: &str = "package a.b;\n\npublic class Foo implements A, B {\n}\n";

/// `class Foo implements A, B { }` with a package declaration.
fn implements_fixture() -> Unit {
    let mut b = Builder::new(IMPLEMENTS_SOURCE);
    let package = b.package("a.b");
    let modifiers = b.public_modifiers();
    let span_a = b.find("A, B");
    let clause_a = b.identifier("A", Span::new(span_a.start, span_a.start + 1));
    let span_b = Span::new(span_a.end - 1, span_a.end);
    let clause_b = b.identifier("B", span_b);
    let class_span = b.find("public class Foo implements A, B {\n}");
    let class = b.node(
        ParsedNode::ClassDecl {
            kind: Kind::Class,
            modifiers: Some(modifiers),
            name: "Foo".to_string(),
            type_parameters: Vec::new(),
            extends: None,
            implements: vec![clause_a, clause_b],
            permits: Vec::new(),
            members: Vec::new(),
        },
        Some(class_span),
    );
    let root = b.node(
        ParsedNode::CompilationUnit {
            package: Some(package),
            imports: Vec::new(),
            module: None,
            types: vec![class],
        },
        None,
    );
    analyze(b.finish(root, Some("Foo.java")), RenderOptions::default())
}

const IMPORTS_SOURCE: &str =
    "package a.b;\n\nimport a.b.*; // utilities\nimport c.d.E;\n\npublic class Foo {\n}\n";

/// Two imports, the first with an inline comment, then a class.
fn imports_fixture() -> Unit {
    let mut b = Builder::new(IMPORTS_SOURCE);
    let package = b.package("a.b");
    let star_import = b.import("a.b.*");
    let plain_import = b.import("c.d.E");
    let modifiers = b.public_modifiers();
    let class_span = b.find("public class Foo {\n}");
    let class = b.node(
        ParsedNode::ClassDecl {
            kind: Kind::Class,
            modifiers: Some(modifiers),
            name: "Foo".to_string(),
            type_parameters: Vec::new(),
            extends: None,
            implements: Vec::new(),
            permits: Vec::new(),
            members: Vec::new(),
        },
        Some(class_span),
    );
    let root = b.node(
        ParsedNode::CompilationUnit {
            package: Some(package),
            imports: vec![star_import, plain_import],
            module: None,
            types: vec![class],
        },
        None,
    );
    analyze(b.finish(root, Some("Foo.java")), RenderOptions::default())
}

const NESTED_SOURCE: &str = "package a.b;\n\npublic class Foo {\n    static {\n        synchronized (lock) {\n        }\n    }\n}\n";

/// A class with a static initializer holding a synchronized statement.
fn nested_fixture() -> Unit {
    let mut b = Builder::new(NESTED_SOURCE);
    let package = b.package("a.b");
    let modifiers = b.public_modifiers();
    let lock_span = b.find("lock");
    let lock = b.identifier("lock", lock_span);
    let inner_span = b.find("{\n        }");
    let inner_block = b.node(
        ParsedNode::Block {
            is_static: false,
            statements: Vec::new(),
        },
        Some(inner_span),
    );
    let sync_span = b.find("synchronized (lock) {\n        }");
    let sync = b.node(
        ParsedNode::Synchronized {
            expression: lock,
            block: inner_block,
        },
        Some(sync_span),
    );
    let member_span = b.find("static {\n        synchronized (lock) {\n        }\n    }");
    let member = b.node(
        ParsedNode::Block {
            is_static: true,
            statements: vec![sync],
        },
        Some(member_span),
    );
    let class_span = b.find("public class Foo {");
    let class_span = Span::new(class_span.start, NESTED_SOURCE.rfind('}').unwrap() + 1);
    let class = b.node(
        ParsedNode::ClassDecl {
            kind: Kind::Class,
            modifiers: Some(modifiers),
            name: "Foo".to_string(),
            type_parameters: Vec::new(),
            extends: None,
            implements: Vec::new(),
            permits: Vec::new(),
            members: vec![member],
        },
        Some(class_span),
    );
    let root = b.node(
        ParsedNode::CompilationUnit {
            package: Some(package),
            imports: Vec::new(),
            module: None,
            types: vec![class],
        },
        None,
    );
    analyze(b.finish(root, Some("Foo.java")), RenderOptions::default())
}

/// A tiny host unit for printer-level tests on synthesized nodes.
fn scratch_unit() -> Unit {
    let mut b = Builder::new("class Scratch {\n}\n");
    let class_span = b.find("class Scratch {\n}");
    let class = b.node(
        ParsedNode::ClassDecl {
            kind: Kind::Class,
            modifiers: None,
            name: "Scratch".to_string(),
            type_parameters: Vec::new(),
            extends: None,
            implements: Vec::new(),
            permits: Vec::new(),
            members: Vec::new(),
        },
        Some(class_span),
    );
    let root = b.node(
        ParsedNode::CompilationUnit {
            package: None,
            imports: Vec::new(),
            module: None,
            types: vec![class],
        },
        None,
    );
    analyze(b.finish(root, None), RenderOptions::default())
}

fn print_one(unit: &Unit, id: NodeId) -> String {
    let mut w = StyleWriter::new(unit.options());
    unit.save_node(id, &mut w).expect("save");
    w.into_string()
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn unmutated_units_reproduce_their_input() {
    assert_text_eq(IMPLEMENTS_SOURCE, &render(&implements_fixture()));
    assert_text_eq(IMPORTS_SOURCE, &render(&imports_fixture()));
    assert_text_eq(NESTED_SOURCE, &render(&nested_fixture()));
}

// ============================================================================
// Scenario A: clean deletion from a clause list
// ============================================================================

#[test]
fn ignoring_one_implements_clause_leaves_no_dangling_comma() {
    let mut unit = implements_fixture();
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    let clauses = nodes_of(&unit, class, "implementsClauses");
    unit.mark_ignored(clauses[1]);

    assert_text_eq(
        "package a.b;\n\npublic class Foo implements A {\n}\n",
        &render(&unit),
    );
}

#[test]
fn ignoring_every_implements_clause_drops_the_keyword() {
    let mut unit = implements_fixture();
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    for clause in nodes_of(&unit, class, "implementsClauses") {
        unit.mark_ignored(clause);
    }

    assert_text_eq("package a.b;\n\npublic class Foo {\n}\n", &render(&unit));
}

#[test]
fn ignoring_a_whole_type_declaration_swallows_its_leading_gap() {
    let mut unit = implements_fixture();
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    unit.mark_ignored(class);

    assert_text_eq("package a.b;\n", &render(&unit));
}

// ============================================================================
// Scenario B: package rename, siblings verbatim
// ============================================================================

#[test]
fn package_rename_reprints_only_the_package() {
    let mut unit = imports_fixture();
    let package = node_of(&unit, unit.root(), "package");
    let new_name = unit.new_qualified_name("x.y");
    unit.set(package, "packageName", PropertyValue::Node(new_name))
        .expect("set package name");

    assert_text_eq(
        "package x.y;\n\nimport a.b.*; // utilities\nimport c.d.E;\n\npublic class Foo {\n}\n",
        &render(&unit),
    );

    // Untouched siblings stayed verbatim-eligible.
    let imports = nodes_of(&unit, unit.root(), "imports");
    assert_eq!(unit.action(imports[0]), Action::Unmodified);
    assert_eq!(unit.action(imports[1]), Action::Unmodified);
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    assert_eq!(unit.action(class), Action::Unmodified);
    assert_eq!(unit.action(unit.root()), Action::Changed);
}

// ============================================================================
// Scenario C: import rewrite, sibling comments verbatim
// ============================================================================

#[test]
fn import_rewrite_keeps_sibling_comments() {
    let mut unit = imports_fixture();
    let imports = nodes_of(&unit, unit.root(), "imports");
    let new_name = unit.new_qualified_name("c.d.e");
    unit.set(imports[0], "staticImport", PropertyValue::Bool(true))
        .expect("set static");
    unit.set(imports[0], "qualifiedIdentifier", PropertyValue::Node(new_name))
        .expect("set name");

    assert_text_eq(
        "package a.b;\n\nimport static c.d.e; // utilities\nimport c.d.E;\n\npublic class Foo {\n}\n",
        &render(&unit),
    );
}

// ============================================================================
// Scenario D: synthesized nodes always print structurally
// ============================================================================

#[test]
fn synthesized_import_has_no_position_and_prints_structurally() {
    let mut unit = imports_fixture();
    let synthesized = unit.new_import();
    assert!(!unit.position(synthesized).is_valid());
    assert_eq!(unit.action(synthesized), Action::Changed);

    let name = unit.new_qualified_name("q.r");
    unit.set(synthesized, "qualifiedIdentifier", PropertyValue::Node(name))
        .expect("set name");
    let mut imports = nodes_of(&unit, unit.root(), "imports");
    imports.push(synthesized);
    unit.set(unit.root(), "imports", PropertyValue::Nodes(imports))
        .expect("set imports");

    assert_text_eq(
        "package a.b;\n\nimport a.b.*; // utilities\nimport c.d.E;\nimport q.r;\n\n\npublic class Foo {\n}\n",
        &render(&unit),
    );
}

// ============================================================================
// Escalation
// ============================================================================

#[test]
fn deep_mutation_escalates_every_strict_ancestor() {
    let mut unit = nested_fixture();
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    let member = nodes_of(&unit, class, "members")[0];
    let sync = nodes_of(&unit, member, "statements")[0];
    let inner_block = node_of(&unit, sync, "block");

    let mutex = unit.new_identifier("mutex");
    unit.set(sync, "expression", PropertyValue::Node(mutex))
        .expect("set expression");

    assert_eq!(unit.action(sync), Action::Changed);
    assert_eq!(unit.action(member), Action::Changed);
    assert_eq!(unit.action(class), Action::Changed);
    assert_eq!(unit.action(unit.root()), Action::Changed);
    // The untouched subtree keeps its verbatim eligibility.
    assert_eq!(unit.action(inner_block), Action::Unmodified);
    let package = node_of(&unit, unit.root(), "package");
    assert_eq!(unit.action(package), Action::Unmodified);

    assert_text_eq(
        "package a.b;\n\npublic class Foo {\n    static {\n        synchronized (mutex) {\n        }\n    }\n}\n",
        &render(&unit),
    );
}

#[test]
fn action_transitions_are_monotonic() {
    let mut unit = implements_fixture();
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    let clause = nodes_of(&unit, class, "implementsClauses")[1];
    unit.mark_ignored(clause);
    unit.mark_changed(clause);
    assert_eq!(unit.action(clause), Action::Ignored);
}

// ============================================================================
// Unit-level exclusion vs in-place deletion
// ============================================================================

#[test]
fn ignored_root_excludes_the_unit_from_output() {
    let mut unit = implements_fixture();
    unit.mark_ignored(unit.root());
    assert!(unit.render().expect("render").is_none());
}

// ============================================================================
// Header preservation
// ============================================================================

const HEADER_SOURCE: &str = "/* (c) ACME */\npackage a.b;\n\npublic class Foo {\n}\n";

fn header_fixture(options: RenderOptions) -> Unit {
    let mut b = Builder::new(HEADER_SOURCE);
    let package = b.package("a.b");
    let modifiers = b.public_modifiers();
    let class_span = b.find("public class Foo {\n}");
    let class = b.node(
        ParsedNode::ClassDecl {
            kind: Kind::Class,
            modifiers: Some(modifiers),
            name: "Foo".to_string(),
            type_parameters: Vec::new(),
            extends: None,
            implements: Vec::new(),
            permits: Vec::new(),
            members: Vec::new(),
        },
        Some(class_span),
    );
    let root = b.node(
        ParsedNode::CompilationUnit {
            package: Some(package),
            imports: Vec::new(),
            module: None,
            types: vec![class],
        },
        None,
    );
    analyze(b.finish(root, Some("Foo.java")), options)
}

#[test]
fn license_banner_survives_regeneration_when_preserved() {
    let mut unit = header_fixture(RenderOptions::default());
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    unit.set(class, "simpleName", PropertyValue::Str("Bar".to_string()))
        .expect("rename");

    assert_text_eq(
        "/* (c) ACME */\npackage a.b;\n\npublic class Bar {\n}\n",
        &render(&unit),
    );
}

#[test]
fn license_banner_is_dropped_when_preservation_is_off() {
    let mut unit = header_fixture(RenderOptions {
        preserve_header: false,
        ..RenderOptions::default()
    });
    let class = nodes_of(&unit, unit.root(), "typeDecls")[0];
    unit.set(class, "simpleName", PropertyValue::Str("Bar".to_string()))
        .expect("rename");

    assert_text_eq("package a.b;\n\npublic class Bar {\n}\n", &render(&unit));
}

// ============================================================================
// Printer-level checks on synthesized trees
// ============================================================================

#[test]
fn union_type_deletion_leaves_no_dangling_pipe() {
    let mut unit = scratch_unit();
    let union = unit.new_union_type();
    let alternatives: Vec<NodeId> = ["A", "B", "C"]
        .iter()
        .map(|name| unit.new_identifier(*name))
        .collect();
    unit.set(
        union,
        "typeAlternatives",
        PropertyValue::Nodes(alternatives.clone()),
    )
    .expect("set alternatives");
    assert_eq!(print_one(&unit, union), "A | B | C");

    unit.mark_ignored(alternatives[1]);
    assert_eq!(print_one(&unit, union), "A | C");

    unit.mark_ignored(alternatives[0]);
    unit.mark_ignored(alternatives[2]);
    assert_eq!(print_one(&unit, union), "");
}

#[test]
fn synthesized_class_prints_every_clause() {
    let mut unit = scratch_unit();
    let class = unit.new_class_decl(Kind::Class, "Foo").expect("class");
    let modifiers = unit.new_modifiers(vec![Modifier::Public, Modifier::Final]);
    unit.set(class, "modifiers", PropertyValue::Node(modifiers))
        .expect("modifiers");
    let t = unit.new_type_parameter("T");
    unit.set(class, "typeParameters", PropertyValue::Nodes(vec![t]))
        .expect("type parameters");
    let base = unit.new_identifier("Base");
    unit.set(class, "extendsClause", PropertyValue::Node(base))
        .expect("extends");
    let a = unit.new_identifier("A");
    let b = unit.new_identifier("B");
    unit.set(class, "implementsClauses", PropertyValue::Nodes(vec![a, b]))
        .expect("implements");

    assert_eq!(
        print_one(&unit, class),
        "public final class Foo<T> extends Base implements A, B {\n}"
    );
}

#[test]
fn annotation_with_no_arguments_prints_no_parentheses() {
    let mut unit = scratch_unit();
    let annotation = unit.new_annotation();
    let name = unit.new_qualified_name("X.Y.Z");
    unit.set(annotation, "annotationType", PropertyValue::Node(name))
        .expect("type");
    assert_eq!(print_one(&unit, annotation), "@X.Y.Z");

    let one = unit.new_literal(LiteralValue::Int(1));
    let flag = unit.new_literal(LiteralValue::Bool(true));
    unit.set(annotation, "arguments", PropertyValue::Nodes(vec![one, flag]))
        .expect("arguments");
    assert_eq!(print_one(&unit, annotation), "@X.Y.Z(1, true)");
}

#[test]
fn annotation_type_declaration_uses_at_interface() {
    let mut unit = scratch_unit();
    let marker = unit
        .new_class_decl(Kind::AnnotationType, "Marker")
        .expect("annotation type");
    assert_eq!(print_one(&unit, marker), "@interface Marker {\n}");
}

#[test]
fn class_keyword_table_rejects_drifted_kinds() {
    let mut unit = scratch_unit();
    // Forge a declaration whose kind is outside the closed class set, as
    // a model/printer drift would.
    let drifted = unit.synthesize(remint_java_cst::NodeData::ClassDecl {
        kind: Kind::Import,
        modifiers: None,
        name: "X".to_string(),
        type_parameters: Vec::new(),
        extends: None,
        implements: Vec::new(),
        permits: Vec::new(),
        members: Vec::new(),
    });
    let mut w = StyleWriter::new(unit.options());
    let err = unit.save_node(drifted, &mut w).unwrap_err();
    assert!(matches!(err, SaveError::InvalidKind { .. }));
}

// ============================================================================
// Invariant violations fail fast
// ============================================================================

#[test]
fn unmodified_node_without_span_is_an_invariant_violation() {
    let source = "package a.b;\n\nimport a.b.C;\n";
    let mut b = Builder::new(source);
    let package = b.package("a.b");
    // The import is real input but the front end recorded no span for it.
    let qualified = b.qualified("a.b.C", b.find("a.b.C"));
    let import = b.node(
        ParsedNode::Import {
            is_static: false,
            qualified,
        },
        None,
    );
    let root = b.node(
        ParsedNode::CompilationUnit {
            package: Some(package),
            imports: vec![import],
            module: None,
            types: Vec::new(),
        },
        None,
    );
    let mut unit = analyze(b.finish(root, None), RenderOptions::default());

    // Any mutation forces the unit through the reassembly path, where the
    // span-less unmodified import cannot be copied verbatim.
    let new_name = unit.new_qualified_name("x.y");
    let package = node_of(&unit, unit.root(), "package");
    unit.set(package, "packageName", PropertyValue::Node(new_name))
        .expect("set package name");

    let err = unit.render().unwrap_err();
    assert!(matches!(err, SaveError::InvariantViolation { .. }));
}
