use doxpp::diagnostics::codes;
use doxpp::front_end::{Decl, DeclKind};

use crate::helpers::decls::{class, decl, function, method, namespace, variable, within};
use crate::helpers::source::Source;
use crate::helpers::{build, messages};

const LIBRARY: &str = "\
namespace ns {
class A {
public:
  /// Reads \\ref foo, not \\ref ::foo.
  void method();
  int foo;
};
static int foo;
/// Int version.
void f(int x);
/// Double version, reading \\ref foo.
void f(double x);
}
extern int foo;
/// See \\ref ns::f(double) and \\ref ns::f().
void g();
/// Swaps two values.
/// \\relates ns::A
void swap(ns::A& a, ns::A& b);
";

fn library() -> (Source, Vec<Decl>) {
    let source = Source::new("lib.h", LIBRARY);
    let a = within(
        class(&source, "ns::A", "class A"),
        vec![
            method(&source, "ns::A::method", "void method", "void", &[]),
            decl(&source, DeclKind::FieldDecl, "ns::A::foo", "int foo"),
        ],
    );
    let ns = within(
        namespace(&source, "ns", "namespace ns"),
        vec![
            a,
            variable(&source, "ns::foo", "static int foo", "int"),
            function(&source, "ns::f", "void f(int x)", "void", &[("x", "int")]),
            function(&source, "ns::f", "void f(double x)", "void", &[("x", "double")]),
        ],
    );
    let decls = vec![
        ns,
        variable(&source, "foo", "extern int foo", "int"),
        function(&source, "g", "void g", "void", &[]),
        function(
            &source,
            "swap",
            "void swap",
            "void",
            &[("a", "ns::A &"), ("b", "ns::A &")],
        ),
    ];
    (source, decls)
}

#[test]
fn test_references_resolve_from_the_enclosing_scope() {
    let output = build(vec![library()]);
    let method = output.model.entity("ns-A-method").unwrap();
    assert_eq!(method.brief, "Reads [foo](#ns-A-foo), not [::foo](#foo).");
    let double = output.model.entity("ns-f-double-").unwrap();
    assert_eq!(double.brief, "Double version, reading [foo](#ns-foo).");
    assert!(messages(&output, codes::UNRESOLVED_REFERENCE).is_empty());
}

#[test]
fn test_references_pick_overloads() {
    let output = build(vec![library()]);
    let g = output.model.entity("g").unwrap();
    assert_eq!(
        g.brief,
        "See [ns::f(double)](#ns-f-double-) and [ns::f()](#ns-f-int-)."
    );
}

#[test]
fn test_relates_across_namespaces() {
    let output = build(vec![library()]);
    let swap = output.model.entities.iter().find(|e| e.name == "swap").unwrap();
    assert_eq!(swap.relates, "ns-A");
    assert_eq!(swap.brief, "Swaps two values.");
    let a = output.model.entity("ns-A").unwrap();
    assert_eq!(a.kind.class_data().unwrap().related, vec![swap.id.clone()]);
}

#[test]
fn test_out_of_line_function_in_another_file() {
    let notes = Source::new(
        "notes.h",
        "/** \\fn void ns::f(int x)\n * Ignored brief.\n *\n * Extended. */\n",
    );
    let output = build(vec![library(), (notes, Vec::new())]);
    let f = output.model.entity("ns-f-int-").unwrap();
    assert_eq!(f.brief, "Int version.");
    assert_eq!(f.doc, "Extended.");
    let double = output.model.entity("ns-f-double-").unwrap();
    assert_eq!(double.doc, "");
}

#[test]
fn test_unresolved_reference_keeps_text() {
    let source = Source::new("a.h", "/// Uses \\ref Missing.\nvoid h();\n");
    let h = function(&source, "h", "void h", "void", &[]);
    let output = build(vec![(source, vec![h])]);
    assert_eq!(output.model.entity("h").unwrap().brief, "Uses Missing.");
    assert_eq!(messages(&output, codes::UNRESOLVED_REFERENCE).len(), 1);
}

#[test]
fn test_page_tree_rejects_cycles() {
    let pages = Source::new(
        "pages.h",
        "\
/** \\mainpage Manual
 * Start with \\subpage intro. */
/** \\page intro Introduction
 * Back to \\subpage index. */
",
    );
    let output = build(vec![(pages, Vec::new())]);
    let model = &output.model;

    assert_eq!(model.pages["index"].doc, "Start with [Introduction](#intro).");
    assert_eq!(model.pages["index"].subpages, vec!["intro".to_string()]);
    assert_eq!(model.pages["intro"].parent_id, "index");
    assert_eq!(model.pages["intro"].doc, "Back to Manual.");
    assert_eq!(messages(&output, codes::SUBPAGE_CONFLICT).len(), 1);
}
