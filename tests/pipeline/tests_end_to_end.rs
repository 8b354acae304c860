use doxpp::diagnostics::codes;

use crate::helpers::decls::{class, forward_class, function, method, namespace, within};
use crate::helpers::source::Source;
use crate::helpers::{build, messages};

fn a_h() -> Source {
    Source::new("a.h", "/// \\defgroup grp \"Group\"\n\nclass Foo {};\n")
}

fn b_h() -> Source {
    Source::new("b.h", "/** \\ingroup grp */\nvoid bar();\n")
}

#[test]
fn test_group_carries_across_files() {
    let a = a_h();
    let foo = class(&a, "Foo", "class Foo");
    let b = b_h();
    let bar = function(&b, "bar", "void bar", "void", &[]);
    let output = build(vec![(a, vec![foo]), (b, vec![bar])]);
    let model = &output.model;

    let foo = model.entity_by_name("Foo").unwrap();
    let bar = model.entity_by_name("bar").unwrap();
    assert_eq!(foo.group_id, "grp");
    assert_eq!(bar.group_id, "grp");
    assert_eq!(bar.brief, "");
    assert_eq!(model.groups["grp"].name, "Group");
    assert!(model.groups["grp"].subgroups.is_empty());
    assert_eq!(model.entities.len(), 2);
    assert_eq!(messages(&output, codes::UNTERMINATED_GROUP).len(), 1);
}

#[test]
fn test_runs_are_deterministic() {
    let run = || {
        let a = a_h();
        let foo = class(&a, "Foo", "class Foo");
        let b = b_h();
        let bar = function(&b, "bar", "void bar", "void", &[]);
        build(vec![(a, vec![foo]), (b, vec![bar])])
            .model
            .to_json(Default::default())
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_documented_redeclaration_wins() {
    let a = Source::new("a.h", "/// Old text.\nint compute(int x);\n");
    let first = function(&a, "compute", "int compute", "int", &[("x", "int")]);
    let b = Source::new("b.h", "/// Computes.\n///\n/// Fast.\nint compute(int value);\n");
    let second = function(&b, "compute", "int compute", "int", &[("value", "int")]);
    let output = build(vec![(a, vec![first]), (b, vec![second])]);

    assert_eq!(output.model.entities.len(), 1);
    let compute = output.model.entity("compute-int-").unwrap();
    assert_eq!(compute.brief, "Computes.");
    assert_eq!(compute.doc, "Fast.");
    assert_eq!(compute.header_id, "a.h");
    let arguments = &compute.kind.function().unwrap().arguments;
    assert_eq!(arguments[0].name, "x");
}

#[test]
fn test_forward_declaration_then_definition() {
    let a = Source::new("a.h", "class Widget;\n");
    let forward = forward_class(&a, "Widget", "class Widget");
    let b = Source::new("b.h", "/// A widget.\nclass Widget {};\n");
    let definition = class(&b, "Widget", "class Widget");
    let output = build(vec![(a, vec![forward]), (b, vec![definition])]);

    assert_eq!(output.model.entities.len(), 1);
    let widget = output.model.entity("Widget").unwrap();
    assert!(!widget.ghost);
    assert_eq!(widget.brief, "A widget.");
    assert_eq!(widget.header_id, "b.h");
}

#[test]
fn test_out_of_order_member_definition() {
    let decl_h = Source::new("decl.h", "namespace ui {\nclass Window {\n  void draw();\n};\n}\n");
    let impl_h = Source::new("impl.h", "/// Draws.\nvoid ui::Window::draw() {}\n");

    let window = within(
        class(&decl_h, "ui::Window", "class Window"),
        vec![method(&decl_h, "ui::Window::draw", "void draw", "void", &[])],
    );
    let ui = within(namespace(&decl_h, "ui", "namespace ui"), vec![window]);
    let draw = method(&impl_h, "ui::Window::draw", "void ui::Window::draw", "void", &[])
        .with_semantic_parent(ui.children[0].symbol_ref());

    let output = build(vec![(impl_h, vec![draw]), (decl_h, vec![ui])]);
    let model = &output.model;

    assert_eq!(model.entities.ids(), vec!["ui", "ui-Window", "ui-Window-draw"]);
    assert!(model.entities.iter().all(|e| !e.ghost));
    assert_eq!(model.entity("ui-Window-draw").unwrap().brief, "Draws.");
    assert_eq!(model.entity("ui-Window").unwrap().header_id, "decl.h");
    assert_eq!(model.entity("ui-Window-draw").unwrap().header_id, "impl.h");
}
