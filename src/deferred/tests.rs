use rstest::rstest;

use super::*;
use crate::diagnostics::Severity;
use crate::model::{Argument, ClassData, FunctionData, TypeRef};

fn command(name: &str, args: &str, body: &str) -> DeferredCommand {
    DeferredCommand {
        command: name.to_string(),
        args: args.to_string(),
        body: body.to_string(),
        file: Arc::from("lib/a.h"),
        header_id: "lib%2Fa.h".to_string(),
        line: 4,
        active_group: String::new(),
    }
}

fn run(ctx: &mut BuildContext, commands: Vec<DeferredCommand>) {
    ctx.deferred = commands;
    process(ctx);
}

/// A model holding `namespace ns { class W; int f(int); }`.
fn context() -> BuildContext {
    let mut ctx = BuildContext::new(Severity::Error);
    let entities = &mut ctx.model.entities;
    entities.insert(Entity::new("ns", "ns", EntityKind::Namespace));
    entities.insert(Entity::new("ns-W", "W", EntityKind::Class(ClassData::default())).with_parent("ns"));
    let f = FunctionData {
        arguments: vec![Argument {
            name: "x".into(),
            type_ref: TypeRef::named("int"),
            default: String::new(),
        }],
        ..FunctionData::default()
    };
    entities.insert(Entity::new("ns-f-int-", "f", EntityKind::Function(f)).with_parent("ns"));
    ctx
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
fn test_macro_is_created() {
    let mut ctx = context();
    let mut max = command("macro", "MAX(a, b)", "Larger of two.\n\nEvaluates twice.");
    max.active_group = "util".into();
    run(&mut ctx, vec![max, command("def", "VERSION", "Library version.")]);

    let max = ctx.model.entity("MAX").unwrap();
    assert_eq!(max.brief, "Larger of two.");
    assert_eq!(max.doc, "Evaluates twice.");
    assert_eq!(max.group_id, "util");
    assert_eq!(max.header_id, "lib%2Fa.h");
    assert_eq!(
        max.kind,
        EntityKind::Macro(MacroData {
            parameters: Some(vec!["a".into(), "b".into()])
        })
    );
    let version = ctx.model.entity("VERSION").unwrap();
    assert_eq!(version.kind, EntityKind::Macro(MacroData { parameters: None }));
}

#[test]
fn test_macro_parameter_mismatch_warns() {
    let mut ctx = context();
    run(
        &mut ctx,
        vec![command("macro", "MAX(a, b)", "One."), command("macro", "MAX(x)", "Two.")],
    );
    assert_eq!(ctx.diagnostics.with_code(codes::MACRO_PARAMETERS).len(), 1);
    assert_eq!(ctx.model.entities.len(), 4);
}

#[test]
fn test_macro_ingroup() {
    let mut ctx = context();
    run(&mut ctx, vec![command("macro", "MIN(a, b)", "Smaller.\n\\ingroup util")]);
    let min = ctx.model.entity("MIN").unwrap();
    assert_eq!(min.group_id, "util");
    assert_eq!(min.brief, "Smaller.");
}

#[test]
fn test_macro_without_name() {
    let mut ctx = context();
    run(&mut ctx, vec![command("macro", "", "Nothing.")]);
    assert_eq!(ctx.diagnostics.with_code(codes::MISSING_ARGUMENT).len(), 1);
}

// ============================================================================
// PAGES AND FILES
// ============================================================================

#[test]
fn test_page_append() {
    let mut ctx = context();
    run(
        &mut ctx,
        vec![
            command("page", "intro \"Getting started\"", "First part."),
            command("page", "intro Ignored", "Second part."),
            command("mainpage", "Widgets", "Welcome."),
        ],
    );
    let intro = &ctx.model.pages["intro"];
    assert_eq!(intro.title, "Getting started");
    assert_eq!(intro.doc, "First part.\n\nSecond part.");
    let main = &ctx.model.pages[MAIN_PAGE_ID];
    assert_eq!(main.title, "Widgets");
    assert_eq!(main.doc, "Welcome.");
}

#[rstest]
#[case("", codes::MISSING_ARGUMENT)]
#[case("intro", codes::MISSING_ARGUMENT)]
#[case("in/tro Title", codes::INVALID_ID)]
fn test_page_errors(#[case] args: &str, #[case] code: &str) {
    let mut ctx = context();
    run(&mut ctx, vec![command("page", args, "Text.")]);
    assert!(ctx.model.pages.is_empty());
    assert_eq!(ctx.diagnostics.with_code(code).len(), 1);
}

#[test]
fn test_named_file_creates_header() {
    let mut ctx = context();
    run(
        &mut ctx,
        vec![
            command("file", "lib/b.h", "Helpers.\n\nMore."),
            command("file", "", "Current."),
        ],
    );
    let b = &ctx.model.headers["lib%2Fb.h"];
    assert_eq!(b.name, "lib/b.h");
    assert_eq!(b.brief, "Helpers.");
    assert_eq!(b.doc, "More.");
    assert_eq!(ctx.model.headers["lib%2Fa.h"].brief, "Current.");
}

// ============================================================================
// OUT-OF-LINE DOCUMENTATION
// ============================================================================

#[test]
fn test_function_documented_out_of_line() {
    let mut ctx = context();
    run(&mut ctx, vec![command("fn", "int ns::f(int x)", "Doubles.\n\nReturns 2x.")]);
    let f = ctx.model.entity("ns-f-int-").unwrap();
    assert_eq!(f.brief, "Doubles.");
    assert_eq!(f.doc, "Returns 2x.");
    assert!(ctx.diagnostics.diagnostics().is_empty());
}

#[test]
fn test_out_of_line_appends() {
    let mut ctx = context();
    ctx.model.entities.get_mut("ns-W").unwrap().brief = "Widget.".into();
    run(&mut ctx, vec![command("class", "ns::W", "Other brief.\n\nExtra.")]);
    let w = ctx.model.entity("ns-W").unwrap();
    assert_eq!(w.brief, "Widget.");
    assert_eq!(w.doc, "Extra.");
}

#[test]
fn test_struct_command_accepts_class() {
    let mut ctx = context();
    run(&mut ctx, vec![command("struct", "ns::W", "Widget.")]);
    assert!(ctx.diagnostics.with_code(codes::KIND_MISMATCH).is_empty());
}

#[test]
fn test_kind_mismatch_still_documents() {
    let mut ctx = context();
    run(&mut ctx, vec![command("class", "ns::f", "Not a class.")]);
    assert_eq!(ctx.diagnostics.with_code(codes::KIND_MISMATCH).len(), 1);
    assert_eq!(ctx.model.entity("ns-f-int-").unwrap().brief, "Not a class.");
}

#[test]
fn test_unknown_declaration() {
    let mut ctx = context();
    run(&mut ctx, vec![command("variable", "ns::missing", "Gone.")]);
    assert_eq!(ctx.diagnostics.with_code(codes::UNRESOLVED_DECLARATION).len(), 1);
}

#[test]
fn test_out_of_line_ingroup_conflict() {
    let mut ctx = context();
    ctx.model.entities.get_mut("ns-W").unwrap().group_id = "core".into();
    run(
        &mut ctx,
        vec![
            command("class", "ns::W", "Widget.\n\\ingroup extra"),
            command("fn", "ns::f", "F.\n\\ingroup extra"),
        ],
    );
    assert_eq!(ctx.model.entity("ns-W").unwrap().group_id, "core");
    assert_eq!(ctx.model.entity("ns-f-int-").unwrap().group_id, "extra");
    assert_eq!(ctx.diagnostics.with_code(codes::GROUP_CONFLICT).len(), 1);
}

#[rstest]
#[case("ns::W", "ns::W")]
#[case("int ns::f(int x)", "ns::f(int x)")]
#[case("const std::string& name() const;", "name() const")]
#[case("bool operator==(const A& other) const", "operator==(const A& other) const")]
#[case("A* A::clone()", "A::clone()")]
fn test_declaration_name(#[case] args: &str, #[case] expected: &str) {
    assert_eq!(declaration_name(args), expected);
}

#[test]
fn test_macro_signature() {
    assert_eq!(macro_signature("NAME"), ("NAME", None));
    assert_eq!(
        macro_signature("CALL(f, ...)"),
        ("CALL", Some(vec!["f".to_string(), "...".to_string()]))
    );
}
