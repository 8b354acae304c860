use doxpp::config::{Config, JsonFormatting};
use doxpp::front_end::InMemoryFrontEnd;
use doxpp::pipeline::Pipeline;
use serde_json::Value;

use crate::helpers::decls::{class, method, namespace, within};
use crate::helpers::source::Source;

const WIDGETS: &str = "\
/** \\file
 * Widget types. */
/** \\defgroup ui User interface */
namespace ui {
/// A window.
class Window {
public:
  /// Draws it.
  void draw(int layer);
};
}
/** \\endgroup */
/** \\page usage Usage
 * Create a \\ref ui::Window. */
";

fn run(formatting: JsonFormatting) -> (tempfile::TempDir, Value) {
    let source = Source::new("widgets.h", WIDGETS);
    let window = within(
        class(&source, "ui::Window", "class Window"),
        vec![method(&source, "ui::Window::draw", "void draw", "void", &[("layer", "int")])],
    );
    let decls = vec![within(namespace(&source, "ui", "namespace ui"), vec![window])];

    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.input.header_files.push(source.path.into());
    config.json.filename = dir.path().join("model.json");
    config.json.formatting = formatting;
    let front_end = InMemoryFrontEnd::new().with_unit(source.path, source.unit(decls));

    Pipeline::new(config, front_end).run_to_file().unwrap();
    let text = std::fs::read_to_string(dir.path().join("model.json")).unwrap();
    (dir, serde_json::from_str(&text).unwrap())
}

#[test]
fn test_members_are_nested() {
    let (_dir, json) = run(JsonFormatting::Compact);
    let ui = &json["members"][0];
    assert_eq!(ui["id"], "ui");
    assert_eq!(ui["member_type"], "namespace");
    assert_eq!(ui["group"], "ui");

    let window = &ui["members"][0];
    assert_eq!(window["id"], "ui-Window");
    assert_eq!(window["member_type"], "class");
    assert_eq!(window["brief"], "A window.");
    assert_eq!(window["header"], "widgets.h");

    let draw = &window["members"][0];
    assert_eq!(draw["id"], "ui-Window-draw-int-");
    assert_eq!(draw["member_type"], "function");
    assert_eq!(draw["brief"], "Draws it.");
    assert_eq!(draw["arguments"][0]["name"], "layer");
}

#[test]
fn test_headers_groups_and_pages() {
    let (_dir, json) = run(JsonFormatting::Readable);
    assert_eq!(json["headers"][0]["id"], "widgets.h");
    assert_eq!(json["headers"][0]["brief"], "Widget types.");
    assert_eq!(json["groups"][0]["id"], "ui");
    assert_eq!(json["groups"][0]["name"], "User interface");
    assert_eq!(json["pages"][0]["id"], "usage");
    assert_eq!(json["pages"][0]["doc"], "Create a [ui::Window](#ui-Window).");
}

#[test]
fn test_readable_and_compact_carry_the_same_model() {
    let (_a, compact) = run(JsonFormatting::Compact);
    let (_b, readable) = run(JsonFormatting::Readable);
    assert_eq!(compact, readable);
}
