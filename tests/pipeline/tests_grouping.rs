use doxpp::diagnostics::codes;

use crate::helpers::decls::{class, function, method, variable, within};
use crate::helpers::source::Source;
use crate::helpers::{build, messages};

#[test]
fn test_nested_groups() {
    let a = Source::new(
        "a.h",
        "/** \\defgroup g1 Outer */\n\
         /** \\defgroup g2 Inner */\n\
         /// The x.\n\
         int x;\n\
         /** \\endgroup */\n\
         int y;\n\
         /** \\endgroup */\n\
         int z;\n",
    );
    let decls = vec![
        variable(&a, "x", "int x", "int"),
        variable(&a, "y", "int y", "int"),
        variable(&a, "z", "int z", "int"),
    ];
    let output = build(vec![(a, decls)]);
    let model = &output.model;

    assert_eq!(model.entity("x").unwrap().group_id, "g2");
    assert_eq!(model.entity("x").unwrap().brief, "The x.");
    assert_eq!(model.entity("y").unwrap().group_id, "g1");
    assert_eq!(model.entity("z").unwrap().group_id, "");
    assert_eq!(model.groups["g1"].subgroups, ["g2".to_string()]);
    assert_eq!(model.groups["g2"].parent_id, "g1");
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_addtogroup_from_another_file() {
    let a = Source::new("a.h", "/** \\defgroup g Graphics\n * Drawing things. */\n/** \\endgroup */\n");
    let b = Source::new(
        "b.h",
        "/** \\addtogroup g Ignored title */\n\
         void draw();\n\
         /** \\endgroup */\n",
    );
    let draw = function(&b, "draw", "void draw", "void", &[]);
    let output = build(vec![(a, Vec::new()), (b, vec![draw])]);
    let model = &output.model;

    assert_eq!(model.entity("draw").unwrap().group_id, "g");
    assert_eq!(model.groups["g"].name, "Graphics");
    assert_eq!(model.groups["g"].brief, "Drawing things.");
    assert_eq!(model.groups.len(), 1);
}

#[test]
fn test_defgroup_ingroup_nests_under_named_parent() {
    let a = Source::new(
        "a.h",
        "/** \\defgroup parent Parent */\n\
         /** \\endgroup */\n\
         /** \\defgroup child Child\n * \\ingroup parent\n * Child group. */\n\
         /** \\endgroup */\n",
    );
    let output = build(vec![(a, Vec::new())]);
    let groups = &output.model.groups;

    assert_eq!(groups["child"].parent_id, "parent");
    assert_eq!(groups["parent"].subgroups, ["child".to_string()]);
    assert_eq!(groups["child"].brief, "Child group.");
}

#[test]
fn test_member_groups() {
    let a = Source::new(
        "a.h",
        "class Point {\n\
         /** \\name Accessors */\n\
         int x();\n\
         /** \\endname */\n\
         void reset();\n\
         };\n",
    );
    let point = within(
        class(&a, "Point", "class Point"),
        vec![
            method(&a, "Point::x", "int x", "int", &[]),
            method(&a, "Point::reset", "void reset", "void", &[]),
        ],
    );
    let output = build(vec![(a, vec![point])]);

    assert_eq!(output.model.entity("Point-x").unwrap().member_group, "Accessors");
    assert_eq!(output.model.entity("Point-reset").unwrap().member_group, "");
}

#[test]
fn test_grouping_mistakes_are_reported() {
    let a = Source::new(
        "a.h",
        "/** \\endgroup */\n\
         /** \\defgroup */\n\
         /** \\defgroup bad/id Title */\n\
         /** \\endname */\n",
    );
    let output = build(vec![(a, Vec::new())]);

    assert_eq!(messages(&output, codes::UNBALANCED_GROUP).len(), 2);
    assert_eq!(messages(&output, codes::MISSING_ARGUMENT).len(), 1);
    assert_eq!(messages(&output, codes::INVALID_ID).len(), 1);
    assert!(output.model.groups.is_empty());
}
