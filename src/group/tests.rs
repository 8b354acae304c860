use super::*;
use crate::comment::opening_command;

struct Fixture {
    state: GroupState,
    groups: IndexMap<String, Group>,
    diagnostics: DiagnosticCollector,
}

impl Fixture {
    fn new() -> Self {
        Self {
            state: GroupState::new("lib/a.h"),
            groups: IndexMap::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn command(&mut self, line: u32, text: &str) {
        let command = opening_command(text).expect("a block command");
        assert!(self.state.apply(&command, line, &mut self.groups, &mut self.diagnostics));
    }
}

#[test]
fn test_group_at_line_uses_earlier_transitions() {
    let transitions = vec![(2, "g1".to_string()), (10, "g2".to_string()), (20, String::new())];
    assert_eq!(group_at_line(&transitions, 1), "");
    assert_eq!(group_at_line(&transitions, 2), "");
    assert_eq!(group_at_line(&transitions, 3), "g1");
    assert_eq!(group_at_line(&transitions, 15), "g2");
    assert_eq!(group_at_line(&transitions, 21), "");
}

#[test]
fn test_nested_defgroups() {
    let mut f = Fixture::new();
    f.command(1, "\\defgroup g1 \"Outer group\"\nOuter brief.\nOuter doc.");
    f.command(5, "\\defgroup g2 Inner group");
    f.command(9, "\\endgroup");
    f.command(12, "\\endgroup");

    let g1 = &f.groups["g1"];
    assert_eq!(g1.name, "Outer group");
    assert_eq!(g1.brief, "Outer brief.");
    assert_eq!(g1.doc, "Outer doc.");
    assert_eq!(g1.subgroups, vec!["g2".to_string()]);
    assert_eq!(f.groups["g2"].parent_id, "g1");

    assert_eq!(f.state.group_at_line(3), "g1");
    assert_eq!(f.state.group_at_line(7), "g2");
    assert_eq!(f.state.group_at_line(10), "g1");
    assert_eq!(f.state.group_at_line(13), "");
    assert!(f.diagnostics.diagnostics().is_empty());
}

#[test]
fn test_subgroup_added_once() {
    let mut f = Fixture::new();
    f.command(1, "\\defgroup g1 Outer");
    f.command(2, "\\addtogroup g2");
    f.command(3, "\\endgroup");
    f.command(4, "\\addtogroup g2");
    f.command(5, "\\endgroup");
    assert_eq!(f.groups["g1"].subgroups, vec!["g2".to_string()]);
}

#[test]
fn test_addtogroup_does_not_set_docs() {
    let mut f = Fixture::new();
    f.command(1, "\\addtogroup grp Ignored title\nIgnored text.");
    f.command(2, "\\endgroup");
    let grp = &f.groups["grp"];
    assert!(grp.name.is_empty());
    assert!(grp.brief.is_empty());

    f.command(3, "\\defgroup grp Real title\nBrief.");
    assert_eq!(f.groups["grp"].name, "Real title");
    assert_eq!(f.groups["grp"].brief, "Brief.");
}

#[test]
fn test_ingroup_in_defgroup_nests() {
    let mut f = Fixture::new();
    f.command(1, "\\defgroup child Child\nBrief.\n\\ingroup parent");
    f.command(2, "\\endgroup");
    assert_eq!(f.groups["child"].parent_id, "parent");
    assert_eq!(f.groups["child"].brief, "Brief.");
    assert_eq!(f.groups["parent"].subgroups, vec!["child".to_string()]);
}

#[test]
fn test_missing_arguments_are_errors() {
    let mut f = Fixture::new();
    f.command(1, "\\defgroup only_id");
    f.command(2, "\\addtogroup");
    f.command(3, "\\defgroup bad/id Title");
    assert!(f.groups.is_empty());
    assert_eq!(f.diagnostics.with_code(codes::MISSING_ARGUMENT).len(), 2);
    assert_eq!(f.diagnostics.with_code(codes::INVALID_ID).len(), 1);
    assert_eq!(f.state.current(), "");
}

#[test]
fn test_unbalanced_endgroup_warns() {
    let mut f = Fixture::new();
    f.command(1, "\\endgroup");
    f.command(2, "\\endname");
    assert_eq!(f.diagnostics.with_code(codes::UNBALANCED_GROUP).len(), 2);
    assert!(!f.diagnostics.has_errors());
}

#[test]
fn test_unterminated_groups_closed_at_end() {
    let mut f = Fixture::new();
    f.command(1, "\\defgroup g1 One");
    f.command(2, "\\defgroup g2 Two");
    f.command(3, "\\name Accessors");
    f.state.finish(&mut f.diagnostics);
    assert_eq!(f.diagnostics.with_code(codes::UNTERMINATED_GROUP).len(), 3);
    assert_eq!(f.state.current(), "");
}

#[test]
fn test_cycle_rejected() {
    let mut f = Fixture::new();
    f.command(1, "\\defgroup a A");
    f.command(2, "\\defgroup b B");
    f.command(3, "\\addtogroup a");
    assert_eq!(f.diagnostics.with_code(codes::GROUP_CYCLE).len(), 1);
    assert_eq!(f.groups["a"].parent_id, "");
    assert_eq!(f.groups["b"].subgroups, Vec::<String>::new());
}

#[test]
fn test_member_groups() {
    let mut f = Fixture::new();
    f.command(4, "\\name Accessors");
    f.command(10, "\\endname");
    assert_eq!(f.state.member_group_at_line(5), "Accessors");
    assert_eq!(f.state.member_group_at_line(11), "");
}

#[test]
fn test_other_commands_not_handled() {
    let mut f = Fixture::new();
    let command = opening_command("\\class Foo").expect("a block command");
    assert!(!f.state.apply(&command, 1, &mut f.groups, &mut f.diagnostics));
}
