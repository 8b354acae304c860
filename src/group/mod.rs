//! Grouping Engine: `\defgroup`/`\addtogroup`/`\endgroup` and `\name`/`\endname`.
//!
//! Groups work differently than in Doxygen: `\defgroup` and `\addtogroup`
//! open a scope, and every declaration up to the matching `\endgroup` falls
//! in that group. Opening a group inside another nests it. The state is
//! per file; the group records themselves live in the document model.
//!
//! Each scope change is recorded as a `(line, id)` transition, so the group
//! of a declaration is found by its line after all commands of the file
//! have been seen.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::{is_valid_id, strip_quotes};
use crate::comment::commands::take_ingroup;
use crate::comment::{OpeningCommand, add_doc, separate_brief, split_first_word};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::model::Group;

/// The id active just before `line`: the last transition on an earlier line.
pub fn group_at_line(transitions: &[(u32, String)], line: u32) -> &str {
    transitions
        .iter()
        .take_while(|(at, _)| *at < line)
        .last()
        .map(|(_, id)| id.as_str())
        .unwrap_or_default()
}

/// Grouping state of one file.
#[derive(Debug, Clone)]
pub struct GroupState {
    file: Arc<str>,
    /// Open groups; the bottom entry is the empty id.
    stack: Vec<String>,
    transitions: Vec<(u32, String)>,
    member_group: String,
    member_transitions: Vec<(u32, String)>,
}

impl GroupState {
    pub fn new(file: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            stack: vec![String::new()],
            transitions: Vec::new(),
            member_group: String::new(),
            member_transitions: Vec::new(),
        }
    }

    /// The innermost open group, or the empty id.
    pub fn current(&self) -> &str {
        self.stack.last().map(String::as_str).unwrap_or_default()
    }

    pub fn group_at_line(&self, line: u32) -> &str {
        group_at_line(&self.transitions, line)
    }

    pub fn member_group_at_line(&self, line: u32) -> &str {
        group_at_line(&self.member_transitions, line)
    }

    /// Apply a grouping command. Returns false for any other command.
    pub fn apply(
        &mut self,
        command: &OpeningCommand<'_>,
        line: u32,
        groups: &mut IndexMap<String, Group>,
        diagnostics: &mut DiagnosticCollector,
    ) -> bool {
        match command.name {
            "defgroup" => self.defgroup(command, line, groups, diagnostics),
            "addtogroup" => self.addtogroup(command, line, groups, diagnostics),
            "endgroup" => self.endgroup(line, diagnostics),
            "name" => {
                self.member_group = command.args.to_string();
                self.member_transitions.push((line, self.member_group.clone()));
            }
            "endname" => {
                if self.member_group.is_empty() {
                    diagnostics.add(
                        Diagnostic::warning(self.file.clone(), "\\endname cannot occur outside a \\name block")
                            .at_line(line)
                            .with_code(codes::UNBALANCED_GROUP),
                    );
                } else {
                    self.member_group.clear();
                    self.member_transitions.push((line, String::new()));
                }
            }
            _ => return false,
        }
        true
    }

    fn defgroup(
        &mut self,
        command: &OpeningCommand<'_>,
        line: u32,
        groups: &mut IndexMap<String, Group>,
        diagnostics: &mut DiagnosticCollector,
    ) {
        let (id, title) = split_first_word(command.args);
        let title = strip_quotes(title.trim());
        if id.is_empty() || title.is_empty() {
            self.error(diagnostics, line, codes::MISSING_ARGUMENT, "\\defgroup needs an ID and a name".into());
            return;
        }
        if !is_valid_id(id) {
            self.error(diagnostics, line, codes::INVALID_ID, format!("Invalid group ID `{id}`"));
            return;
        }

        let (ingroup, body) = take_ingroup(command.body);
        let (brief, doc) = separate_brief(&body);
        let group = groups.entry(id.to_string()).or_insert_with(|| Group::new(id));
        if group.name.is_empty() {
            group.name = title.to_string();
        }
        add_doc(&mut group.brief, &mut group.doc, &brief, &doc);

        let parent = match ingroup {
            Some(parent) if self.current().is_empty() => parent,
            _ => self.current().to_string(),
        };
        self.nest(id, &parent, line, groups, diagnostics);
        self.open(id, line);
    }

    fn addtogroup(
        &mut self,
        command: &OpeningCommand<'_>,
        line: u32,
        groups: &mut IndexMap<String, Group>,
        diagnostics: &mut DiagnosticCollector,
    ) {
        // The title and the rest of the block are ignored.
        let (id, _) = split_first_word(command.args);
        if id.is_empty() {
            self.error(diagnostics, line, codes::MISSING_ARGUMENT, "\\addtogroup needs an ID".into());
            return;
        }
        if !is_valid_id(id) {
            self.error(diagnostics, line, codes::INVALID_ID, format!("Invalid group ID `{id}`"));
            return;
        }
        groups.entry(id.to_string()).or_insert_with(|| Group::new(id));
        let parent = self.current().to_string();
        self.nest(id, &parent, line, groups, diagnostics);
        self.open(id, line);
    }

    fn endgroup(&mut self, line: u32, diagnostics: &mut DiagnosticCollector) {
        if self.stack.len() <= 1 {
            diagnostics.add(
                Diagnostic::warning(self.file.clone(), "\\endgroup cannot occur while not in a group")
                    .at_line(line)
                    .with_code(codes::UNBALANCED_GROUP),
            );
            return;
        }
        self.stack.pop();
        self.transitions.push((line, self.current().to_string()));
    }

    fn open(&mut self, id: &str, line: u32) {
        self.stack.push(id.to_string());
        self.transitions.push((line, id.to_string()));
    }

    /// Make `child` a subgroup of `parent`, refusing cycles and re-parenting.
    fn nest(
        &self,
        child: &str,
        parent: &str,
        line: u32,
        groups: &mut IndexMap<String, Group>,
        diagnostics: &mut DiagnosticCollector,
    ) {
        if parent.is_empty() {
            return;
        }
        if is_descendant(groups, parent, child) {
            self.error(
                diagnostics,
                line,
                codes::GROUP_CYCLE,
                format!("Nesting group `{child}` under `{parent}` would create a cycle"),
            );
            return;
        }
        let existing = groups.get(child).map(|g| g.parent_id.clone()).unwrap_or_default();
        if !existing.is_empty() && existing != parent {
            diagnostics.add(
                Diagnostic::warning(
                    self.file.clone(),
                    format!("Group `{child}` is already nested under `{existing}`, not under `{parent}`"),
                )
                .at_line(line)
                .with_code(codes::GROUP_CONFLICT),
            );
            return;
        }
        if let Some(group) = groups.get_mut(child) {
            group.parent_id = parent.to_string();
        }
        groups
            .entry(parent.to_string())
            .or_insert_with(|| Group::new(parent))
            .add_subgroup(child);
    }

    /// Close whatever is still open at the end of the file, with a warning each.
    pub fn finish(&mut self, diagnostics: &mut DiagnosticCollector) {
        while self.stack.len() > 1 {
            let id = self.stack.pop().unwrap_or_default();
            diagnostics.add(
                Diagnostic::warning(self.file.clone(), format!("Missing \\endgroup for group {id}"))
                    .with_code(codes::UNTERMINATED_GROUP),
            );
        }
        if !self.member_group.is_empty() {
            let name = std::mem::take(&mut self.member_group);
            diagnostics.add(
                Diagnostic::warning(self.file.clone(), format!("Missing \\endname for \\name {name}"))
                    .with_code(codes::UNTERMINATED_GROUP),
            );
        }
    }

    fn error(&self, diagnostics: &mut DiagnosticCollector, line: u32, code: &'static str, message: String) {
        diagnostics.add(
            Diagnostic::error(self.file.clone(), message)
                .at_line(line)
                .with_code(code),
        );
    }
}

/// True if `id` is `ancestor` or lies below it in the group hierarchy.
fn is_descendant(groups: &IndexMap<String, Group>, id: &str, ancestor: &str) -> bool {
    let mut current = id;
    // Bounded by the group count.
    for _ in 0..=groups.len() {
        if current == ancestor {
            return true;
        }
        match groups.get(current) {
            Some(group) if !group.parent_id.is_empty() => current = &group.parent_id,
            _ => return false,
        }
    }
    false
}
