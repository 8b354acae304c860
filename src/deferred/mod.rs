//! Deferred Command Processor: documentation detached from declarations.
//!
//! Comment blocks that open with `\macro`, `\page`, `\mainpage`, `\file`
//! or an out-of-line command (`\class`, `\function`, ...) are queued while
//! files are processed and handled once every file has been walked, so the
//! declarations they name exist regardless of file order.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::base::constants::{MAIN_PAGE_ID, is_out_of_line_command};
use crate::base::{is_valid_id, strip_quotes};
use crate::comment::commands::take_ingroup;
use crate::comment::{add_doc, separate_brief, split_first_word};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::identity::{Disambiguator, Merge, header_id, member_id};
use crate::model::{DocumentModel, Entity, EntityKind, Header, MacroData, MemberKind, Page};
use crate::pipeline::BuildContext;
use crate::resolve::Lookup;

/// Commands that are queued rather than handled in place.
pub fn is_deferred_command(name: &str) -> bool {
    is_out_of_line_command(name) || matches!(name, "macro" | "def" | "file" | "page" | "mainpage")
}

/// A queued documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredCommand {
    /// Command name without prefix.
    pub command: String,
    /// Arguments on the command's line.
    pub args: String,
    /// The rest of the block.
    pub body: String,
    /// Canonical name of the file the block came from.
    pub file: Arc<str>,
    /// Header record of that file.
    pub header_id: String,
    pub line: u32,
    /// The group open where the block appeared.
    pub active_group: String,
}

/// Process and drain the queue, in the order commands were seen.
pub fn process(ctx: &mut BuildContext) {
    let queue = std::mem::take(&mut ctx.deferred);
    for command in &queue {
        tracing::trace!(command = %command.command, args = %command.args, "deferred command");
        match command.command.as_str() {
            "macro" | "def" => document_macro(&mut ctx.model, &mut ctx.diagnostics, command),
            "file" => {
                let name = strip_quotes(command.args.trim());
                let id = if name.is_empty() {
                    command.header_id.clone()
                } else {
                    header_id(name)
                };
                document_header(&mut ctx.model, &id, name, &command.body);
            }
            "page" => document_page(&mut ctx.model, &mut ctx.diagnostics, command),
            "mainpage" => {
                let title = strip_quotes(command.args.trim());
                append_page(&mut ctx.model, MAIN_PAGE_ID, title, &command.body);
            }
            _ => document_declaration(&mut ctx.model, &mut ctx.diagnostics, command),
        }
    }
}

fn error(diagnostics: &mut DiagnosticCollector, command: &DeferredCommand, code: &'static str, message: String) {
    diagnostics.add(
        Diagnostic::error(command.file.clone(), message)
            .at_line(command.line)
            .with_code(code),
    );
}

fn warning(diagnostics: &mut DiagnosticCollector, command: &DeferredCommand, code: &'static str, message: String) {
    diagnostics.add(
        Diagnostic::warning(command.file.clone(), message)
            .at_line(command.line)
            .with_code(code),
    );
}

/// Add documentation to a header record, creating it if needed.
pub fn document_header(model: &mut DocumentModel, id: &str, name: &str, body: &str) {
    let header = model
        .headers
        .entry(id.to_string())
        .or_insert_with(|| Header::new(id, name));
    let (brief, doc) = separate_brief(body);
    add_doc(&mut header.brief, &mut header.doc, &brief, &doc);
}

fn document_page(model: &mut DocumentModel, diagnostics: &mut DiagnosticCollector, command: &DeferredCommand) {
    let (id, title) = split_first_word(&command.args);
    let title = strip_quotes(title.trim());
    if id.is_empty() || title.is_empty() {
        error(diagnostics, command, codes::MISSING_ARGUMENT, "\\page needs an ID and a title".into());
        return;
    }
    if !is_valid_id(id) {
        error(diagnostics, command, codes::INVALID_ID, format!("Invalid page ID `{id}`"));
        return;
    }
    append_page(model, id, title, &command.body);
}

fn append_page(model: &mut DocumentModel, id: &str, title: &str, body: &str) {
    let page = model
        .pages
        .entry(id.to_string())
        .or_insert_with(|| Page::new(id));
    if page.title.is_empty() {
        page.title = title.to_string();
    }
    let body = body.trim();
    if body.is_empty() {
        return;
    }
    if page.doc.is_empty() {
        page.doc = body.to_string();
    } else {
        page.doc.push_str("\n\n");
        page.doc.push_str(body);
    }
}

/// Split `NAME(a, b)` into the macro name and its parameter list.
fn macro_signature(args: &str) -> (&str, Option<Vec<String>>) {
    let args = args.trim();
    let Some(open) = args.find('(') else {
        return (split_first_word(args).0, None);
    };
    let name = args[..open].trim();
    let close = args.rfind(')').filter(|&close| close > open).unwrap_or(args.len());
    let parameters = args[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();
    (name, Some(parameters))
}

fn document_macro(model: &mut DocumentModel, diagnostics: &mut DiagnosticCollector, command: &DeferredCommand) {
    let (name, parameters) = macro_signature(&command.args);
    if name.is_empty() {
        error(diagnostics, command, codes::MISSING_ARGUMENT, format!("\\{} without a name", command.command));
        return;
    }
    let (ingroup, body) = take_ingroup(&command.body);
    let (brief, doc) = separate_brief(&body);

    let kind = EntityKind::Macro(MacroData { parameters });
    let id = member_id(MemberKind::Macro, name, "", &Disambiguator::of(&kind));
    let mut entity = Entity::new(id.clone(), name, kind);
    entity.header_id = command.header_id.clone();
    entity.brief = brief;
    entity.doc = doc;
    entity.group_id = ingroup.unwrap_or_else(|| command.active_group.clone());

    let Some(existing) = model.entities.get_mut(&id) else {
        model.entities.insert(entity);
        return;
    };
    let (EntityKind::Macro(old), EntityKind::Macro(new)) = (&existing.kind, &entity.kind) else {
        error(
            diagnostics,
            command,
            codes::ID_COLLISION,
            format!("Macro `{name}` has the same id as a declared {}", existing.member_kind()),
        );
        return;
    };
    if old.parameters.is_some() && new.parameters.is_some() && old.parameters != new.parameters {
        warning(
            diagnostics,
            command,
            codes::MACRO_PARAMETERS,
            format!("Macro `{name}` documented with different parameter lists"),
        );
    }
    existing.merge(entity);
}

/// Name of the declaration an out-of-line command refers to: for function
/// signatures the return type is dropped, `int ns::f(int)` → `ns::f(int)`.
fn declaration_name(args: &str) -> &str {
    let args = args.trim().trim_end_matches(';').trim_end();
    let head_end = match args.find("operator") {
        Some(index) => index,
        None => args.find('(').unwrap_or(args.len()),
    };
    let start = args[..head_end]
        .rfind(|c: char| c.is_whitespace() || c == '*' || c == '&')
        .map_or(0, |index| index + 1);
    &args[start..]
}

/// Whether a command's kind agrees with the entity it found.
fn kind_matches(command: MemberKind, found: MemberKind) -> bool {
    command == found || (command.is_class_like() && found.is_class_like())
}

fn document_declaration(model: &mut DocumentModel, diagnostics: &mut DiagnosticCollector, command: &DeferredCommand) {
    let name = declaration_name(&command.args);
    if name.is_empty() {
        error(diagnostics, command, codes::MISSING_ARGUMENT, format!("\\{} without a name", command.command));
        return;
    }
    let Some(id) = Lookup::new(model).find_entity(name, "") else {
        error(
            diagnostics,
            command,
            codes::UNRESOLVED_DECLARATION,
            format!("\\{} {name}: no such declaration, documentation ignored", command.command),
        );
        return;
    };
    let Some(entity) = model.entities.get_mut(&id) else {
        return;
    };
    if let Some(expected) = MemberKind::from_command(&command.command) {
        if !kind_matches(expected, entity.member_kind()) {
            warning(
                diagnostics,
                command,
                codes::KIND_MISMATCH,
                format!("\\{} {name} refers to a {}", command.command, entity.member_kind()),
            );
        }
    }

    let (ingroup, body) = take_ingroup(&command.body);
    let (brief, doc) = separate_brief(&body);
    add_doc(&mut entity.brief, &mut entity.doc, &brief, &doc);
    if let Some(group) = ingroup {
        if entity.group_id.is_empty() {
            entity.group_id = group;
        } else if entity.group_id != group {
            warning(
                diagnostics,
                command,
                codes::GROUP_CONFLICT,
                format!("{name} is already in group `{}`, not adding it to `{group}`", entity.group_id),
            );
        }
    }
}
