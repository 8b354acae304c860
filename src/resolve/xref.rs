//! Rewriting of documentation text.
//!
//! Every brief and doc string is tokenized once. `\ref`, `\see`,
//! `\subpage`, `\section` and `\anchor` are replaced by Markdown; `\relates`
//! and stray `\ingroup` commands are removed. Sections and anchors are
//! collected before any text is rewritten so references to them resolve
//! regardless of document order.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::lookup::Lookup;
use crate::comment::commands::{CommandKind, DocCommand, DocPart, parse};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, codes};
use crate::model::{DocumentModel, EntityKind, Section};

/// A record whose text is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Owner {
    Entity(String),
    Header(String),
    Group(String),
    Page(String),
}

impl Owner {
    fn id(&self) -> &str {
        match self {
            Owner::Entity(id) | Owner::Header(id) | Owner::Group(id) | Owner::Page(id) => id,
        }
    }
}

fn owners(model: &DocumentModel) -> Vec<Owner> {
    let mut owners: Vec<Owner> = model.entities.ids().into_iter().map(Owner::Entity).collect();
    owners.extend(model.headers.keys().cloned().map(Owner::Header));
    owners.extend(model.groups.keys().cloned().map(Owner::Group));
    owners.extend(model.pages.keys().cloned().map(Owner::Page));
    owners
}

fn texts(model: &DocumentModel, owner: &Owner) -> Option<(String, String)> {
    match owner {
        Owner::Entity(id) => model.entities.get(id).map(|e| (e.brief.clone(), e.doc.clone())),
        Owner::Header(id) => model.headers.get(id).map(|h| (h.brief.clone(), h.doc.clone())),
        Owner::Group(id) => model.groups.get(id).map(|g| (g.brief.clone(), g.doc.clone())),
        Owner::Page(id) => model.pages.get(id).map(|p| (String::new(), p.doc.clone())),
    }
}

/// Source file diagnostics about `owner` are reported against.
fn file_of(model: &DocumentModel, owner: &Owner) -> Arc<str> {
    let header = match owner {
        Owner::Entity(id) => model.entities.get(id).and_then(|e| model.headers.get(&e.header_id)),
        Owner::Header(id) => model.headers.get(id),
        Owner::Group(_) | Owner::Page(_) => None,
    };
    header.map(|h| Arc::from(h.name.as_str())).unwrap_or_else(|| Arc::from(""))
}

// ============================================================================
// SECTIONS AND ANCHORS
// ============================================================================

/// Record every section and anchor on its owner; returns anchor id → owner id.
pub fn collect_anchors(model: &mut DocumentModel) -> FxHashMap<String, String> {
    let mut anchors = FxHashMap::default();
    for owner in owners(model) {
        let Some((brief, doc)) = texts(model, &owner) else {
            continue;
        };
        let mut sections = Vec::new();
        let mut names = Vec::new();
        for part in parse(&brief).into_iter().chain(parse(&doc)) {
            match part {
                DocPart::Command(DocCommand {
                    kind: CommandKind::Section { level, id, title },
                    ..
                }) => sections.push(Section { id, title, level }),
                DocPart::Command(DocCommand {
                    kind: CommandKind::Anchor(id),
                    ..
                }) => names.push(id),
                _ => {}
            }
        }
        if sections.is_empty() && names.is_empty() {
            continue;
        }
        for id in sections.iter().map(|s| &s.id).chain(&names) {
            anchors
                .entry(id.clone())
                .or_insert_with(|| owner.id().to_string());
        }
        let (record_sections, record_anchors) = match &owner {
            Owner::Entity(id) => match model.entities.get_mut(id) {
                Some(e) => (&mut e.sections, &mut e.anchors),
                None => continue,
            },
            Owner::Header(id) => match model.headers.get_mut(id) {
                Some(h) => (&mut h.sections, &mut h.anchors),
                None => continue,
            },
            Owner::Group(id) => match model.groups.get_mut(id) {
                Some(g) => (&mut g.sections, &mut g.anchors),
                None => continue,
            },
            Owner::Page(id) => match model.pages.get_mut(id) {
                Some(p) => (&mut p.sections, &mut p.anchors),
                None => continue,
            },
        };
        *record_sections = sections;
        *record_anchors = names;
    }
    anchors
}

// ============================================================================
// REWRITING
// ============================================================================

/// Outcome of rewriting one record.
#[derive(Debug, Default)]
struct Rewrite {
    brief: String,
    doc: String,
    relates: Option<String>,
    subpages: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

/// Rewrite the documentation of every record in the model.
pub fn rewrite_all(model: &mut DocumentModel, anchors: &FxHashMap<String, String>, diagnostics: &mut DiagnosticCollector) {
    for owner in owners(model) {
        let Some((brief, doc)) = texts(model, &owner) else {
            continue;
        };
        let rewrite = Rewriter::new(model, anchors, &owner).run(&brief, &doc);
        apply(model, &owner, rewrite, diagnostics);
    }
}

fn apply(model: &mut DocumentModel, owner: &Owner, rewrite: Rewrite, diagnostics: &mut DiagnosticCollector) {
    for diagnostic in rewrite.diagnostics {
        diagnostics.add(diagnostic);
    }
    match owner {
        Owner::Entity(id) => {
            if let Some(entity) = model.entities.get_mut(id) {
                entity.brief = rewrite.brief;
                entity.doc = rewrite.doc;
            }
            if let Some(class_id) = rewrite.relates {
                if let Some(data) = model.entities.get_mut(&class_id).and_then(|c| c.kind.class_data_mut()) {
                    if !data.related.contains(id) {
                        data.related.push(id.clone());
                    }
                }
                if let Some(entity) = model.entities.get_mut(id) {
                    entity.relates = class_id;
                }
            }
        }
        Owner::Header(id) => {
            if let Some(header) = model.headers.get_mut(id) {
                header.brief = rewrite.brief;
                header.doc = rewrite.doc;
            }
        }
        Owner::Group(id) => {
            if let Some(group) = model.groups.get_mut(id) {
                group.brief = rewrite.brief;
                group.doc = rewrite.doc;
            }
        }
        Owner::Page(id) => {
            for subpage in &rewrite.subpages {
                if let Some(child) = model.pages.get_mut(subpage) {
                    child.parent_id = id.clone();
                }
            }
            if let Some(page) = model.pages.get_mut(id) {
                for subpage in &rewrite.subpages {
                    page.add_subpage(subpage);
                }
                page.doc = rewrite.doc;
            }
        }
    }
}

/// Whether `\relates` is meaningful in the documentation of `id`: free
/// functions, variables, macros, aliases and enums at namespace scope.
fn may_relate(model: &DocumentModel, id: &str) -> bool {
    let Some(entity) = model.entities.get(id) else {
        return false;
    };
    let kind_ok = match &entity.kind {
        EntityKind::Function(data) => !data.is_method(),
        EntityKind::Variable(data) => !data.is_field,
        EntityKind::Macro(_) | EntityKind::Alias(_) | EntityKind::Enum(_) => true,
        _ => false,
    };
    let scope_ok = entity.is_root()
        || model
            .entities
            .get(&entity.parent_id)
            .is_some_and(|p| matches!(p.kind, EntityKind::Namespace));
    kind_ok && scope_ok
}

struct Rewriter<'a> {
    model: &'a DocumentModel,
    lookup: Lookup<'a>,
    owner: &'a Owner,
    /// Lookup context: the entity itself, or global scope.
    context: &'a str,
    file: Arc<str>,
    out: Rewrite,
}

impl<'a> Rewriter<'a> {
    fn new(model: &'a DocumentModel, anchors: &'a FxHashMap<String, String>, owner: &'a Owner) -> Self {
        let context = match owner {
            Owner::Entity(id) => id.as_str(),
            _ => "",
        };
        Self {
            model,
            lookup: Lookup::with_anchors(model, anchors),
            owner,
            context,
            file: file_of(model, owner),
            out: Rewrite::default(),
        }
    }

    fn run(mut self, brief: &str, doc: &str) -> Rewrite {
        self.out.brief = self.rewrite(brief).trim().to_string();
        self.out.doc = self.rewrite(doc).trim().to_string();
        self.out
    }

    fn error(&mut self, code: &'static str, message: String) {
        self.out
            .diagnostics
            .push(Diagnostic::error(self.file.clone(), message).with_code(code));
    }

    fn rewrite(&mut self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        for part in parse(text) {
            match part {
                DocPart::Text(text) => out.push_str(&text),
                DocPart::Command(command) => self.command(command, &mut out),
            }
        }
        out
    }

    fn link(&mut self, target: &str, text: Option<&str>) -> String {
        let shown = text.unwrap_or(target);
        match self.lookup.find(target, self.context) {
            Some(id) => format!("[{shown}](#{id})"),
            None => {
                self.error(
                    codes::UNRESOLVED_REFERENCE,
                    format!("Unresolved reference `{target}` in documentation of `{}`", self.owner.id()),
                );
                shown.to_string()
            }
        }
    }

    fn command(&mut self, command: DocCommand, out: &mut String) {
        match command.kind {
            CommandKind::Ref { target, text } => {
                let link = self.link(&target, text.as_deref());
                out.push_str(&link);
            }
            CommandKind::SeeAlso(targets) => {
                let links: Vec<String> = targets.iter().map(|t| self.link(t, None)).collect();
                out.push_str("!!! see \"See also\"\n    ");
                out.push_str(&links.join(", "));
            }
            CommandKind::Relates(target) => self.relates(&target),
            CommandKind::Subpage { target, text } => {
                let rendered = self.subpage(&target, text.as_deref());
                out.push_str(&rendered);
            }
            CommandKind::Ingroup(_) => {
                self.error(
                    codes::MISPLACED_COMMAND,
                    format!("\\ingroup has no effect in documentation of `{}`", self.owner.id()),
                );
            }
            CommandKind::Section { level, id, title } => {
                out.push_str(&format!("{} {title} {{#{id}}}", "#".repeat(usize::from(level) + 1)));
            }
            CommandKind::Anchor(id) => out.push_str(&format!("<a id=\"{id}\"></a>")),
            CommandKind::Malformed(name) => {
                self.error(codes::MISSING_ARGUMENT, format!("\\{name} is missing its argument"));
                out.push_str(&command.raw);
            }
        }
    }

    fn relates(&mut self, target: &str) {
        let Owner::Entity(id) = self.owner else {
            self.error(
                codes::MISPLACED_COMMAND,
                format!("\\relates {target} outside of a declaration's documentation"),
            );
            return;
        };
        if !may_relate(self.model, id) {
            self.error(
                codes::MISPLACED_COMMAND,
                format!("\\relates {target} in documentation of `{id}`, which cannot relate to a class"),
            );
            return;
        }
        if self.out.relates.is_some() {
            return;
        }
        let class = self
            .lookup
            .find_entity(target, self.context)
            .filter(|found| self.model.entities.get(found).is_some_and(|e| e.is_class_like()));
        match class {
            Some(class) => self.out.relates = Some(class),
            None => self.error(
                codes::UNRESOLVED_RELATES,
                format!("\\relates {target}: no such class, struct or union"),
            ),
        }
    }

    fn subpage(&mut self, target: &str, text: Option<&str>) -> String {
        let Owner::Page(current) = self.owner else {
            self.error(
                codes::MISPLACED_COMMAND,
                format!("\\subpage {target} outside of a page"),
            );
            return text.unwrap_or(target).to_string();
        };
        let Some(page) = self.model.pages.get(target) else {
            self.error(codes::UNRESOLVED_SUBPAGE, format!("\\subpage {target}: no such page"));
            return text.unwrap_or(target).to_string();
        };
        let shown = match text {
            Some(text) => text,
            None if !page.title.is_empty() => page.title.as_str(),
            None => target,
        };
        let claimed_elsewhere = !page.parent_id.is_empty() && page.parent_id != *current;
        if target == current || self.is_ancestor(target, current) || claimed_elsewhere {
            self.error(
                codes::SUBPAGE_CONFLICT,
                format!("\\subpage {target} in page `{current}` would re-parent the page or create a cycle"),
            );
            return shown.to_string();
        }
        if !self.out.subpages.iter().any(|s| s == target) {
            self.out.subpages.push(target.to_string());
        }
        format!("[{shown}](#{target})")
    }

    /// True if `ancestor` is above `page` in the page tree.
    fn is_ancestor(&self, ancestor: &str, page: &str) -> bool {
        let mut current = self.model.pages.get(page).map(|p| p.parent_id.as_str());
        for _ in 0..self.model.pages.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) if !id.is_empty() => {
                    current = self.model.pages.get(id).map(|p| p.parent_id.as_str());
                }
                _ => return false,
            }
        }
        false
    }
}
