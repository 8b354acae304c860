//! Declaration Walker: builds entities from the front-end's declaration tree.
//!
//! Depth-first, parents before children. Only declarations located in the
//! file being processed are handled; nodes without a location and
//! unexposed/linkage-spec nodes are transparent. Each remaining node is
//! classified, its attributes extracted, its documentation comment attached,
//! and the result handed to the identity resolver.

mod attributes;
mod classify;
mod declarator;


use crate::comment::commands::take_ingroup;
use crate::comment::separate_brief;
use crate::diagnostics::{Diagnostic, codes};
use crate::front_end::{Decl, DeclKind};
use crate::identity::{Disambiguator, Resolution, is_anonymous, member_id};
use crate::model::{Entity, MemberKind};
use crate::pipeline::{BuildContext, FileState};

pub use classify::{Classification, classify, classify_scope};

/// Walk the top-level declarations of a translation unit.
pub fn walk(ctx: &mut BuildContext, file: &FileState, decls: &[Decl]) {
    let mut walker = Walker { ctx, file };
    for decl in decls {
        walker.visit(decl, "");
    }
}

struct Walker<'a> {
    ctx: &'a mut BuildContext,
    file: &'a FileState,
}

impl Walker<'_> {
    fn visit_children(&mut self, decl: &Decl, parent_id: &str) {
        for child in &decl.children {
            self.visit(child, parent_id);
        }
    }

    fn visit(&mut self, decl: &Decl, parent_id: &str) {
        let Some(path) = decl.file.as_deref() else {
            self.visit_children(decl, parent_id);
            return;
        };
        if path != self.file.path {
            return;
        }
        if matches!(decl.kind, DeclKind::UnexposedDecl | DeclKind::LinkageSpec) {
            self.visit_children(decl, parent_id);
            return;
        }

        let parent_id = match &decl.semantic_parent {
            Some(parent) => self
                .ctx
                .identity
                .ensure_scope(&mut self.ctx.model.entities, parent),
            None => parent_id.to_string(),
        };
        let parent = self
            .ctx
            .model
            .entities
            .get(&parent_id)
            .map(|p| (p.member_kind(), p.name.clone()));
        let parent_kind = parent.as_ref().map(|(kind, _)| *kind);

        let Some(classification) = classify(
            decl.kind,
            &decl.name,
            &decl.tokens,
            parent.as_ref().map(|(kind, name)| (*kind, name.as_str())),
        ) else {
            return;
        };
        tracing::trace!(kind = ?decl.kind, name = %decl.name, parent = %parent_id, "declaration");

        if classification.kind.is_class_like() && !decl.info.is_definition {
            tracing::debug!(name = %decl.name, "skipping forward declaration");
            return;
        }
        if classification.kind.is_scope() && is_anonymous(&decl.name) {
            // Members of unnamed scopes belong to the enclosing scope.
            self.ctx.identity.register(decl.usr.clone(), parent_id.clone());
            self.visit_children(decl, &parent_id);
            return;
        }

        let entity = self.build_entity(decl, &classification, &parent_id, parent_kind);
        tracing::debug!(id = %entity.id, kind = %classification.kind, "member");
        let name = entity.name.clone();
        let resolution = self.ctx.identity.resolve(&mut self.ctx.model.entities, &decl.usr, entity);
        match resolution {
            Resolution::Created(id) | Resolution::Merged(id) => {
                if classification.kind.is_scope() {
                    self.visit_children(decl, &id);
                }
            }
            Resolution::Collision(id) => {
                self.ctx.diagnostics.add(
                    Diagnostic::error(
                        self.file.name.clone(),
                        format!("Id `{id}` for `{name}` is already used by a different declaration"),
                    )
                    .at_line(decl.extent.start.line)
                    .with_code(codes::ID_COLLISION),
                );
            }
        }
    }

    fn build_entity(
        &self,
        decl: &Decl,
        classification: &Classification,
        parent_id: &str,
        parent_kind: Option<MemberKind>,
    ) -> Entity {
        let kind = attributes::extract(decl, classification);
        let id = member_id(classification.kind, &decl.name, parent_id, &Disambiguator::of(&kind));
        let mut entity = Entity::new(id, decl.name.clone(), kind).with_parent(parent_id);
        entity.header_id = self.file.header_id.clone();
        entity.deprecated = decl.info.deprecated;
        if parent_kind.is_some_and(MemberKind::is_class_like) {
            entity.access = decl.info.access;
        }

        let line = decl.extent.start.line;
        let mut ingroup = None;
        if let Some(text) = self.file.comments.documentation(&decl.extent) {
            let (group, text) = take_ingroup(text);
            let (brief, doc) = separate_brief(&text);
            entity.brief = brief;
            entity.doc = doc;
            ingroup = group;
        }
        entity.group_id = ingroup.unwrap_or_else(|| self.file.groups.group_at_line(line).to_string());
        entity.member_group = self.file.groups.member_group_at_line(line).to_string();
        entity
    }
}
