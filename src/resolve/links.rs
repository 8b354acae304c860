//! Type and inheritance links.

use super::lookup::Lookup;
use crate::model::{DerivedClass, DocumentModel, EntityKind, MemberKind, TypeRef};

/// Kinds a type name can refer to.
fn is_type_kind(kind: MemberKind) -> bool {
    kind.is_class_like() || matches!(kind, MemberKind::Enum | MemberKind::Alias)
}

fn resolve_type(lookup: &Lookup<'_>, model: &DocumentModel, type_ref: &TypeRef, context: &str) -> Option<String> {
    if type_ref.typename.is_empty() {
        return None;
    }
    lookup
        .find_entity(&type_ref.typename, context)
        .filter(|id| model.entities.get(id).is_some_and(|e| is_type_kind(e.member_kind())))
}

/// Resolve base classes and record the derived classes on each base.
pub fn link_bases(model: &mut DocumentModel) {
    let mut resolved = Vec::new();
    {
        let lookup = Lookup::new(model);
        for entity in model.entities.iter() {
            let Some(data) = entity.kind.class_data() else {
                continue;
            };
            for (index, base) in data.bases.iter().enumerate() {
                let target = lookup
                    .find_entity(&base.type_ref.typename, &entity.parent_id)
                    .filter(|id| *id != entity.id)
                    .filter(|id| model.entities.get(id).is_some_and(|e| e.is_class_like()));
                if let Some(target) = target {
                    resolved.push((entity.id.clone(), index, target, base.access));
                }
            }
        }
    }

    for (derived, index, base_id, access) in resolved {
        if let Some(base) = model
            .entities
            .get_mut(&derived)
            .and_then(|e| e.kind.class_data_mut())
            .and_then(|data| data.bases.get_mut(index))
        {
            base.type_ref.id = Some(base_id.clone());
        }
        if let Some(data) = model.entities.get_mut(&base_id).and_then(|e| e.kind.class_data_mut()) {
            if !data.derived.iter().any(|d| d.id == derived) {
                data.derived.push(DerivedClass { id: derived, access });
            }
        }
    }
}

/// Set the target id of every type reference that names a documented type.
pub fn link_types(model: &mut DocumentModel) {
    let mut updates: Vec<(String, EntityKind)> = Vec::new();
    {
        let lookup = Lookup::new(model);
        for entity in model.entities.iter() {
            let mut kind = entity.kind.clone();
            let link = |type_ref: &mut TypeRef| {
                type_ref.id = resolve_type(&lookup, model, type_ref, &entity.id);
            };
            match &mut kind {
                EntityKind::Function(data) => {
                    if let Some(ret) = data.return_type.as_mut() {
                        link(ret);
                    }
                    for argument in &mut data.arguments {
                        link(&mut argument.type_ref);
                    }
                }
                EntityKind::Variable(data) => {
                    if let Some(type_ref) = data.type_ref.as_mut() {
                        link(type_ref);
                    }
                }
                EntityKind::Alias(data) => {
                    if let Some(type_ref) = data.aliased.as_mut() {
                        link(type_ref);
                    }
                }
                EntityKind::Enum(data) => {
                    if let Some(type_ref) = data.underlying_type.as_mut() {
                        link(type_ref);
                    }
                }
                _ => continue,
            }
            if kind != entity.kind {
                updates.push((entity.id.clone(), kind));
            }
        }
    }

    for (id, kind) in updates {
        if let Some(entity) = model.entities.get_mut(&id) {
            entity.kind = kind;
        }
    }
}
