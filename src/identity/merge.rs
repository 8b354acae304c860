//! Merging a repeated sighting of a symbol into its entity.
//!
//! Every attribute is filled from the new sighting only if it is still
//! empty, flags are OR-ed, and child lists are unioned. Documentation is
//! replaced wholesale when the new sighting carries a brief.

use crate::model::{
    AliasData, Argument, ClassData, Entity, EntityKind, EnumData, EnumValueData, FunctionData,
    MacroData, VariableData,
};

/// Fill-if-empty for a single attribute.
trait Fill {
    fn fill(&mut self, other: Self);
}

impl Fill for String {
    fn fill(&mut self, other: Self) {
        if self.is_empty() {
            *self = other;
        }
    }
}

impl<T> Fill for Vec<T> {
    fn fill(&mut self, other: Self) {
        if self.is_empty() {
            *self = other;
        }
    }
}

impl<T> Fill for Option<T> {
    fn fill(&mut self, other: Self) {
        if self.is_none() {
            *self = other;
        }
    }
}

impl Fill for bool {
    fn fill(&mut self, other: Self) {
        *self |= other;
    }
}

/// Merge another sighting of the same symbol into `self`.
pub trait Merge {
    fn merge(&mut self, other: Self);
}

impl Merge for Entity {
    fn merge(&mut self, other: Self) {
        // `id` and `parent_id` are fixed at creation.
        let other_kind = other.member_kind();
        self.name.fill(other.name);
        self.header_id.fill(other.header_id);
        if !other.brief.is_empty() {
            self.brief = other.brief;
            self.doc = other.doc;
        }
        self.group_id.fill(other.group_id);
        self.member_group.fill(other.member_group);
        self.deprecated.fill(other.deprecated);
        self.access.fill(other.access);
        self.relates.fill(other.relates);
        self.sections.fill(other.sections);
        self.anchors.fill(other.anchors);
        for child in other.children {
            if !self.children.contains(&child) {
                self.children.push(child);
            }
        }

        let was_ghost = self.ghost;
        self.ghost = false;
        if self.member_kind() != other_kind {
            // A placeholder may have guessed the kind wrong.
            if was_ghost {
                self.kind = other.kind;
            }
            return;
        }
        self.kind.merge(other.kind);
    }
}

impl Merge for EntityKind {
    fn merge(&mut self, other: Self) {
        match (self, other) {
            (EntityKind::Class(a), EntityKind::Class(b))
            | (EntityKind::Struct(a), EntityKind::Struct(b))
            | (EntityKind::Union(a), EntityKind::Union(b)) => a.merge(b),
            (EntityKind::Enum(a), EntityKind::Enum(b)) => a.merge(b),
            (EntityKind::EnumValue(a), EntityKind::EnumValue(b)) => a.merge(b),
            (EntityKind::Function(a), EntityKind::Function(b)) => a.merge(b),
            (EntityKind::Variable(a), EntityKind::Variable(b)) => a.merge(b),
            (EntityKind::Alias(a), EntityKind::Alias(b)) => a.merge(b),
            (EntityKind::Macro(a), EntityKind::Macro(b)) => a.merge(b),
            _ => {}
        }
    }
}

impl Merge for ClassData {
    fn merge(&mut self, other: Self) {
        self.is_template.fill(other.is_template);
        self.template_parameters.fill(other.template_parameters);
        self.bases.fill(other.bases);
        self.derived.fill(other.derived);
        self.related.fill(other.related);
        self.is_abstract.fill(other.is_abstract);
        self.is_final.fill(other.is_final);
    }
}

impl Merge for EnumData {
    fn merge(&mut self, other: Self) {
        self.underlying_type.fill(other.underlying_type);
        self.is_scoped.fill(other.is_scoped);
    }
}

impl Merge for EnumValueData {
    fn merge(&mut self, other: Self) {
        self.value.fill(other.value);
    }
}

impl Merge for FunctionData {
    fn merge(&mut self, other: Self) {
        self.is_template.fill(other.is_template);
        self.template_parameters.fill(other.template_parameters);
        self.return_type.fill(other.return_type);
        if self.arguments.len() == other.arguments.len() {
            // Declarations often omit names or defaults the definition has.
            for (mine, theirs) in self.arguments.iter_mut().zip(other.arguments) {
                mine.merge(theirs);
            }
        } else {
            self.arguments.fill(other.arguments);
        }
        self.is_static.fill(other.is_static);
        self.is_virtual.fill(other.is_virtual);
        self.is_pure.fill(other.is_pure);
        self.is_const.fill(other.is_const);
        self.is_final.fill(other.is_final);
        self.is_override.fill(other.is_override);
        self.is_explicit.fill(other.is_explicit);
        self.is_defaulted.fill(other.is_defaulted);
        self.is_deleted.fill(other.is_deleted);
        self.is_constexpr.fill(other.is_constexpr);
        self.is_noexcept.fill(other.is_noexcept);
        self.is_inline.fill(other.is_inline);
        self.ref_qualifier.fill(other.ref_qualifier);
    }
}

impl Merge for Argument {
    fn merge(&mut self, other: Self) {
        self.name.fill(other.name);
        self.default.fill(other.default);
        if self.type_ref.is_empty() {
            self.type_ref = other.type_ref;
        }
    }
}

impl Merge for VariableData {
    fn merge(&mut self, other: Self) {
        self.type_ref.fill(other.type_ref);
        self.is_field.fill(other.is_field);
        self.is_static.fill(other.is_static);
        self.is_const.fill(other.is_const);
        self.is_constexpr.fill(other.is_constexpr);
        self.is_mutable.fill(other.is_mutable);
        self.is_extern.fill(other.is_extern);
        self.is_inline.fill(other.is_inline);
        self.bit_field_width.fill(other.bit_field_width);
    }
}

impl Merge for AliasData {
    fn merge(&mut self, other: Self) {
        self.aliased.fill(other.aliased);
        self.is_typedef.fill(other.is_typedef);
        self.is_template.fill(other.is_template);
        self.template_parameters.fill(other.template_parameters);
    }
}

impl Merge for MacroData {
    fn merge(&mut self, other: Self) {
        self.parameters.fill(other.parameters);
    }
}
