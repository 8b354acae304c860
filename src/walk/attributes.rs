//! Kind-specific attributes of a declaration.

use super::classify::Classification;
use super::declarator::{class_is_final, enum_is_scoped, scan_function, scan_variable};
use crate::front_end::{Decl, DeclKind, StorageClass};
use crate::model::{
    Access, AliasData, Argument, BaseClass, ClassData, EntityKind, EnumData, EnumValueData,
    FunctionData, FunctionRole, MemberKind, Qualifier, TemplateParameter, TemplateParameterKind,
    TypeRef, VariableData,
};

/// Build the entity payload for a classified declaration.
pub fn extract(decl: &Decl, classification: &Classification) -> EntityKind {
    match classification.kind {
        MemberKind::Namespace => EntityKind::Namespace,
        MemberKind::Class => EntityKind::Class(class_data(decl, classification, Access::Private)),
        MemberKind::Struct => EntityKind::Struct(class_data(decl, classification, Access::Public)),
        MemberKind::Union => EntityKind::Union(class_data(decl, classification, Access::Public)),
        MemberKind::Enum => EntityKind::Enum(EnumData {
            underlying_type: decl.info.underlying_type.as_deref().map(TypeRef::parse),
            is_scoped: enum_is_scoped(&decl.tokens),
        }),
        MemberKind::EnumValue => EntityKind::EnumValue(EnumValueData {
            value: decl.info.enum_value,
        }),
        MemberKind::Function => EntityKind::Function(function_data(decl, classification)),
        MemberKind::Variable => EntityKind::Variable(variable_data(decl, classification)),
        MemberKind::Alias => EntityKind::Alias(AliasData {
            aliased: decl.info.underlying_type.as_deref().map(TypeRef::parse),
            is_typedef: classification.is_typedef,
            is_template: classification.is_template,
            template_parameters: template_parameters(decl),
        }),
        // Macros never come from the declaration tree.
        MemberKind::Macro => EntityKind::empty(MemberKind::Macro),
    }
}

fn class_data(decl: &Decl, classification: &Classification, default_access: Access) -> ClassData {
    let bases = decl
        .children
        .iter()
        .filter(|child| child.kind == DeclKind::BaseSpecifier)
        .map(|base| BaseClass {
            type_ref: TypeRef::parse(base.info.type_spelling.as_deref().unwrap_or(&base.name)),
            access: base.info.access.unwrap_or(default_access),
            is_virtual: base.info.is_virtual,
        })
        .collect();
    ClassData {
        is_template: classification.is_template,
        template_parameters: template_parameters(decl),
        bases,
        derived: Vec::new(),
        related: Vec::new(),
        is_abstract: decl.info.is_abstract,
        is_final: class_is_final(&decl.tokens, &decl.name),
    }
}

/// Template parameters are children of the templated declaration.
pub fn template_parameters(decl: &Decl) -> Vec<TemplateParameter> {
    decl.children
        .iter()
        .filter_map(|child| {
            let kind = match child.kind {
                DeclKind::TemplateTypeParameter => TemplateParameterKind::Type,
                DeclKind::TemplateNonTypeParameter => TemplateParameterKind::NonType,
                DeclKind::TemplateTemplateParameter => TemplateParameterKind::Template,
                _ => return None,
            };
            Some(TemplateParameter {
                name: child.name.clone(),
                kind,
                type_spelling: child.info.type_spelling.clone().unwrap_or_default(),
                default: child.info.default_value.clone().unwrap_or_default(),
            })
        })
        .collect()
}

fn arguments(decl: &Decl) -> Vec<Argument> {
    if !decl.info.arguments.is_empty() {
        return decl
            .info
            .arguments
            .iter()
            .map(|arg| Argument {
                name: arg.name.clone(),
                type_ref: TypeRef::parse(&arg.type_spelling),
                default: arg.default.clone().unwrap_or_default(),
            })
            .collect();
    }
    decl.children
        .iter()
        .filter(|child| child.kind == DeclKind::ParmDecl)
        .map(|parm| Argument {
            name: parm.name.clone(),
            type_ref: TypeRef::parse(parm.info.type_spelling.as_deref().unwrap_or_default()),
            default: parm.info.default_value.clone().unwrap_or_default(),
        })
        .collect()
}

fn function_data(decl: &Decl, classification: &Classification) -> FunctionData {
    let specifiers = scan_function(&decl.tokens, &decl.name);
    let return_type = match classification.role {
        FunctionRole::Constructor | FunctionRole::Destructor => None,
        _ => decl.info.result_type.as_deref().map(TypeRef::parse),
    };
    FunctionData {
        role: classification.role,
        is_template: classification.is_template,
        template_parameters: template_parameters(decl),
        return_type,
        arguments: arguments(decl),
        is_static: decl.info.is_static || decl.info.storage == StorageClass::Static || specifiers.is_static,
        is_virtual: decl.info.is_virtual || specifiers.is_virtual,
        is_pure: decl.info.is_pure || specifiers.is_pure,
        is_const: decl.info.is_const || specifiers.is_const,
        is_final: specifiers.is_final,
        is_override: specifiers.is_override,
        is_explicit: specifiers.is_explicit,
        is_defaulted: specifiers.is_defaulted,
        is_deleted: specifiers.is_deleted,
        is_constexpr: specifiers.is_constexpr,
        is_noexcept: specifiers.is_noexcept,
        is_inline: specifiers.is_inline,
        ref_qualifier: specifiers.ref_qualifier,
    }
}

fn variable_data(decl: &Decl, classification: &Classification) -> VariableData {
    let specifiers = scan_variable(&decl.tokens, &decl.name);
    let type_ref = decl.info.type_spelling.as_deref().map(TypeRef::parse);
    // Only a top-level const makes the variable itself const.
    let top_level_const = type_ref
        .as_ref()
        .is_some_and(|t| t.qualifiers.last() == Some(&Qualifier::Const));
    VariableData {
        is_field: classification.is_field,
        is_static: decl.info.is_static || decl.info.storage == StorageClass::Static || specifiers.is_static,
        is_const: top_level_const || specifiers.is_constexpr,
        is_constexpr: specifiers.is_constexpr,
        is_mutable: specifiers.is_mutable,
        is_extern: decl.info.storage == StorageClass::Extern || specifiers.is_extern,
        is_inline: specifiers.is_inline,
        bit_field_width: decl.info.bit_field_width,
        type_ref,
    }
}
