//! Mapping front-end declaration kinds to entity kinds.

use crate::front_end::{DeclKind, SymbolRef};
use crate::model::{FunctionRole, MemberKind};

/// How a declaration is represented in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: MemberKind,
    pub is_template: bool,
    pub role: FunctionRole,
    pub is_field: bool,
    pub is_typedef: bool,
}

impl Classification {
    fn of(kind: MemberKind) -> Self {
        Self {
            kind,
            is_template: false,
            role: FunctionRole::Function,
            is_field: false,
            is_typedef: false,
        }
    }

    fn template(mut self) -> Self {
        self.is_template = true;
        self
    }

    fn role(mut self, role: FunctionRole) -> Self {
        self.role = role;
        self
    }
}

/// Classify a declaration.
///
/// `parent` is the kind of the semantic parent, if any; it decides whether
/// a function template is a method. Returns `None` for kinds that do not
/// become entities.
pub fn classify(
    kind: DeclKind,
    name: &str,
    tokens: &[String],
    parent: Option<(MemberKind, &str)>,
) -> Option<Classification> {
    let in_class = parent.is_some_and(|(kind, _)| kind.is_class_like());
    let classification = match kind {
        DeclKind::Namespace => Classification::of(MemberKind::Namespace),
        DeclKind::ClassDecl => Classification::of(MemberKind::Class),
        DeclKind::StructDecl => Classification::of(MemberKind::Struct),
        DeclKind::UnionDecl => Classification::of(MemberKind::Union),
        DeclKind::ClassTemplate | DeclKind::ClassTemplatePartialSpecialization => {
            Classification::of(template_class_key(tokens)).template()
        }
        DeclKind::EnumDecl => Classification::of(MemberKind::Enum),
        DeclKind::EnumConstantDecl => Classification::of(MemberKind::EnumValue),
        DeclKind::FunctionDecl => Classification::of(MemberKind::Function),
        DeclKind::FunctionTemplate => {
            let role = match parent {
                Some((_, parent_name)) if in_class && name == parent_name => FunctionRole::Constructor,
                _ if in_class && name.starts_with('~') => FunctionRole::Destructor,
                _ if in_class => FunctionRole::Method,
                _ => FunctionRole::Function,
            };
            Classification::of(MemberKind::Function).template().role(role)
        }
        DeclKind::CxxMethod => Classification::of(MemberKind::Function).role(FunctionRole::Method),
        DeclKind::Constructor => {
            Classification::of(MemberKind::Function).role(FunctionRole::Constructor)
        }
        DeclKind::Destructor => {
            Classification::of(MemberKind::Function).role(FunctionRole::Destructor)
        }
        DeclKind::ConversionFunction => {
            Classification::of(MemberKind::Function).role(FunctionRole::Conversion)
        }
        DeclKind::FieldDecl => Classification {
            is_field: true,
            ..Classification::of(MemberKind::Variable)
        },
        DeclKind::VarDecl => Classification::of(MemberKind::Variable),
        DeclKind::TypedefDecl => Classification {
            is_typedef: true,
            ..Classification::of(MemberKind::Alias)
        },
        DeclKind::TypeAliasDecl => Classification::of(MemberKind::Alias),
        DeclKind::TypeAliasTemplateDecl => Classification::of(MemberKind::Alias).template(),
        DeclKind::TemplateTypeParameter
        | DeclKind::TemplateNonTypeParameter
        | DeclKind::TemplateTemplateParameter
        | DeclKind::BaseSpecifier
        | DeclKind::AccessSpecifier
        | DeclKind::ParmDecl
        | DeclKind::UnexposedDecl
        | DeclKind::LinkageSpec
        | DeclKind::Other => return None,
    };
    Some(classification)
}

/// Classify a referenced scope, for placeholder entities.
pub fn classify_scope(symbol: &SymbolRef) -> Option<Classification> {
    classify(symbol.kind, &symbol.name, &symbol.tokens, None)
        .filter(|classification| classification.kind.is_scope())
}

/// The class key of a class template: the keyword right after the balanced
/// `<...>` of its template header.
fn template_class_key(tokens: &[String]) -> MemberKind {
    let mut depth = 0usize;
    let mut seen_open = false;
    for (index, token) in tokens.iter().enumerate() {
        match token.as_str() {
            "<" => {
                depth += 1;
                seen_open = true;
            }
            ">" => depth = depth.saturating_sub(1),
            ">>" => depth = depth.saturating_sub(2),
            _ => {}
        }
        if seen_open && depth == 0 {
            return match tokens.get(index + 1).map(String::as_str) {
                Some("struct") => MemberKind::Struct,
                Some("union") => MemberKind::Union,
                _ => MemberKind::Class,
            };
        }
    }
    MemberKind::Class
}
