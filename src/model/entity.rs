//! Entities: one canonical record per documented C++ declaration (or macro).

use std::fmt;

use serde::Serialize;

use super::records::Section;
use super::type_ref::TypeRef;

// ============================================================================
// KINDS
// ============================================================================

/// Member access of class members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    Private,
}

/// The kind of an entity, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Namespace,
    Class,
    Struct,
    Union,
    Enum,
    EnumValue,
    Function,
    Variable,
    Alias,
    Macro,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Namespace => "namespace",
            MemberKind::Class => "class",
            MemberKind::Struct => "struct",
            MemberKind::Union => "union",
            MemberKind::Enum => "enum",
            MemberKind::EnumValue => "enum_value",
            MemberKind::Function => "function",
            MemberKind::Variable => "variable",
            MemberKind::Alias => "alias",
            MemberKind::Macro => "macro",
        }
    }

    /// Kinds whose entities own child entities.
    pub fn is_scope(self) -> bool {
        matches!(
            self,
            MemberKind::Namespace
                | MemberKind::Class
                | MemberKind::Struct
                | MemberKind::Union
                | MemberKind::Enum
        )
    }

    pub fn is_class_like(self) -> bool {
        matches!(self, MemberKind::Class | MemberKind::Struct | MemberKind::Union)
    }

    /// The kind named by an out-of-line documentation command.
    pub fn from_command(command: &str) -> Option<Self> {
        Some(match command {
            "class" => MemberKind::Class,
            "struct" => MemberKind::Struct,
            "union" => MemberKind::Union,
            "namespace" => MemberKind::Namespace,
            "enum" => MemberKind::Enum,
            "function" | "fn" => MemberKind::Function,
            "variable" | "var" => MemberKind::Variable,
            "alias" | "typedef" => MemberKind::Alias,
            "macro" | "def" => MemberKind::Macro,
            _ => return None,
        })
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// KIND PAYLOADS
// ============================================================================

/// Kind of a template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateParameterKind {
    Type,
    NonType,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParameter {
    pub name: String,
    pub kind: TemplateParameterKind,
    /// Type of a non-type parameter.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_spelling: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
}

/// A base-class specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseClass {
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub access: Access,
    pub is_virtual: bool,
}

/// Back-link from a base class to a class deriving from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedClass {
    pub id: String,
    pub access: Access,
}

/// Payload shared by classes, structs and unions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassData {
    pub is_template: bool,
    pub template_parameters: Vec<TemplateParameter>,
    pub bases: Vec<BaseClass>,
    pub derived: Vec<DerivedClass>,
    /// Entities that declared `\relates` to this class.
    pub related: Vec<String>,
    pub is_abstract: bool,
    pub is_final: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_type: Option<TypeRef>,
    pub is_scoped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumValueData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// What kind of callable a function entity is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionRole {
    #[default]
    Function,
    Method,
    Constructor,
    Destructor,
    Conversion,
}

/// Reference qualifier of a method (`void f() &`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefQualifier {
    #[serde(rename = "&")]
    LValue,
    #[serde(rename = "&&")]
    RValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FunctionData {
    pub role: FunctionRole,
    pub is_template: bool,
    pub template_parameters: Vec<TemplateParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    pub arguments: Vec<Argument>,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_pure: bool,
    pub is_const: bool,
    pub is_final: bool,
    pub is_override: bool,
    pub is_explicit: bool,
    pub is_defaulted: bool,
    pub is_deleted: bool,
    pub is_constexpr: bool,
    pub is_noexcept: bool,
    pub is_inline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_qualifier: Option<RefQualifier>,
}

impl FunctionData {
    pub fn is_method(&self) -> bool {
        self.role != FunctionRole::Function
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariableData {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,
    pub is_field: bool,
    pub is_static: bool,
    pub is_const: bool,
    pub is_constexpr: bool,
    pub is_mutable: bool,
    pub is_extern: bool,
    pub is_inline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_field_width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliased: Option<TypeRef>,
    pub is_typedef: bool,
    pub is_template: bool,
    pub template_parameters: Vec<TemplateParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MacroData {
    /// `None` for object-like macros.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
}

/// Entity kind together with its kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "member_type", rename_all = "snake_case")]
pub enum EntityKind {
    Namespace,
    Class(ClassData),
    Struct(ClassData),
    Union(ClassData),
    Enum(EnumData),
    EnumValue(EnumValueData),
    Function(FunctionData),
    Variable(VariableData),
    Alias(AliasData),
    Macro(MacroData),
}

impl EntityKind {
    /// An empty payload for `kind`.
    pub fn empty(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Namespace => EntityKind::Namespace,
            MemberKind::Class => EntityKind::Class(ClassData::default()),
            MemberKind::Struct => EntityKind::Struct(ClassData::default()),
            MemberKind::Union => EntityKind::Union(ClassData::default()),
            MemberKind::Enum => EntityKind::Enum(EnumData::default()),
            MemberKind::EnumValue => EntityKind::EnumValue(EnumValueData::default()),
            MemberKind::Function => EntityKind::Function(FunctionData::default()),
            MemberKind::Variable => EntityKind::Variable(VariableData::default()),
            MemberKind::Alias => EntityKind::Alias(AliasData::default()),
            MemberKind::Macro => EntityKind::Macro(MacroData::default()),
        }
    }

    pub fn member_kind(&self) -> MemberKind {
        match self {
            EntityKind::Namespace => MemberKind::Namespace,
            EntityKind::Class(_) => MemberKind::Class,
            EntityKind::Struct(_) => MemberKind::Struct,
            EntityKind::Union(_) => MemberKind::Union,
            EntityKind::Enum(_) => MemberKind::Enum,
            EntityKind::EnumValue(_) => MemberKind::EnumValue,
            EntityKind::Function(_) => MemberKind::Function,
            EntityKind::Variable(_) => MemberKind::Variable,
            EntityKind::Alias(_) => MemberKind::Alias,
            EntityKind::Macro(_) => MemberKind::Macro,
        }
    }

    pub fn class_data(&self) -> Option<&ClassData> {
        match self {
            EntityKind::Class(data) | EntityKind::Struct(data) | EntityKind::Union(data) => {
                Some(data)
            }
            _ => None,
        }
    }

    pub fn class_data_mut(&mut self) -> Option<&mut ClassData> {
        match self {
            EntityKind::Class(data) | EntityKind::Struct(data) | EntityKind::Union(data) => {
                Some(data)
            }
            _ => None,
        }
    }

    pub fn function(&self) -> Option<&FunctionData> {
        match self {
            EntityKind::Function(data) => Some(data),
            _ => None,
        }
    }
}

// ============================================================================
// ENTITY
// ============================================================================

/// A canonical documentation record.
///
/// `id` is assigned once at creation and never changes. `children` holds the
/// ids of child entities in source order; it is not serialized directly, the
/// document model nests child records instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(rename = "parent")]
    pub parent_id: String,
    #[serde(rename = "header")]
    pub header_id: String,
    pub brief: String,
    pub doc: String,
    #[serde(rename = "group")]
    pub group_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub member_group: String,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub relates: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ghost: bool,
    #[serde(skip)]
    pub children: Vec<String>,
    #[serde(flatten)]
    pub kind: EntityKind,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: String::new(),
            header_id: String::new(),
            brief: String::new(),
            doc: String::new(),
            group_id: String::new(),
            member_group: String::new(),
            deprecated: false,
            access: None,
            relates: String::new(),
            sections: Vec::new(),
            anchors: Vec::new(),
            ghost: false,
            children: Vec::new(),
            kind,
        }
    }

    /// A placeholder for a scope that has not been walked yet.
    pub fn ghost(id: impl Into<String>, name: impl Into<String>, kind: MemberKind) -> Self {
        let mut entity = Self::new(id, name, EntityKind::empty(kind));
        entity.ghost = true;
        entity
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    pub fn member_kind(&self) -> MemberKind {
        self.kind.member_kind()
    }

    pub fn is_scope(&self) -> bool {
        self.member_kind().is_scope()
    }

    pub fn is_class_like(&self) -> bool {
        self.member_kind().is_class_like()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }
}
