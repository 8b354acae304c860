//! Document Model: the frozen output of a run.
//!
//! Entities form a forest rooted at the empty id and live in an
//! [`EntityTable`] arena addressed by string id. Headers, groups and pages
//! are kept in insertion-ordered maps so serialization is deterministic.

mod document;
mod entity;
mod records;
mod table;
mod type_ref;


pub use document::DocumentModel;
pub use entity::{
    Access, AliasData, Argument, BaseClass, ClassData, DerivedClass, Entity, EntityKind, EnumData,
    EnumValueData, FunctionData, FunctionRole, MacroData, MemberKind, RefQualifier,
    TemplateParameter, TemplateParameterKind, VariableData,
};
pub use records::{Group, Header, Page, Section};
pub use table::EntityTable;
pub use type_ref::{Qualifier, TypeRef};
