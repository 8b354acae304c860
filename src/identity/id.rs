//! Stable ids for entities and headers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::model::{EntityKind, MemberKind, RefQualifier, TypeRef};

/// What distinguishes same-named siblings: template-ness and, for
/// functions, the signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Disambiguator {
    pub is_template: bool,
    pub arguments: Vec<TypeRef>,
    pub is_const: bool,
    pub ref_qualifier: Option<RefQualifier>,
}

impl Disambiguator {
    /// Take the distinguishing attributes from an entity payload.
    pub fn of(kind: &EntityKind) -> Self {
        match kind {
            EntityKind::Class(data) | EntityKind::Struct(data) | EntityKind::Union(data) => Self {
                is_template: data.is_template,
                ..Self::default()
            },
            EntityKind::Alias(data) => Self {
                is_template: data.is_template,
                ..Self::default()
            },
            EntityKind::Function(data) => Self {
                is_template: data.is_template,
                arguments: data.arguments.iter().map(|a| a.type_ref.clone()).collect(),
                is_const: data.is_const,
                ref_qualifier: data.ref_qualifier,
            },
            _ => Self::default(),
        }
    }
}

/// Compute the id of an entity.
///
/// The id is the name, prefixed by the parent id and `-` when there is a
/// parent. Templates get `-T`. Functions get one `-<typename>-<codes>` group
/// per argument, then `-C` when const-qualified and `-L`/`-R` when
/// ref-qualified.
pub fn member_id(kind: MemberKind, name: &str, parent_id: &str, disambiguator: &Disambiguator) -> String {
    let mut id = if parent_id.is_empty() {
        name.to_string()
    } else {
        format!("{parent_id}-{name}")
    };
    if disambiguator.is_template {
        id.push_str("-T");
    }
    if kind == MemberKind::Function {
        for argument in &disambiguator.arguments {
            id.push_str(&argument.id_fragment());
        }
        if disambiguator.is_const {
            id.push_str("-C");
        }
        match disambiguator.ref_qualifier {
            Some(RefQualifier::LValue) => id.push_str("-L"),
            Some(RefQualifier::RValue) => id.push_str("-R"),
            None => {}
        }
    }
    id
}

/// Bytes escaped in header ids: everything outside `[A-Za-z0-9_.~-]`.
const HEADER_ID_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'-');

/// Id of a header: its canonical name, percent-encoded.
pub fn header_id(name: &str) -> String {
    utf8_percent_encode(name, HEADER_ID_ESCAPES).to_string()
}
