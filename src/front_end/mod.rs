//! Interface to the C++ front-end.
//!
//! The front-end (a libclang binding, typically) parses a header and hands
//! back a [`TranslationUnit`]: the token stream of the main file, the
//! declaration tree, direct includes and diagnostics. This crate only
//! consumes that interface. Every value here is owned data, so nothing in the
//! document model ever borrows from front-end objects.

mod memory;

use std::path::PathBuf;

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::Extent;
use crate::model::Access;

pub use memory::InMemoryFrontEnd;

/// Unique symbol identity, shared by all redeclarations of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Usr(SmolStr);

impl Usr {
    pub fn new(usr: impl AsRef<str>) -> Self {
        Self(SmolStr::new(usr))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Usr {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Usr {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

// ============================================================================
// TOKENS
// ============================================================================

/// Token kinds as reported by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Comment,
    Keyword,
    Identifier,
    Punctuation,
    Literal,
}

/// A token of the main file with its source extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
    pub extent: Extent,
}

impl Token {
    pub fn new(kind: TokenKind, spelling: impl Into<String>, extent: Extent) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
            extent,
        }
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// Raw declaration kinds (the front-end's cursor kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Namespace,
    ClassDecl,
    StructDecl,
    UnionDecl,
    ClassTemplate,
    ClassTemplatePartialSpecialization,
    EnumDecl,
    EnumConstantDecl,
    FunctionDecl,
    FunctionTemplate,
    CxxMethod,
    Constructor,
    Destructor,
    ConversionFunction,
    FieldDecl,
    VarDecl,
    TypedefDecl,
    TypeAliasDecl,
    TypeAliasTemplateDecl,
    TemplateTypeParameter,
    TemplateNonTypeParameter,
    TemplateTemplateParameter,
    BaseSpecifier,
    AccessSpecifier,
    ParmDecl,
    UnexposedDecl,
    LinkageSpec,
    /// Anything else the front-end exposes (using-directives, friends, ...).
    Other,
}

/// Storage class of a variable or function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageClass {
    #[default]
    None,
    Extern,
    Static,
}

/// A reference to another declaration, e.g. a semantic parent.
///
/// The chain of parents is carried along so placeholder entities can be
/// built for parents that have not been walked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRef {
    pub usr: Usr,
    pub kind: DeclKind,
    pub name: String,
    /// Token spellings of the referenced declaration, when available.
    pub tokens: Vec<String>,
    pub parent: Option<Box<SymbolRef>>,
}

impl SymbolRef {
    pub fn new(usr: impl Into<Usr>, kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            usr: usr.into(),
            kind,
            name: name.into(),
            tokens: Vec::new(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: SymbolRef) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

/// A function argument as reported by the front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentInfo {
    pub name: String,
    pub type_spelling: String,
    pub default: Option<String>,
}

impl ArgumentInfo {
    pub fn new(name: impl Into<String>, type_spelling: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_spelling: type_spelling.into(),
            default: None,
        }
    }
}

/// Results of the front-end's kind-specific queries on a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclInfo {
    pub is_definition: bool,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_const: bool,
    pub is_pure: bool,
    pub is_abstract: bool,
    pub deprecated: bool,
    pub storage: StorageClass,
    pub access: Option<Access>,
    /// Return type of functions.
    pub result_type: Option<String>,
    pub arguments: Vec<ArgumentInfo>,
    /// Type of variables, fields, base specifiers and non-type template parameters.
    pub type_spelling: Option<String>,
    /// Aliased type of typedefs/aliases, underlying type of enums.
    pub underlying_type: Option<String>,
    pub enum_value: Option<i64>,
    pub bit_field_width: Option<u32>,
    /// Default of a template parameter.
    pub default_value: Option<String>,
}

/// A node of the front-end's declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    pub name: String,
    pub usr: Usr,
    /// File the declaration is located in; `None` for translation-unit level nodes.
    pub file: Option<PathBuf>,
    pub extent: Extent,
    pub semantic_parent: Option<SymbolRef>,
    pub lexical_parent: Option<SymbolRef>,
    /// Token spellings covering the declaration's extent.
    pub tokens: Vec<String>,
    pub info: DeclInfo,
    pub children: Vec<Decl>,
}

impl Decl {
    pub fn new(kind: DeclKind, name: impl Into<String>, usr: impl Into<Usr>) -> Self {
        Self {
            kind,
            name: name.into(),
            usr: usr.into(),
            file: None,
            extent: Extent::default(),
            semantic_parent: None,
            lexical_parent: None,
            tokens: Vec::new(),
            info: DeclInfo::default(),
            children: Vec::new(),
        }
    }

    pub fn in_file(mut self, file: impl Into<PathBuf>, extent: Extent) -> Self {
        self.file = Some(file.into());
        self.extent = extent;
        self
    }

    pub fn with_semantic_parent(mut self, parent: SymbolRef) -> Self {
        self.semantic_parent = Some(parent);
        self
    }

    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_info(mut self, info: DeclInfo) -> Self {
        self.info = info;
        self
    }

    pub fn with_children(mut self, children: Vec<Decl>) -> Self {
        self.children = children;
        self
    }

    /// A reference to this declaration, usable as another node's parent.
    pub fn symbol_ref(&self) -> SymbolRef {
        SymbolRef {
            usr: self.usr.clone(),
            kind: self.kind,
            name: self.name.clone(),
            tokens: self.tokens.clone(),
            parent: self.semantic_parent.clone().map(Box::new),
        }
    }
}

// ============================================================================
// TRANSLATION UNITS
// ============================================================================

/// Severity of a front-end diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEndSeverity {
    Note,
    Warning,
    Error,
    Fatal,
}

/// A diagnostic produced while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontEndDiagnostic {
    pub severity: FrontEndSeverity,
    pub message: String,
}

/// An `#include` seen while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inclusion {
    /// Include path as written.
    pub name: String,
    /// 1 for headers included directly by the main file.
    pub depth: u32,
}

/// Everything the front-end produces for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationUnit {
    pub tokens: Vec<Token>,
    pub decls: Vec<Decl>,
    pub includes: Vec<Inclusion>,
    pub diagnostics: Vec<FrontEndDiagnostic>,
}

/// What to parse and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRequest {
    pub path: PathBuf,
    pub flags: Vec<String>,
    pub include_dirs: Vec<PathBuf>,
}

/// Front-end failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrontEndError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("translation unit could not be loaded: {0}")]
    LoadFailed(String),
}

/// The C++ front-end collaborator.
pub trait FrontEnd {
    fn parse(&self, request: &ParseRequest) -> Result<TranslationUnit, FrontEndError>;
}
