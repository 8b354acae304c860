//! Scope-aware name lookup.

use rustc_hash::FxHashMap;

use crate::base::constants::SCOPE_SEPARATOR;
use crate::base::split_top_level;
use crate::model::{DocumentModel, Entity, EntityKind, TypeRef};

/// A name as written in a reference, split for lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    /// Written with a leading `::`.
    pub global: bool,
    pub segments: Vec<String>,
    /// Argument types, if a parenthesized list was given.
    pub arguments: Option<Vec<TypeRef>>,
    /// A `const` after the argument list.
    pub is_const: bool,
}

/// Split a reference like `ns::A::f(int, double) const` or
/// `A::operator()(int)` into its parts.
pub fn parse_name(name: &str) -> Option<ParsedName> {
    let name = name.trim();
    let (global, rest) = match name.strip_prefix(SCOPE_SEPARATOR) {
        Some(rest) => (true, rest),
        None => (false, name),
    };
    let (path, list) = split_argument_list(rest);
    let segments = split_scope(&path);
    if segments.is_empty() || segments.iter().any(String::is_empty) {
        return None;
    }

    let mut parsed = ParsedName {
        global,
        segments,
        ..ParsedName::default()
    };
    if let Some(list) = list {
        let close = matching_paren(list).unwrap_or(list.len());
        let inner = list.get(1..close).unwrap_or_default();
        let trailing = list.get(close + 1..).unwrap_or_default();
        parsed.is_const = trailing.split_whitespace().any(|word| word == "const");
        let arguments: Vec<String> = split_top_level(inner);
        parsed.arguments = Some(if arguments == ["void"] {
            Vec::new()
        } else {
            arguments.iter().map(|a| argument_type(a)).collect()
        });
    }
    Some(parsed)
}

/// Words that can end a multi-word builtin type.
const BUILTIN_TYPE_WORDS: &[&str] = &[
    "int", "char", "short", "long", "signed", "unsigned", "double", "float", "bool", "void",
    "wchar_t", "char8_t", "char16_t", "char32_t", "auto",
];

/// The type of an argument as written in a reference, which may carry a
/// parameter name or a default value: `int x = 0` → `int`.
fn argument_type(text: &str) -> TypeRef {
    let text = text.split('=').next().unwrap_or(text);
    let mut type_ref = TypeRef::parse(text);
    if let Some((head, last)) = type_ref.typename.rsplit_once(' ') {
        let is_name = last.chars().all(|c| c.is_alphanumeric() || c == '_');
        if is_name && !BUILTIN_TYPE_WORDS.contains(&last) {
            type_ref.typename = head.to_string();
        }
    }
    type_ref
}

/// Separate the qualified name from a trailing `(...)` list.
fn split_argument_list(text: &str) -> (String, Option<&str>) {
    if let Some(index) = find_operator(text) {
        let after = &text[index + "operator".len()..];
        let trimmed = after.trim_start();
        let (symbol, rest) = if let Some(rest) = trimmed.strip_prefix("()") {
            ("()", rest)
        } else {
            let end = trimmed.find('(').unwrap_or(trimmed.len());
            (trimmed[..end].trim(), &trimmed[end..])
        };
        let joiner = if symbol.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            " "
        } else {
            ""
        };
        let path = format!("{}operator{joiner}{symbol}", &text[..index]);
        let rest = rest.trim_start();
        return (path, rest.starts_with('(').then_some(rest));
    }

    let mut depth = 0i32;
    for (index, c) in text.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            '(' if depth == 0 => return (text[..index].trim().to_string(), Some(&text[index..])),
            _ => {}
        }
    }
    (text.trim().to_string(), None)
}

/// Byte index of an `operator` keyword, if the name is an operator.
fn find_operator(text: &str) -> Option<usize> {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices("operator").map(|(index, _)| index).find(|&index| {
        let before = text[..index].chars().next_back();
        let after = text[index + "operator".len()..].chars().next();
        !before.is_some_and(is_ident) && after.is_some_and(|c| !is_ident(c))
    })
}

fn matching_paren(list: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (index, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on `::` outside template brackets and parentheses.
fn split_scope(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let bytes = path.as_bytes();
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'<' | b'(' => depth += 1,
            b'>' | b')' => depth -= 1,
            b':' if depth == 0 && bytes.get(index + 1) == Some(&b':') => {
                segments.push(path[start..index].trim().to_string());
                index += 2;
                start = index;
                continue;
            }
            _ => {}
        }
        index += 1;
    }
    segments.push(path[start..].trim().to_string());
    segments
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// True if an entity called `name` is what `segment` refers to.
fn name_matches(name: &str, segment: &str) -> bool {
    let segment = if segment.starts_with("operator") {
        segment
    } else {
        segment.split('<').next().unwrap_or(segment)
    };
    without_whitespace(name) == without_whitespace(segment)
}

/// Lookup over a document model, optionally including section and anchor ids.
pub struct Lookup<'a> {
    model: &'a DocumentModel,
    anchors: Option<&'a FxHashMap<String, String>>,
}

impl<'a> Lookup<'a> {
    pub fn new(model: &'a DocumentModel) -> Self {
        Self {
            model,
            anchors: None,
        }
    }

    /// Also resolve section/anchor ids (anchor id → owning record id).
    pub fn with_anchors(model: &'a DocumentModel, anchors: &'a FxHashMap<String, String>) -> Self {
        Self {
            model,
            anchors: Some(anchors),
        }
    }

    /// Resolve `name` as seen from the entity `context` (empty = global
    /// scope), falling back to exact ids of entities, groups, pages,
    /// headers and anchors, then to header names.
    pub fn find(&self, name: &str, context: &str) -> Option<String> {
        if let Some(id) = self.find_entity(name, context) {
            return Some(id);
        }
        let name = name.trim();
        if self.model.contains_id(name) || self.anchors.is_some_and(|a| a.contains_key(name)) {
            return Some(name.to_string());
        }
        self.model
            .headers
            .values()
            .find(|header| header.name == name)
            .map(|header| header.id.clone())
    }

    /// Resolve `name` to an entity only.
    ///
    /// The search starts among the children of `context` and moves outwards
    /// one enclosing scope at a time until the global scope.
    pub fn find_entity(&self, name: &str, context: &str) -> Option<String> {
        let parsed = parse_name(name)?;
        if parsed.global {
            return self.search("", &parsed.segments, &parsed);
        }
        let mut scope = context.to_string();
        loop {
            if let Some(id) = self.injected_class_name(&scope, &parsed) {
                return Some(id);
            }
            if let Some(id) = self.search(&scope, &parsed.segments, &parsed) {
                return Some(id);
            }
            if scope.is_empty() {
                return None;
            }
            scope = self
                .model
                .entities
                .get(&scope)
                .map(|entity| entity.parent_id.clone())
                .unwrap_or_default();
        }
    }

    /// Inside a class, its own bare name refers to the class rather than
    /// its constructors.
    fn injected_class_name(&self, scope: &str, parsed: &ParsedName) -> Option<String> {
        let [name] = parsed.segments.as_slice() else {
            return None;
        };
        if parsed.arguments.is_some() {
            return None;
        }
        self.model
            .entities
            .get(scope)
            .filter(|entity| entity.is_class_like() && name_matches(&entity.name, name))
            .map(|entity| entity.id.clone())
    }

    fn search(&self, scope: &str, segments: &[String], parsed: &ParsedName) -> Option<String> {
        let (first, rest) = segments.split_first()?;
        let candidates = self.children_matching(scope, first);
        if rest.is_empty() {
            return pick_overload(&candidates, parsed).map(|entity| entity.id.clone());
        }
        candidates
            .iter()
            .find_map(|candidate| self.search(&candidate.id, rest, parsed))
    }

    /// Children of `scope` named `segment`; values of unscoped enums are
    /// visible in the enclosing scope.
    fn children_matching(&self, scope: &str, segment: &str) -> Vec<&'a Entity> {
        let table = &self.model.entities;
        let children = || table.children(scope).iter().filter_map(|id| table.get(id));
        let direct: Vec<&Entity> = children().filter(|e| name_matches(&e.name, segment)).collect();
        if !direct.is_empty() {
            return direct;
        }
        children()
            .filter(|e| matches!(&e.kind, EntityKind::Enum(data) if !data.is_scoped))
            .flat_map(|e| e.children.iter().filter_map(|id| table.get(id)))
            .filter(|e| name_matches(&e.name, segment))
            .collect()
    }
}

fn same_types(a: &[TypeRef], b: &[TypeRef], with_qualifiers: bool) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            x.typename == y.typename && (!with_qualifiers || x.qualifiers == y.qualifiers)
        })
}

/// Choose among same-named candidates.
///
/// With a non-empty argument list: exact type match first, then typename
/// match, else nothing. Without one (or with `()`): a zero-argument overload
/// if there is one, else the first declared.
fn pick_overload<'e>(candidates: &[&'e Entity], parsed: &ParsedName) -> Option<&'e Entity> {
    let signature = |entity: &Entity| {
        entity
            .kind
            .function()
            .map(|f| (f.arguments.iter().map(|a| a.type_ref.clone()).collect::<Vec<_>>(), f.is_const))
    };
    let const_ok = |entity: &Entity| !parsed.is_const || signature(entity).is_some_and(|(_, c)| c);

    match &parsed.arguments {
        Some(wanted) if !wanted.is_empty() => {
            let matching = |with_qualifiers: bool| {
                candidates.iter().copied().find(|entity| {
                    const_ok(entity)
                        && signature(entity).is_some_and(|(args, _)| same_types(&args, wanted, with_qualifiers))
                })
            };
            matching(true).or_else(|| matching(false))
        }
        _ => {
            let zero_args = candidates.iter().copied().find(|entity| {
                const_ok(entity) && signature(entity).is_some_and(|(args, _)| args.is_empty())
            });
            zero_args
                .or_else(|| candidates.iter().copied().find(|entity| const_ok(entity)))
                .or_else(|| candidates.first().copied())
        }
    }
}
