//! Builders for front-end declarations located in a [`Source`].

use doxpp::front_end::{ArgumentInfo, Decl, DeclInfo, DeclKind};

use super::source::Source;

fn usr(qualified: &str) -> String {
    format!("c:@{qualified}")
}

fn last_segment(qualified: &str) -> &str {
    qualified.rsplit("::").next().unwrap_or(qualified)
}

/// A declaration of `kind` named by the last segment of `qualified`,
/// located at `needle`.
pub fn decl(source: &Source, kind: DeclKind, qualified: &str, needle: &str) -> Decl {
    let extent = source.extent_of(needle);
    let tokens: Vec<String> = needle
        .split_whitespace()
        .flat_map(|word| {
            let mut pieces = Vec::new();
            let mut current = String::new();
            for c in word.chars() {
                if c.is_alphanumeric() || c == '_' || c == ':' {
                    current.push(c);
                } else {
                    if !current.is_empty() {
                        pieces.push(std::mem::take(&mut current));
                    }
                    pieces.push(c.to_string());
                }
            }
            if !current.is_empty() {
                pieces.push(current);
            }
            pieces
        })
        .collect();
    Decl::new(kind, last_segment(qualified), usr(qualified))
        .in_file(source.path, extent)
        .with_tokens(tokens)
}

/// Nest `children` under `parent`, recording `parent` as their semantic parent.
pub fn within(parent: Decl, children: Vec<Decl>) -> Decl {
    let parent_ref = parent.symbol_ref();
    let children = children
        .into_iter()
        .map(|child| child.with_semantic_parent(parent_ref.clone()))
        .collect();
    parent.with_children(children)
}

pub fn namespace(source: &Source, qualified: &str, needle: &str) -> Decl {
    decl(source, DeclKind::Namespace, qualified, needle)
}

pub fn class(source: &Source, qualified: &str, needle: &str) -> Decl {
    decl(source, DeclKind::ClassDecl, qualified, needle).with_info(DeclInfo {
        is_definition: true,
        ..DeclInfo::default()
    })
}

pub fn forward_class(source: &Source, qualified: &str, needle: &str) -> Decl {
    decl(source, DeclKind::ClassDecl, qualified, needle)
}

/// A function; `arguments` are `(name, type)` pairs.
pub fn function(source: &Source, qualified: &str, needle: &str, result: &str, arguments: &[(&str, &str)]) -> Decl {
    callable(source, DeclKind::FunctionDecl, qualified, needle, result, arguments)
}

pub fn method(source: &Source, qualified: &str, needle: &str, result: &str, arguments: &[(&str, &str)]) -> Decl {
    callable(source, DeclKind::CxxMethod, qualified, needle, result, arguments)
}

fn callable(
    source: &Source,
    kind: DeclKind,
    qualified: &str,
    needle: &str,
    result: &str,
    arguments: &[(&str, &str)],
) -> Decl {
    let signature: Vec<&str> = arguments.iter().map(|(_, ty)| *ty).collect();
    let mut decl = decl(source, kind, qualified, needle);
    decl.usr = format!("{}#{}", usr(qualified), signature.join(",")).as_str().into();
    decl.info.result_type = Some(result.to_string());
    decl.info.arguments = arguments
        .iter()
        .map(|(name, ty)| ArgumentInfo::new(*name, *ty))
        .collect();
    decl
}

pub fn variable(source: &Source, qualified: &str, needle: &str, type_spelling: &str) -> Decl {
    let mut decl = decl(source, DeclKind::VarDecl, qualified, needle);
    decl.info.type_spelling = Some(type_spelling.to_string());
    decl
}
