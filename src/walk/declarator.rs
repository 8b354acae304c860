//! Declarator token scanning.
//!
//! The front-end answers most questions about a declaration directly, but
//! specifiers such as `explicit`, `override` or `= default` are only
//! visible in the tokens. The scan locates the declared name, then reads
//! the specifiers before it and, for functions, those after the parameter
//! list.

use crate::model::RefQualifier;

/// Specifiers found around a declarator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specifiers {
    pub is_virtual: bool,
    pub is_static: bool,
    pub is_explicit: bool,
    pub is_inline: bool,
    pub is_constexpr: bool,
    pub is_extern: bool,
    pub is_mutable: bool,
    pub is_const: bool,
    pub is_final: bool,
    pub is_override: bool,
    pub is_pure: bool,
    pub is_defaulted: bool,
    pub is_deleted: bool,
    pub is_noexcept: bool,
    pub ref_qualifier: Option<RefQualifier>,
}

/// Index just past the bracketed region opening at `start`.
fn skip_balanced(tokens: &[String], start: usize, open: &str, close: &str) -> usize {
    let mut depth = 0usize;
    let mut index = start;
    while index < tokens.len() {
        let token = tokens[index].as_str();
        if token == open {
            depth += 1;
        } else if token == close || (close == ">" && token == ">>") {
            let closes = if token == ">>" { 2 } else { 1 };
            depth = depth.saturating_sub(closes);
            if depth == 0 {
                return index + 1;
            }
        }
        index += 1;
    }
    tokens.len()
}

/// Position and token length of the declared name.
fn find_name(tokens: &[String], name: &str, start: usize) -> Option<(usize, usize)> {
    let base = name.rsplit("::").next().unwrap_or(name);
    let wanted: String = base.chars().filter(|c| !c.is_whitespace()).collect();
    if wanted.is_empty() {
        return None;
    }
    let mut fallback = None;
    for index in start..tokens.len() {
        let mut joined = String::new();
        let mut count = 0;
        for token in &tokens[index..] {
            joined.push_str(token);
            count += 1;
            if joined.len() >= wanted.len() {
                break;
            }
        }
        if joined != wanted {
            continue;
        }
        // Prefer the occurrence that is followed by a parameter list or
        // template arguments over a qualifier such as `A::` in `A::A()`.
        match tokens.get(index + count).map(String::as_str) {
            Some("::") => {}
            Some("(") | Some("<") => return Some((index, count)),
            _ => {
                fallback.get_or_insert((index, count));
            }
        }
    }
    fallback
}

/// Skip a leading `template <...>` header.
fn skip_template_header(tokens: &[String]) -> usize {
    let mut index = 0;
    while tokens.get(index).map(String::as_str) == Some("template")
        && tokens.get(index + 1).map(String::as_str) == Some("<")
    {
        index = skip_balanced(tokens, index + 1, "<", ">");
    }
    index
}

fn scan_leading(tokens: &[String], specifiers: &mut Specifiers) {
    for token in tokens {
        match token.as_str() {
            "virtual" => specifiers.is_virtual = true,
            "static" => specifiers.is_static = true,
            "explicit" => specifiers.is_explicit = true,
            "inline" => specifiers.is_inline = true,
            "constexpr" | "consteval" => specifiers.is_constexpr = true,
            "extern" => specifiers.is_extern = true,
            "mutable" => specifiers.is_mutable = true,
            _ => {}
        }
    }
}

/// Scan a function declaration.
pub fn scan_function(tokens: &[String], name: &str) -> Specifiers {
    let mut specifiers = Specifiers::default();
    let start = skip_template_header(tokens);
    let Some((name_index, name_len)) = find_name(tokens, name, start) else {
        return specifiers;
    };
    scan_leading(&tokens[start..name_index], &mut specifiers);

    let mut index = name_index + name_len;
    if tokens.get(index).map(String::as_str) == Some("<") {
        index = skip_balanced(tokens, index, "<", ">");
    }
    if tokens.get(index).map(String::as_str) != Some("(") {
        return specifiers;
    }
    index = skip_balanced(tokens, index, "(", ")");

    let mut trailing_return = false;
    while let Some(token) = tokens.get(index) {
        match token.as_str() {
            "{" | ";" | ":" => break,
            "->" => trailing_return = true,
            "const" if !trailing_return => specifiers.is_const = true,
            "&" if !trailing_return => specifiers.ref_qualifier = Some(RefQualifier::LValue),
            "&&" if !trailing_return => specifiers.ref_qualifier = Some(RefQualifier::RValue),
            "override" => specifiers.is_override = true,
            "final" => specifiers.is_final = true,
            "noexcept" => {
                specifiers.is_noexcept = true;
                if tokens.get(index + 1).map(String::as_str) == Some("(") {
                    let end = skip_balanced(tokens, index + 1, "(", ")");
                    // `noexcept(false)` is not noexcept.
                    if tokens[index + 1..end].iter().any(|t| t == "false") {
                        specifiers.is_noexcept = false;
                    }
                    index = end;
                    continue;
                }
            }
            "throw" if tokens.get(index + 1).map(String::as_str) == Some("(") => {
                index = skip_balanced(tokens, index + 1, "(", ")");
                continue;
            }
            "=" => {
                match tokens.get(index + 1).map(String::as_str) {
                    Some("0") => specifiers.is_pure = true,
                    Some("default") => specifiers.is_defaulted = true,
                    Some("delete") => specifiers.is_deleted = true,
                    _ => {}
                }
                break;
            }
            _ => {}
        }
        index += 1;
    }
    specifiers
}

/// Scan a variable or field declaration.
pub fn scan_variable(tokens: &[String], name: &str) -> Specifiers {
    let mut specifiers = Specifiers::default();
    let start = skip_template_header(tokens);
    let end = find_name(tokens, name, start)
        .map(|(index, _)| index)
        .unwrap_or(tokens.len());
    scan_leading(&tokens[start..end], &mut specifiers);
    specifiers
}

/// True if the class head has a `final` after the class name.
pub fn class_is_final(tokens: &[String], name: &str) -> bool {
    let start = skip_template_header(tokens);
    let head_end = tokens[start..]
        .iter()
        .position(|t| t == "{" || t == ";")
        .map_or(tokens.len(), |p| start + p);
    let head = &tokens[start..head_end];
    head.iter()
        .position(|t| t == name)
        .is_some_and(|index| head.get(index + 1).map(String::as_str) == Some("final"))
}

/// True for `enum class` and `enum struct`.
pub fn enum_is_scoped(tokens: &[String]) -> bool {
    tokens.first().map(String::as_str) == Some("enum")
        && matches!(tokens.get(1).map(String::as_str), Some("class") | Some("struct"))
}
