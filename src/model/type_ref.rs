//! Type references: a type name plus the qualifiers applied to it.

use serde::Serialize;

/// A qualifier applied to a base type, in reading order after the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Qualifier {
    #[serde(rename = "*")]
    Pointer,
    #[serde(rename = "&")]
    LValueRef,
    #[serde(rename = "&&")]
    RValueRef,
    #[serde(rename = "[]")]
    Array,
    #[serde(rename = "const")]
    Const,
}

impl Qualifier {
    /// One-letter code used inside ids.
    pub fn code(self) -> char {
        match self {
            Qualifier::Pointer => 'P',
            Qualifier::LValueRef => 'L',
            Qualifier::RValueRef => 'R',
            Qualifier::Array => 'A',
            Qualifier::Const => 'C',
        }
    }
}

/// A reference to a type as written in a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    pub typename: String,
    pub qualifiers: Vec<Qualifier>,
    /// Entity the type name resolved to, filled in by cross-reference resolution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Words that only elaborate a type name.
const ELABORATIONS: &[&str] = &["struct", "class", "union", "enum", "typename"];

impl TypeRef {
    pub fn named(typename: impl Into<String>) -> Self {
        Self {
            typename: typename.into(),
            qualifiers: Vec::new(),
            id: None,
        }
    }

    /// Split a type spelling such as `const std::string &` into its base type
    /// and qualifiers.
    ///
    /// A leading `const` is recorded first, so `const char *` and
    /// `char const *` produce the same reference. Function types are kept
    /// verbatim as the type name.
    pub fn parse(spelling: &str) -> Self {
        let spelling = spelling.trim();
        if spelling.contains('(') {
            return Self::named(normalize_spaces(spelling));
        }

        let mut words: Vec<String> = Vec::new();
        let mut qualifiers = Vec::new();
        let mut leading_const = false;
        let mut base_done = false;

        for piece in split_type(spelling) {
            match piece.as_str() {
                "const" => {
                    if words.is_empty() {
                        leading_const = true;
                    } else {
                        base_done = true;
                        qualifiers.push(Qualifier::Const);
                    }
                }
                "volatile" => {}
                "*" => {
                    base_done = true;
                    qualifiers.push(Qualifier::Pointer);
                }
                "&" => {
                    base_done = true;
                    qualifiers.push(Qualifier::LValueRef);
                }
                "&&" => {
                    base_done = true;
                    qualifiers.push(Qualifier::RValueRef);
                }
                p if p.starts_with('[') => {
                    base_done = true;
                    qualifiers.push(Qualifier::Array);
                }
                p if words.is_empty() && ELABORATIONS.contains(&p) => {}
                p => {
                    // Anything after the qualifiers started is a declarator name.
                    if !base_done {
                        words.push(p.to_string());
                    }
                }
            }
        }

        if leading_const {
            qualifiers.insert(0, Qualifier::Const);
        }
        Self {
            typename: words.join(" "),
            qualifiers,
            id: None,
        }
    }

    /// The id fragment contributed by this type to a function id.
    pub fn id_fragment(&self) -> String {
        let codes: String = self.qualifiers.iter().map(|q| q.code()).collect();
        format!("-{}-{}", self.typename.replace(' ', "_"), codes)
    }

    pub fn is_empty(&self) -> bool {
        self.typename.is_empty()
    }
}

/// Break a type spelling into words, `<...>`-balanced template names,
/// `[...]` array extents and pointer/reference punctuation.
fn split_type(spelling: &str) -> Vec<String> {
    let mut pieces: Vec<String> = Vec::new();
    let chars: Vec<char> = spelling.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c == '*' {
            pieces.push("*".into());
            i += 1;
        } else if c == '&' {
            if chars.get(i + 1) == Some(&'&') {
                pieces.push("&&".into());
                i += 2;
            } else {
                pieces.push("&".into());
                i += 1;
            }
        } else if c == '[' {
            let start = i;
            while i < chars.len() && chars[i] != ']' {
                i += 1;
            }
            i = (i + 1).min(chars.len());
            pieces.push(chars[start..i].iter().collect());
        } else if c == '<' {
            // Template arguments belong to the preceding word.
            let start = i;
            let mut depth = 0;
            while i < chars.len() {
                match chars[i] {
                    '<' => depth += 1,
                    '>' => {
                        depth -= 1;
                        if depth == 0 {
                            i += 1;
                            break;
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
            let args = normalize_template_args(&chars[start..i].iter().collect::<String>());
            match pieces.last_mut() {
                Some(last) => last.push_str(&args),
                None => pieces.push(args),
            }
        } else {
            let start = i;
            while i < chars.len()
                && !chars[i].is_whitespace()
                && !matches!(chars[i], '*' | '&' | '[' | '<')
            {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            // `std::vector<int>::iterator` continues the previous word.
            match pieces.last_mut() {
                Some(last) if word.starts_with("::") || last.ends_with("::") => {
                    last.push_str(&word)
                }
                _ => pieces.push(word),
            }
        }
    }
    pieces
}

fn normalize_template_args(args: &str) -> String {
    let collapsed = normalize_spaces(args);
    collapsed
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(", ", ",")
        .replace(" ,", ",")
}

fn normalize_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
