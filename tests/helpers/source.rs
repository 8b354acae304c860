//! A tiny C++ tokenizer producing front-end tokens with real positions.

use doxpp::base::{Extent, Position};
use doxpp::front_end::{Decl, Token, TokenKind, TranslationUnit};

const KEYWORDS: &[&str] = &[
    "class", "struct", "union", "enum", "namespace", "void", "int", "double", "char", "bool",
    "const", "static", "virtual", "public", "private", "protected", "template", "typename",
    "using", "typedef", "return", "operator",
];

/// A header's text and its token stream.
pub struct Source {
    pub path: &'static str,
    pub text: String,
    /// Tokens with the byte offset they start at.
    tokens: Vec<(usize, Token)>,
}

impl Source {
    pub fn new(path: &'static str, text: &str) -> Self {
        Self {
            path,
            text: text.to_string(),
            tokens: tokenize(text),
        }
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.tokens.iter().map(|(_, token)| token.clone()).collect()
    }

    /// The extent of `needle`, which must start at a non-comment token.
    pub fn extent_of(&self, needle: &str) -> Extent {
        let (offset, token) = self
            .tokens
            .iter()
            .filter(|(_, token)| !token.is_comment())
            .find(|(offset, _)| self.text[*offset..].starts_with(needle))
            .unwrap_or_else(|| panic!("`{needle}` not found in {}", self.path));
        Extent::new(token.extent.start, position_at(&self.text, offset + needle.len()))
    }

    /// Wrap top-level declarations into a translation unit for this file.
    pub fn unit(&self, decls: Vec<Decl>) -> TranslationUnit {
        TranslationUnit {
            tokens: self.tokens(),
            decls,
            ..TranslationUnit::default()
        }
    }
}

fn position_at(text: &str, offset: usize) -> Position {
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32 + 1;
    let column = before.rsplit('\n').next().unwrap_or("").chars().count() as u32 + 1;
    Position::new(line, column)
}

fn tokenize(text: &str) -> Vec<(usize, Token)> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        let kind = if c.is_ascii_whitespace() {
            i += 1;
            continue;
        } else if text[i..].starts_with("//") {
            i = text[i..].find('\n').map_or(bytes.len(), |end| i + end);
            TokenKind::Comment
        } else if text[i..].starts_with("/*") {
            i = text[i + 2..].find("*/").map_or(bytes.len(), |end| i + 2 + end + 2);
            TokenKind::Comment
        } else if c == b'"' {
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                i += 1;
            }
            i = (i + 1).min(bytes.len());
            TokenKind::Literal
        } else if c.is_ascii_alphanumeric() || c == b'_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            let word = &text[start..i];
            if c.is_ascii_digit() {
                TokenKind::Literal
            } else if KEYWORDS.contains(&word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            }
        } else {
            i += if text[i..].starts_with("::") { 2 } else { 1 };
            TokenKind::Punctuation
        };
        let extent = Extent::new(position_at(text, start), position_at(text, i));
        tokens.push((start, Token::new(kind, &text[start..i], extent)));
    }
    tokens
}
