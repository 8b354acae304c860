//! Logos-based tokenizer for documentation text.
//!
//! Documentation text is tokenized once into a list of [`DocPart`]s: plain
//! text runs (kept verbatim) and the embedded commands that later passes
//! rewrite. Commands inside backtick code spans are left alone.

use logos::Logos;

use crate::base::{split_top_level, strip_quotes};

// ============================================================================
// LEXER
// ============================================================================

/// Lexemes of documentation text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    #[regex(r"[\\@][a-zA-Z]+")]
    Command,

    /// `\\` or `\@`: an escaped command character.
    #[regex(r"\\[\\@]")]
    Escape,

    #[regex(r"`[^`\n]*`")]
    CodeSpan,

    #[regex(r#""[^"\n]*""#)]
    Quoted,

    #[regex(r"[ \t\r]+")]
    Space,

    #[token("\n")]
    Newline,

    #[token(",")]
    Comma,

    #[regex(r#"[^\s\\@`",]+"#)]
    Word,

    /// Anything the other rules reject (a stray `\`, `@` or `"`).
    Stray,
}

/// A lexeme with its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: Lexeme,
    pub text: &'a str,
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Lexeme>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Lexeme::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?.unwrap_or(Lexeme::Stray);
        Some(Token {
            kind,
            text: self.inner.slice(),
        })
    }
}

pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

// ============================================================================
// PARTS
// ============================================================================

/// A command recognized in documentation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// `\ref target ["text"]`
    Ref { target: String, text: Option<String> },
    /// `\see a, b` / `\sa a, b`
    SeeAlso(Vec<String>),
    /// `\relates name` / `\related name`
    Relates(String),
    /// `\subpage target ["text"]`
    Subpage { target: String, text: Option<String> },
    /// `\ingroup id`
    Ingroup(String),
    /// `\section id title` and its sub-levels.
    Section { level: u8, id: String, title: String },
    /// `\anchor id`
    Anchor(String),
    /// A known command missing its required argument.
    Malformed(&'static str),
}

/// A command with the source text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocCommand {
    pub kind: CommandKind,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocPart {
    Text(String),
    Command(DocCommand),
}

/// Commands that produce no output and vanish together with their line.
fn is_strippable(kind: &CommandKind) -> bool {
    matches!(kind, CommandKind::Relates(_) | CommandKind::Ingroup(_))
}

/// Split documentation text into text runs and commands.
pub fn parse(text: &str) -> Vec<DocPart> {
    Parser::new(text).run()
}

/// Render parts back into text, keeping every command verbatim.
pub fn render_raw(parts: &[DocPart]) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            DocPart::Text(text) => out.push_str(text),
            DocPart::Command(cmd) => out.push_str(&cmd.raw),
        }
    }
    out
}

/// Remove every `\ingroup` from `text`; returns the first group id named.
pub fn take_ingroup(text: &str) -> (Option<String>, String) {
    let mut group = None;
    let mut kept = Vec::new();
    for part in parse(text) {
        match part {
            DocPart::Command(DocCommand {
                kind: CommandKind::Ingroup(id),
                ..
            }) => {
                group.get_or_insert(id);
            }
            other => kept.push(other),
        }
    }
    if group.is_none() {
        return (None, text.to_string());
    }
    (group, render_raw(&kept).trim().to_string())
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    parts: Vec<DocPart>,
    text: String,
    /// Punctuation split off the end of a reference name.
    tail: String,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            tokens: tokenize(input),
            pos: 0,
            parts: Vec::new(),
            text: String::new(),
            tail: String::new(),
        }
    }

    fn run(mut self) -> Vec<DocPart> {
        while let Some(token) = self.bump() {
            match token.kind {
                Lexeme::Command => self.command(token),
                _ => self.text.push_str(token.text),
            }
        }
        self.flush();
        self.parts
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<Lexeme> {
        self.peek().map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.parts.push(DocPart::Text(std::mem::take(&mut self.text)));
        }
    }

    /// Skip spaces (not newlines); returns the skipped text.
    fn skip_space(&mut self) -> String {
        let mut skipped = String::new();
        while let Some(token) = self.peek() {
            if token.kind != Lexeme::Space {
                break;
            }
            skipped.push_str(token.text);
            self.pos += 1;
        }
        skipped
    }

    fn command(&mut self, token: Token<'a>) {
        let name = &token.text[1..];
        let start = self.pos;
        let kind = match name {
            "ref" => self.link_arguments().map(|(target, text)| CommandKind::Ref { target, text }),
            "subpage" => self
                .link_arguments()
                .map(|(target, text)| CommandKind::Subpage { target, text }),
            "see" | "sa" => self.see_also(),
            "relates" | "related" => self.word_argument().map(CommandKind::Relates),
            "ingroup" => self.word_argument().map(CommandKind::Ingroup),
            "anchor" => self.word_argument().map(CommandKind::Anchor),
            "section" => self.section(1),
            "subsection" => self.section(2),
            "subsubsection" => self.section(3),
            _ => {
                self.text.push_str(token.text);
                return;
            }
        };
        let kind = kind.unwrap_or_else(|| {
            // Leave what followed the command as ordinary text.
            self.pos = start;
            CommandKind::Malformed(malformed_name(name))
        });

        let mut raw = token.text.to_string();
        for t in &self.tokens[start..self.pos] {
            raw.push_str(t.text);
        }
        let tail = std::mem::take(&mut self.tail);
        raw.truncate(raw.len() - tail.len());

        if is_strippable(&kind) && self.alone_on_line() {
            let trimmed = self.text.trim_end_matches([' ', '\t']).len();
            self.text.truncate(trimmed);
            self.skip_space();
            if self.peek_kind() == Some(Lexeme::Newline) {
                self.pos += 1;
            }
        }
        self.flush();
        self.parts.push(DocPart::Command(DocCommand { kind, raw }));
        self.text.push_str(&tail);
    }

    /// True if the command just parsed has nothing else on its line.
    fn alone_on_line(&self) -> bool {
        if !self.text.contains('\n') && !self.parts.is_empty() {
            return false;
        }
        let before = self.text.rsplit('\n').next().unwrap_or_default();
        if !before.trim().is_empty() {
            return false;
        }
        self.tokens[self.pos..]
            .iter()
            .take_while(|t| t.kind != Lexeme::Newline)
            .all(|t| t.kind == Lexeme::Space)
    }

    fn word_argument(&mut self) -> Option<String> {
        self.skip_space();
        match self.peek_kind() {
            Some(Lexeme::Word) => self.bump().map(|t| t.text.to_string()),
            _ => None,
        }
    }

    /// Target plus optional quoted link text, as taken by `\ref` and `\subpage`.
    fn link_arguments(&mut self) -> Option<(String, Option<String>)> {
        self.skip_space();
        let target = match self.peek_kind() {
            Some(Lexeme::Quoted) => self.bump().map(|t| strip_quotes(t.text).to_string())?,
            Some(Lexeme::Word) => self.reference_name()?,
            _ => return None,
        };
        if !self.tail.is_empty() {
            return Some((target, None));
        }
        let save = self.pos;
        self.skip_space();
        let text = match self.peek_kind() {
            Some(Lexeme::Quoted) => self.bump().map(|t| strip_quotes(t.text).to_string()),
            _ => {
                self.pos = save;
                None
            }
        };
        Some((target, text))
    }

    /// A possibly qualified name with an optional argument list, e.g.
    /// `ns::f(int, double)`. Trailing sentence punctuation is left as text.
    fn reference_name(&mut self) -> Option<String> {
        let first = self.bump()?;
        let mut name = first.text.to_string();
        let mut depth = paren_balance(&name);
        while depth > 0 {
            match self.peek() {
                Some(t) if t.kind != Lexeme::Newline => {
                    name.push_str(t.text);
                    depth += paren_balance(t.text);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        let trimmed = name.trim_end_matches(['.', ';', ':', '!', '?']);
        // `operator!` and friends keep their punctuation.
        if trimmed.len() != name.len() && !trimmed.ends_with("operator") && !trimmed.is_empty() {
            self.tail = name[trimmed.len()..].to_string();
            name.truncate(trimmed.len());
        }
        Some(name)
    }

    /// `\see a, b` runs to the end of the line.
    fn see_also(&mut self) -> Option<CommandKind> {
        let mut line = String::new();
        while let Some(t) = self.peek() {
            if t.kind == Lexeme::Newline {
                break;
            }
            line.push_str(t.text);
            self.pos += 1;
        }
        let targets: Vec<String> = split_top_level(&line)
            .into_iter()
            .map(|item| item.trim_end_matches('.').trim_end().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if targets.is_empty() {
            return None;
        }
        Some(CommandKind::SeeAlso(targets))
    }

    fn section(&mut self, level: u8) -> Option<CommandKind> {
        let id = self.word_argument()?;
        let mut title = String::new();
        while let Some(t) = self.peek() {
            if t.kind == Lexeme::Newline {
                break;
            }
            title.push_str(t.text);
            self.pos += 1;
        }
        let title = strip_quotes(title.trim()).to_string();
        if title.is_empty() {
            return None;
        }
        Some(CommandKind::Section { level, id, title })
    }
}

fn malformed_name(name: &str) -> &'static str {
    match name {
        "ref" => "ref",
        "subpage" => "subpage",
        "relates" | "related" => "relates",
        "ingroup" => "ingroup",
        "anchor" => "anchor",
        "section" => "section",
        "subsection" => "subsection",
        "subsubsection" => "subsubsection",
        "see" | "sa" => "see",
        _ => "command",
    }
}

fn paren_balance(text: &str) -> i32 {
    text.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}
