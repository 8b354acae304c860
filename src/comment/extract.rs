//! Documentation comment blocks from a file's token stream.

use rustc_hash::FxHashMap;

use super::text::opening_command;
use crate::base::{Extent, Position};
use crate::front_end::Token;

/// A cleaned documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub text: String,
    /// Line the block starts on.
    pub line: u32,
    /// Start of the first non-comment token after the block.
    pub next_token: Option<Position>,
    /// `///<` and `/**<` comments document the declaration on their own line.
    pub trailing: bool,
}

impl CommentBlock {
    fn new(lines: Vec<String>, line: u32, trailing: bool) -> Option<Self> {
        let text = join_trimmed(lines);
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text,
            line,
            next_token: None,
            trailing,
        })
    }

    /// True if the block opens with a grouping or out-of-line command.
    pub fn is_command(&self) -> bool {
        opening_command(&self.text).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentStyle {
    Line { trailing: bool },
    Block { trailing: bool },
    /// Not a documentation comment.
    Plain,
}

fn classify(spelling: &str) -> CommentStyle {
    let trailing = spelling.as_bytes().get(3) == Some(&b'<');
    if spelling.starts_with("////") || spelling.starts_with("/***") || spelling == "/**/" {
        CommentStyle::Plain
    } else if spelling.starts_with("///") || spelling.starts_with("//!") {
        CommentStyle::Line { trailing }
    } else if spelling.starts_with("/**") || spelling.starts_with("/*!") {
        CommentStyle::Block { trailing }
    } else {
        CommentStyle::Plain
    }
}

/// Strip `///` or `//!`, an optional `<` and one space.
fn clean_line_comment(spelling: &str) -> String {
    let line = spelling.get(3..).unwrap_or_default();
    let line = line.strip_prefix('<').unwrap_or(line);
    let line = line.strip_prefix(' ').unwrap_or(line);
    line.trim_end().to_string()
}

/// Strip the markers of a `/** ... */` comment and its common indentation.
fn clean_block_comment(spelling: &str) -> Vec<String> {
    let body = spelling.get(3..).unwrap_or_default();
    let body = body.strip_prefix('<').unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    let mut lines = body.lines();
    let mut cleaned = vec![lines.next().unwrap_or_default().trim().to_string()];
    let rest: Vec<&str> = lines.collect();

    let is_decoration = |line: &str| line.chars().all(|c| c.is_whitespace() || c == '*');
    let content = rest.iter().copied().filter(|line| !is_decoration(line));
    let prefix = match (content.clone().min(), content.max()) {
        (Some(min), Some(max)) => common_prefix(min, max),
        _ => "",
    };
    let prefix = &prefix[..prefix
        .find(|c: char| !matches!(c, ' ' | '\t' | '*'))
        .unwrap_or(prefix.len())];
    let strip = !prefix.is_empty();

    for line in rest {
        if is_decoration(line) {
            cleaned.push(String::new());
        } else if strip {
            cleaned.push(line.strip_prefix(prefix).unwrap_or(line).trim_end().to_string());
        } else {
            cleaned.push(line.trim_end().to_string());
        }
    }
    cleaned
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((index, _), _)| index)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..len]
}

/// Join lines, dropping leading and trailing blank lines.
fn join_trimmed(lines: Vec<String>) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// A run of adjacent single-line documentation comments.
struct LineRun {
    lines: Vec<String>,
    start_line: u32,
    last_line: u32,
}

/// Collect the documentation comment blocks of one file, in source order.
pub fn extract_comments(tokens: &[Token]) -> Vec<CommentBlock> {
    let mut blocks: Vec<CommentBlock> = Vec::new();
    let mut run: Option<LineRun> = None;
    // Blocks still waiting for the token that follows them.
    let mut waiting = 0;

    let close = |run: &mut Option<LineRun>, blocks: &mut Vec<CommentBlock>| {
        if let Some(run) = run.take() {
            blocks.extend(CommentBlock::new(run.lines, run.start_line, false));
        }
    };

    for token in tokens {
        if !token.is_comment() {
            close(&mut run, &mut blocks);
            for block in blocks[waiting..].iter_mut().filter(|b| !b.trailing) {
                block.next_token = Some(token.extent.start);
            }
            waiting = blocks.len();
            continue;
        }

        let spelling = token.spelling.trim();
        let line = token.extent.start.line;
        match classify(spelling) {
            CommentStyle::Line { trailing: true } => {
                close(&mut run, &mut blocks);
                blocks.extend(CommentBlock::new(vec![clean_line_comment(spelling)], line, true));
            }
            CommentStyle::Line { trailing: false } => match run.as_mut() {
                Some(open) if line == open.last_line + 1 => {
                    open.lines.push(clean_line_comment(spelling));
                    open.last_line = token.extent.end.line;
                }
                _ => {
                    close(&mut run, &mut blocks);
                    run = Some(LineRun {
                        lines: vec![clean_line_comment(spelling)],
                        start_line: line,
                        last_line: token.extent.end.line,
                    });
                }
            },
            CommentStyle::Block { trailing } => {
                close(&mut run, &mut blocks);
                blocks.extend(CommentBlock::new(clean_block_comment(spelling), line, trailing));
            }
            CommentStyle::Plain => close(&mut run, &mut blocks),
        }
    }
    close(&mut run, &mut blocks);
    blocks
}

/// Lookup of the comment documenting a declaration.
#[derive(Debug, Default)]
pub struct CommentIndex {
    /// Nearest block preceding each token position.
    preceding: FxHashMap<Position, CommentBlock>,
    /// Trailing blocks by line.
    trailing: FxHashMap<u32, CommentBlock>,
}

impl CommentIndex {
    pub fn new(blocks: &[CommentBlock]) -> Self {
        let mut index = Self::default();
        for block in blocks {
            if block.trailing {
                index.trailing.entry(block.line).or_insert_with(|| block.clone());
            } else if let Some(position) = block.next_token {
                // Later blocks are nearer to the declaration.
                index.preceding.insert(position, block.clone());
            }
        }
        index
    }

    /// Documentation text for a declaration starting at `extent.start`.
    ///
    /// A preceding block that opens with a block command belongs to the
    /// grouping engine or the deferred commands, never to the declaration.
    pub fn documentation(&self, extent: &Extent) -> Option<&str> {
        match self.preceding.get(&extent.start) {
            Some(block) if block.is_command() => None,
            Some(block) => Some(&block.text),
            None => self
                .trailing
                .get(&extent.start.line)
                .map(|block| block.text.as_str()),
        }
    }
}
