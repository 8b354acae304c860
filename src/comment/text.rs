//! Helpers on cleaned documentation text.

use crate::base::constants::is_block_command;

/// Split documentation into `(brief, doc)`.
///
/// With a leading `\brief` (or `@brief`) the whole first paragraph is the
/// brief; otherwise only the first line is.
pub fn separate_brief(text: &str) -> (String, String) {
    let text = text.trim_start();
    let brief_command = ["\\brief", "@brief"]
        .iter()
        .find(|prefix| text.starts_with(*prefix));
    let (brief, doc) = match brief_command {
        Some(prefix) => {
            let (paragraph, rest) = split_once_or_all(text, "\n\n");
            (paragraph[prefix.len()..].to_string(), rest)
        }
        None => {
            let (line, rest) = split_once_or_all(text, "\n");
            (line.to_string(), rest)
        }
    };
    (collapse_lines(brief.trim()), doc.trim().to_string())
}

fn split_once_or_all<'a>(text: &'a str, separator: &str) -> (&'a str, &'a str) {
    text.split_once(separator).unwrap_or((text, ""))
}

/// A multi-line brief paragraph reads as one line.
fn collapse_lines(brief: &str) -> String {
    brief
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Add documentation to a record: the brief only if none is set yet, the doc
/// appended after a blank line.
pub fn add_doc(brief: &mut String, doc: &mut String, new_brief: &str, new_doc: &str) {
    if brief.is_empty() {
        *brief = new_brief.to_string();
    }
    if new_doc.is_empty() {
        return;
    }
    if doc.is_empty() {
        *doc = new_doc.to_string();
    } else {
        doc.push_str("\n\n");
        doc.push_str(new_doc);
    }
}

/// The command a documentation block opens with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningCommand<'a> {
    /// Command name without the `\` or `@`.
    pub name: &'a str,
    /// Whitespace-separated arguments on the command's line.
    pub args: &'a str,
    /// Everything after the command's line.
    pub body: &'a str,
}

/// Recognize a block that opens with a grouping or out-of-line command.
pub fn opening_command(text: &str) -> Option<OpeningCommand<'_>> {
    let text = text.trim_start();
    let rest = text.strip_prefix(['\\', '@'])?;
    let (first_line, body) = split_once_or_all(rest, "\n");
    let name_end = first_line
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(first_line.len());
    let name = &first_line[..name_end];
    if !is_block_command(name) {
        return None;
    }
    Some(OpeningCommand {
        name,
        args: first_line[name_end..].trim(),
        body,
    })
}

/// Split off the first whitespace-separated word.
pub fn split_first_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(index) => (&text[..index], text[index..].trim_start()),
        None => (text, ""),
    }
}
