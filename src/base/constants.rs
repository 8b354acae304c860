//! The embedded documentation command surface.
//!
//! Commands are case-sensitive and may be written with a `\` or `@` prefix.

/// Commands that, when they open a comment block, detach the block from the
/// next declaration.
pub const BLOCK_COMMANDS: &[&str] = &[
    "addtogroup",
    "alias",
    "class",
    "def",
    "defgroup",
    "endgroup",
    "endname",
    "enum",
    "file",
    "fn",
    "function",
    "macro",
    "mainpage",
    "name",
    "namespace",
    "page",
    "struct",
    "typedef",
    "union",
    "var",
    "variable",
];

/// Out-of-line commands that document an existing declaration by name.
pub const OUT_OF_LINE_COMMANDS: &[&str] = &[
    "alias",
    "class",
    "enum",
    "fn",
    "function",
    "namespace",
    "struct",
    "typedef",
    "union",
    "var",
    "variable",
];

/// Id of the page created by `\mainpage`.
pub const MAIN_PAGE_ID: &str = "index";

/// Separator between C++ scopes.
pub const SCOPE_SEPARATOR: &str = "::";

/// Returns true if `command` (without prefix) opens a detached block.
pub fn is_block_command(command: &str) -> bool {
    BLOCK_COMMANDS.contains(&command)
}

/// Returns true if `command` (without prefix) documents a declaration out of line.
pub fn is_out_of_line_command(command: &str) -> bool {
    OUT_OF_LINE_COMMANDS.contains(&command)
}
