//! Comment Extractor: documentation comments and their text.
//!
//! Only documentation comments are recognized: `///` and `//!` line comments
//! (adjacent lines join into one block) and `/** */` or `/*! */` block
//! comments. A block either opens with a block command, and is handed to the
//! grouping engine or the deferred command queue, or documents the
//! declaration that follows it.

pub mod commands;
mod extract;
mod text;

pub use extract::{CommentBlock, CommentIndex, extract_comments};
pub use text::{OpeningCommand, add_doc, opening_command, separate_brief, split_first_word};
