//! End-to-end pipeline tests
//!
//! Headers are tokenized by the test helpers and served through the
//! in-memory front-end:
//! - Group assignment across files
//! - Merging of redeclarations
//! - Scope-aware references and overloads
//! - Deferred documentation and pages
//! - JSON output

pub mod tests_end_to_end;
pub mod tests_grouping;
pub mod tests_json;
pub mod tests_references;
