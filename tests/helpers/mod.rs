//! Shared fixtures for the integration tests.

#![allow(dead_code)]

pub mod decls;
pub mod source;

use doxpp::config::Config;
use doxpp::front_end::{Decl, InMemoryFrontEnd};
use doxpp::pipeline::{BuildOutput, Pipeline};

use source::Source;

/// Run the pipeline over `files`, in order.
pub fn build(files: Vec<(Source, Vec<Decl>)>) -> BuildOutput {
    let mut config = Config::default();
    let mut front_end = InMemoryFrontEnd::new();
    for (source, decls) in files {
        config.input.header_files.push(source.path.into());
        front_end.insert(source.path, source.unit(decls));
    }
    Pipeline::new(config, front_end)
        .run()
        .expect("pipeline run failed")
}

/// Messages of diagnostics carrying `code`.
pub fn messages(output: &BuildOutput, code: &str) -> Vec<String> {
    output
        .diagnostics
        .iter()
        .filter(|d| d.code == Some(code))
        .map(|d| d.message.to_string())
        .collect()
}
