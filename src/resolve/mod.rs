//! Cross-Reference Resolver: the last pass over a complete model.
//!
//! Runs once every file has been walked and every deferred command applied.
//! Base classes and type references are linked to their entities, then all
//! documentation text is rewritten (see [`xref`]).

mod links;
mod lookup;
mod xref;


use crate::pipeline::BuildContext;

pub use lookup::{Lookup, ParsedName, parse_name};

/// Link types and rewrite documentation text.
pub fn resolve(ctx: &mut BuildContext) {
    links::link_bases(&mut ctx.model);
    links::link_types(&mut ctx.model);
    let anchors = xref::collect_anchors(&mut ctx.model);
    tracing::debug!(anchors = anchors.len(), "collected sections and anchors");
    xref::rewrite_all(&mut ctx.model, &anchors, &mut ctx.diagnostics);
}
