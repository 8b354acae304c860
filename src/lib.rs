//! # doxpp-core
//!
//! Turns the declarations and documentation comments of C++ headers into a
//! serializable document model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → One run over the configured headers
//!   ↓
//! resolve   → \ref, \see, \relates, \subpage, sections; type and base links
//!   ↓
//! deferred  → \macro, \page, \mainpage, \file, out-of-line \class/\fn/...
//!   ↓
//! walk      → Declaration tree → entities
//!   ↓
//! identity  → Stable ids, re-declaration merging, ghost parents
//!   ↓
//! group     → \defgroup/\addtogroup/\endgroup scopes, \name member groups
//!   ↓
//! comment   → Documentation comment extraction, brief/doc split, commands
//!   ↓
//! model     → Entities, headers, groups, pages; JSON output
//!   ↓
//! front_end → Interface to the C++ parser
//!   ↓
//! base      → Positions, id validation, command tables
//! ```

// ============================================================================
// MODULES (dependency order: base → front_end → model → comment → ... → pipeline)
// ============================================================================

/// Foundation types: Position, Extent, id validation
pub mod base;

/// Front-end interface: translation units, declarations, tokens
pub mod front_end;

/// Document model: entities, headers, groups, pages
pub mod model;

/// Documentation comments and their commands
pub mod comment;

/// Group scopes and member groups
pub mod group;

/// Entity ids and merging of re-declarations
pub mod identity;

/// Declaration walker
pub mod walk;

/// Commands processed after every file has been walked
pub mod deferred;

/// Cross-reference resolution
pub mod resolve;

/// Run orchestration
pub mod pipeline;

pub mod config;
pub mod diagnostics;
pub mod error;

// Re-export the entry points
pub use config::Config;
pub use diagnostics::{Diagnostic, Severity};
pub use error::{DoxError, Result};
pub use model::DocumentModel;
pub use pipeline::{BuildOutput, Pipeline};
