//! Error types for fatal conditions.
//!
//! Only failures that make the whole run meaningless end up here. Everything
//! else is a [`crate::diagnostics::Diagnostic`].

use std::path::PathBuf;

use thiserror::Error;

use crate::front_end::FrontEndError;

/// Errors that abort a documentation run.
#[derive(Debug, Error)]
pub enum DoxError {
    /// The front-end could not parse a file at all.
    #[error("Could not parse file {path}: {source}")]
    FrontEnd {
        path: PathBuf,
        #[source]
        source: FrontEndError,
    },

    /// The front-end parsed the file but reported errors.
    #[error("Could not generate documentation due to parser errors in {path} ({count} error(s))")]
    ParserErrors { path: PathBuf, count: usize },

    /// A required input was not provided.
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// The configuration text could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The document model could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while reading configuration or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DoxError {
    /// Create a front-end failure for `path`.
    pub fn front_end(path: impl Into<PathBuf>, source: FrontEndError) -> Self {
        Self::FrontEnd {
            path: path.into(),
            source,
        }
    }

    /// Create a missing input error.
    pub fn missing_input(what: impl Into<String>) -> Self {
        Self::MissingInput(what.into())
    }
}

/// Result alias for fatal errors.
pub type Result<T, E = DoxError> = std::result::Result<T, E>;
