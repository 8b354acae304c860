//! Diagnostics: documentation error reporting.
//!
//! Structural documentation errors, unresolved references and identity
//! collisions never abort a run. They are recorded here with the offending
//! file (and line, where known) and emitted through `tracing` at the matching
//! level, so a run with diagnostics still produces a usable model.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[serde(alias = "warn")]
    Warning,
    Info,
    Debug,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Debug => "debug",
        };
        f.write_str(text)
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file the offending comment or declaration came from (may be empty
    /// for diagnostics raised after all files were walked).
    pub file: Arc<str>,
    /// Line (1-indexed), when known.
    pub line: Option<u32>,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<&'static str>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(severity: Severity, file: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self {
            file: file.into(),
            line: None,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(file: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, file, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(file: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, file, message)
    }

    /// Create a new informational diagnostic.
    pub fn info(file: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Info, file, message)
    }

    /// Set the line for this diagnostic.
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)?;
        if !self.file.is_empty() {
            write!(f, "\n   in file {}", self.file)?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Error Code Ranges
///
/// - **E0001-E0019**: Structural documentation errors (malformed commands)
/// - **E0020-E0039**: Reference resolution failures
/// - **E0040-E0049**: Internal consistency errors
/// - **W0001-W0099**: Warnings
pub mod codes {
    // ========================================================================
    // STRUCTURAL ERRORS (E0001-E0019)
    // ========================================================================

    /// A command is missing a required argument (id, name, title).
    pub const MISSING_ARGUMENT: &str = "E0001";
    /// An id contains characters that cannot appear in a link target.
    pub const INVALID_ID: &str = "E0002";
    /// Group nesting would create a cycle.
    pub const GROUP_CYCLE: &str = "E0003";
    /// A command appears where it is not allowed.
    pub const MISPLACED_COMMAND: &str = "E0004";

    // ========================================================================
    // REFERENCE ERRORS (E0020-E0039)
    // ========================================================================

    /// `\ref` or `\see` target not found.
    pub const UNRESOLVED_REFERENCE: &str = "E0020";
    /// Out-of-line command names nothing that was declared.
    pub const UNRESOLVED_DECLARATION: &str = "E0021";
    /// `\relates` target not found or not class-like.
    pub const UNRESOLVED_RELATES: &str = "E0022";
    /// `\subpage` target not found.
    pub const UNRESOLVED_SUBPAGE: &str = "E0023";
    /// `\subpage` would re-parent a page or create a cycle.
    pub const SUBPAGE_CONFLICT: &str = "E0024";

    // ========================================================================
    // INTERNAL CONSISTENCY (E0040-E0049)
    // ========================================================================

    /// Two different symbols produced the same id.
    pub const ID_COLLISION: &str = "E0040";

    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// `\endgroup` or `\endname` without an open scope.
    pub const UNBALANCED_GROUP: &str = "W0001";
    /// Group or name scope left open at end of file.
    pub const UNTERMINATED_GROUP: &str = "W0002";
    /// An entity is assigned to two different groups.
    pub const GROUP_CONFLICT: &str = "W0003";
    /// Macro documented twice with different parameter lists.
    pub const MACRO_PARAMETERS: &str = "W0004";
    /// Out-of-line command kind does not match the declaration found.
    pub const KIND_MISMATCH: &str = "W0005";
    /// Front-end reported a warning for the translation unit.
    pub const FRONT_END_WARNING: &str = "W0006";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during a run and forwards them to `tracing`.
#[derive(Clone, Debug)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    /// Diagnostics less severe than this are collected but not logged.
    threshold: Severity,
}

impl Default for DiagnosticCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticCollector {
    /// Create a new empty collector that logs everything.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            threshold: Severity::Debug,
        }
    }

    /// Create a collector that only logs diagnostics at or above `threshold`.
    pub fn with_threshold(threshold: Severity) -> Self {
        Self {
            diagnostics: Vec::new(),
            threshold,
        }
    }

    /// Add a diagnostic and emit it.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity <= self.threshold {
            emit(&diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics carrying a given code.
    pub fn with_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.code == Some(code))
            .collect()
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

fn emit(diagnostic: &Diagnostic) {
    let file = diagnostic.file.as_ref();
    let line = diagnostic.line.unwrap_or(0);
    let code = diagnostic.code.unwrap_or("");
    let message = diagnostic.message.as_ref();
    match diagnostic.severity {
        Severity::Error => tracing::error!(file, line, code, "{message}"),
        Severity::Warning => tracing::warn!(file, line, code, "{message}"),
        Severity::Info => tracing::info!(file, line, code, "{message}"),
        Severity::Debug => tracing::debug!(file, line, code, "{message}"),
    }
}
