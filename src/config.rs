//! Run configuration.
//!
//! The configuration mirrors the sections of a `doxpp.toml` file:
//!
//! ```toml
//! [input]
//! root_directory = "include"
//! header_files = ["include/lib/a.h", "include/lib/b.h"]
//!
//! [clang]
//! compiler_flags = ["-std=c++17"]
//! include_directories = ["third_party"]
//!
//! [log]
//! level = "warning"
//!
//! [json]
//! filename = "doxpp.json"
//! formatting = "readable"
//! ```
//!
//! Locating the file (and expanding globs) is left to the caller.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostics::Severity;
use crate::error::Result;

/// Default output file name.
const DEFAULT_OUTPUT: &str = "doxpp.json";

/// Input files and the directory include paths are relative to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// The include path recorded for each header is relative to this.
    pub root_directory: PathBuf,
    /// Headers to process, in order.
    pub header_files: Vec<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            root_directory: PathBuf::from("."),
            header_files: Vec::new(),
        }
    }
}

/// Flags forwarded to the C++ front-end.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClangConfig {
    pub compiler_flags: Vec<String>,
    pub include_directories: Vec<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Diagnostics less severe than this are collected but not logged.
    pub level: Severity,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Severity::Warning,
        }
    }
}

/// JSON layout of the written document model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonFormatting {
    #[default]
    Compact,
    Readable,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub filename: PathBuf,
    pub formatting: JsonFormatting,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_OUTPUT),
            formatting: JsonFormatting::Compact,
        }
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub clang: ClangConfig,
    pub log: LogConfig,
    pub json: JsonConfig,
}

impl Config {
    /// Parse a configuration from TOML text. Missing sections take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The name a header is `#include`d by: its path relative to the root
    /// directory, with `/` separators.
    pub fn canonical_name(&self, path: &Path) -> String {
        let relative = path
            .strip_prefix(&self.input.root_directory)
            .unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
