//! A front-end backed by pre-built translation units.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::{FrontEnd, FrontEndError, ParseRequest, TranslationUnit};

/// Serves translation units registered ahead of time, keyed by path.
///
/// Used by tests and by tools that obtain declarations from a cache.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFrontEnd {
    units: FxHashMap<PathBuf, TranslationUnit>,
}

impl InMemoryFrontEnd {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, unit: TranslationUnit) {
        self.units.insert(path.into(), unit);
    }

    pub fn with_unit(mut self, path: impl Into<PathBuf>, unit: TranslationUnit) -> Self {
        self.insert(path, unit);
        self
    }
}

impl FrontEnd for InMemoryFrontEnd {
    fn parse(&self, request: &ParseRequest) -> Result<TranslationUnit, FrontEndError> {
        self.units
            .get(&request.path)
            .cloned()
            .ok_or_else(|| FrontEndError::NotFound(request.path.clone()))
    }
}
