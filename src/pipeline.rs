//! Pipeline: one documentation run over the configured headers.
//!
//! For each header, in configuration order: parse it with the front-end,
//! record the header and its includes, scan its documentation comments for
//! grouping and deferred commands, then walk its declarations. Once every
//! file is done the deferred commands are processed and cross-references
//! resolved.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::info;

use crate::comment::{CommentBlock, CommentIndex, extract_comments, opening_command};
use crate::config::Config;
use crate::deferred::{self, DeferredCommand, is_deferred_command};
use crate::diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
use crate::error::{DoxError, Result};
use crate::front_end::{FrontEnd, FrontEndSeverity, ParseRequest, TranslationUnit};
use crate::group::GroupState;
use crate::identity::{IdentityResolver, header_id};
use crate::model::{DocumentModel, Header};
use crate::resolve;
use crate::walk;

/// Everything that accumulates during a run.
#[derive(Debug, Default)]
pub struct BuildContext {
    pub model: DocumentModel,
    pub identity: IdentityResolver,
    /// Commands waiting for every file to be walked.
    pub deferred: Vec<DeferredCommand>,
    pub diagnostics: DiagnosticCollector,
}

impl BuildContext {
    /// A context whose diagnostics are logged from `threshold` up.
    pub fn new(threshold: Severity) -> Self {
        Self {
            diagnostics: DiagnosticCollector::with_threshold(threshold),
            ..Self::default()
        }
    }
}

/// Per-file state while a header is processed.
#[derive(Debug)]
pub struct FileState {
    pub path: PathBuf,
    /// Canonical include name.
    pub name: Arc<str>,
    pub header_id: String,
    pub groups: GroupState,
    pub comments: CommentIndex,
}

impl FileState {
    pub fn new(path: impl Into<PathBuf>, name: &str) -> Self {
        let name: Arc<str> = Arc::from(name);
        Self {
            path: path.into(),
            header_id: header_id(&name),
            groups: GroupState::new(name.clone()),
            name,
            comments: CommentIndex::default(),
        }
    }
}

/// The finished model together with every diagnostic raised on the way.
#[derive(Debug)]
pub struct BuildOutput {
    pub model: DocumentModel,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }
}

/// A configured run over a front-end.
pub struct Pipeline<F> {
    config: Config,
    front_end: F,
}

impl<F: FrontEnd> Pipeline<F> {
    pub fn new(config: Config, front_end: F) -> Self {
        Self { config, front_end }
    }

    /// Process every configured header and return the document model.
    pub fn run(&self) -> Result<BuildOutput> {
        if self.config.input.header_files.is_empty() {
            return Err(DoxError::missing_input("input.header_files"));
        }
        let mut ctx = BuildContext::new(self.config.log.level);
        let mut seen = FxHashSet::default();
        for path in &self.config.input.header_files {
            if !seen.insert(path.clone()) {
                tracing::debug!(file = %path.display(), "skipping duplicate input");
                continue;
            }
            self.process_file(&mut ctx, path)?;
        }

        deferred::process(&mut ctx);
        resolve::resolve(&mut ctx);

        info!(
            entities = ctx.model.entities.len(),
            errors = ctx.diagnostics.error_count(),
            warnings = ctx.diagnostics.warning_count(),
            "Documentation model complete"
        );
        Ok(BuildOutput {
            model: ctx.model,
            diagnostics: ctx.diagnostics.take(),
        })
    }

    /// Run and write the model to the configured JSON file.
    pub fn run_to_file(&self) -> Result<BuildOutput> {
        let output = self.run()?;
        output
            .model
            .write_json(&self.config.json.filename, self.config.json.formatting)?;
        Ok(output)
    }

    fn process_file(&self, ctx: &mut BuildContext, path: &Path) -> Result<()> {
        info!("Processing {}", path.display());
        let request = ParseRequest {
            path: path.to_path_buf(),
            flags: self.config.clang.compiler_flags.clone(),
            include_dirs: self.config.clang.include_directories.clone(),
        };
        let unit = self
            .front_end
            .parse(&request)
            .map_err(|source| DoxError::front_end(path, source))?;

        let name = self.config.canonical_name(path);
        let mut file = FileState::new(path, &name);
        check_front_end_diagnostics(ctx, &file, &unit)?;
        record_header(ctx, &file, &unit);

        let blocks = extract_comments(&unit.tokens);
        scan_commands(ctx, &mut file, &blocks);
        file.comments = CommentIndex::new(&blocks);

        walk::walk(ctx, &file, &unit.decls);
        Ok(())
    }
}

fn check_front_end_diagnostics(ctx: &mut BuildContext, file: &FileState, unit: &TranslationUnit) -> Result<()> {
    let mut errors = 0;
    for diagnostic in &unit.diagnostics {
        match diagnostic.severity {
            FrontEndSeverity::Error | FrontEndSeverity::Fatal => {
                tracing::error!(file = %file.name, "{}", diagnostic.message);
                errors += 1;
            }
            FrontEndSeverity::Warning => ctx.diagnostics.add(
                Diagnostic::warning(file.name.clone(), diagnostic.message.clone())
                    .with_code(codes::FRONT_END_WARNING),
            ),
            FrontEndSeverity::Note => ctx
                .diagnostics
                .add(Diagnostic::info(file.name.clone(), diagnostic.message.clone())),
        }
    }
    if errors > 0 {
        return Err(DoxError::ParserErrors {
            path: file.path.clone(),
            count: errors,
        });
    }
    Ok(())
}

fn record_header(ctx: &mut BuildContext, file: &FileState, unit: &TranslationUnit) {
    let header = ctx
        .model
        .headers
        .entry(file.header_id.clone())
        .or_insert_with(|| Header::new(file.header_id.clone(), file.name.as_ref()));
    for include in unit.includes.iter().filter(|i| i.depth == 1) {
        let id = header_id(&include.name);
        if !header.includes.contains(&id) {
            header.includes.push(id);
        }
    }
}

/// Apply grouping commands in place and queue deferred ones.
fn scan_commands(ctx: &mut BuildContext, file: &mut FileState, blocks: &[CommentBlock]) {
    for block in blocks {
        let Some(command) = opening_command(&block.text) else {
            continue;
        };
        if file
            .groups
            .apply(&command, block.line, &mut ctx.model.groups, &mut ctx.diagnostics)
        {
            continue;
        }
        if command.name == "file" && command.args.is_empty() {
            deferred::document_header(&mut ctx.model, &file.header_id, &file.name, command.body);
            continue;
        }
        if is_deferred_command(command.name) {
            ctx.deferred.push(DeferredCommand {
                command: command.name.to_string(),
                args: command.args.to_string(),
                body: command.body.to_string(),
                file: file.name.clone(),
                header_id: file.header_id.clone(),
                line: block.line,
                active_group: file.groups.current().to_string(),
            });
        }
    }
    file.groups.finish(&mut ctx.diagnostics);
}
