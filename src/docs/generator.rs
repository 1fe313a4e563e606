//! Documentation Generator
//!
//! Walks the workspace one file at a time, analyzes and summarizes each file,
//! and writes a markdown page into a mirrored tree under the output directory.
//!
//! Failures are isolated per file:
//! - unreadable file: a failure page replaces the normal one
//! - unwritable page: a warning is reported and the batch moves on
//!
//! Nothing is retried and a started batch runs to completion.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::markdown::{FileDoc, RenderOptions, render_failure_doc, render_file_doc};
use crate::ai::Summarizer;
use crate::analyzer::scanner::{FileScanner, ScannedFile};
use crate::analyzer::{DependencyExtractor, StructureExtractor};
use crate::cli::progress::{MessageLevel, ProgressTracker};
use crate::config::{Config, ScanConfig};
use crate::constants::output::DOC_SUFFIX;
use crate::types::{DocsmithError, Result};

pub const NO_FILES_MESSAGE: &str = "No code files found for documentation.";

/// Outcome of one generation run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    /// Eligible files found
    pub total: usize,
    /// Normal pages written
    pub documented: usize,
    /// Files replaced by a failure page
    pub failed: usize,
    /// Pages that could not be written
    pub write_failures: usize,
    /// Absolute output directory
    pub output_dir: PathBuf,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.write_failures == 0
    }
}

pub struct DocGenerator {
    root: PathBuf,
    output_dir: PathBuf,
    scan: ScanConfig,
    render: RenderOptions,
    summarizer: Arc<dyn Summarizer>,
    structure: StructureExtractor,
    dependencies: DependencyExtractor,
}

impl DocGenerator {
    pub fn new<P: AsRef<Path>>(root: P, config: &Config, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            output_dir: config.output.dir.clone(),
            scan: config.scan.clone(),
            render: RenderOptions::from(&config.output),
            summarizer,
            structure: StructureExtractor::new(),
            dependencies: DependencyExtractor::new(),
        }
    }

    /// Absolute documentation root
    pub fn output_root(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    /// Eligible files in processing order, without touching anything
    pub fn plan(&self) -> Result<Vec<ScannedFile>> {
        self.check_workspace()?;
        self.scanner().scan()
    }

    /// Document every eligible file in the workspace
    pub async fn run(&self, progress: &ProgressTracker) -> Result<GenerationReport> {
        let files = self.plan()?;

        if files.is_empty() {
            info!("{}", NO_FILES_MESSAGE);
            progress.message(MessageLevel::Warning, NO_FILES_MESSAGE);
            return Ok(GenerationReport {
                output_dir: self.output_root(),
                ..Default::default()
            });
        }

        Ok(self.process_files(&files, progress).await)
    }

    /// Sequential per-file loop; never aborts on a single file's failure
    pub async fn process_files(
        &self,
        files: &[ScannedFile],
        progress: &ProgressTracker,
    ) -> GenerationReport {
        let output_root = self.output_root();
        let total = files.len();
        let mut report = GenerationReport {
            total,
            output_dir: output_root.clone(),
            ..Default::default()
        };

        info!(
            "Documenting {} files into {} (summarizer: {})",
            total,
            output_root.display(),
            self.summarizer.describe()
        );
        progress.start(total);

        for (idx, file) in files.iter().enumerate() {
            progress.update_progress(idx + 1, &file.relative_path);
            debug!("Processing {}/{}: {}", idx + 1, total, file.relative_path);

            let (page, is_failure) = match self.document_file(file).await {
                Ok(page) => (page, false),
                Err(e) => {
                    warn!("Failed to document {}: {}", file.relative_path, e);
                    progress.report_error(&file.relative_path, &e.to_string());
                    (render_failure_doc(&e.to_string()), true)
                }
            };

            let target = doc_path_for(&output_root, &file.relative_path);
            match write_page(&target, &page).await {
                Ok(()) if is_failure => report.failed += 1,
                Ok(()) => report.documented += 1,
                Err(e) => {
                    warn!("Failed to write {}: {}", target.display(), e);
                    progress.report_error(
                        &file.relative_path,
                        &format!("Failed to write {}: {}", target.display(), e),
                    );
                    if is_failure {
                        report.failed += 1;
                    }
                    report.write_failures += 1;
                }
            }
        }

        let summary = format!("Generated docs for {} files", total);
        info!(
            documented = report.documented,
            failed = report.failed,
            write_failures = report.write_failures,
            "{}",
            summary
        );
        progress.finish(report.is_clean(), &summary);

        report
    }

    /// Read, analyze, summarize and render one file
    async fn document_file(&self, file: &ScannedFile) -> Result<String> {
        let bytes = tokio::fs::read(&file.path).await?;
        let metadata = tokio::fs::metadata(&file.path).await?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let structure = self.structure.analyze(&content);
        let dependencies = self.dependencies.extract(&content);
        let summary = self.summarizer.summarize(&content).await;

        let modified = metadata
            .modified()
            .map(format_timestamp)
            .unwrap_or_else(|_| "unknown".to_string());

        let doc = FileDoc {
            relative_path: file.relative_path.clone(),
            extension: file.extension.clone(),
            size: bytes.len() as u64,
            modified,
            structure,
            dependencies,
            summary,
            content,
        };

        Ok(render_file_doc(&doc, &self.render))
    }

    fn check_workspace(&self) -> Result<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(DocsmithError::WorkspaceNotFound(self.root.clone()))
        }
    }

    fn scanner(&self) -> FileScanner {
        let mut exclude = self.scan.binary_patterns.clone();
        if let Some(pattern) = output_exclusion(&self.output_dir) {
            exclude.push(pattern);
        }

        FileScanner::new(&self.root)
            .with_extensions(self.scan.extensions.clone())
            .with_ignore_patterns(self.scan.ignore_patterns.clone())
            .with_exclude_patterns(exclude)
            .with_max_file_size(self.scan.max_file_size)
            .respect_gitignore(self.scan.respect_gitignore)
    }
}

/// `<output_root>/<relative>.md`
pub fn doc_path_for(output_root: &Path, relative: &str) -> PathBuf {
    let mut path = output_root.to_path_buf();
    let mut parts = relative.split('/').filter(|p| !p.is_empty()).peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_some() {
            path.push(part);
        } else {
            path.push(format!("{}{}", part, DOC_SUFFIX));
        }
    }
    path
}

/// Glob excluding the output directory from scans
fn output_exclusion(output_dir: &Path) -> Option<String> {
    let parts: Vec<String> = output_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(glob::Pattern::escape(&part.to_string_lossy())),
            _ => None,
        })
        .collect();

    (!parts.is_empty()).then(|| format!("{}/**", parts.join("/")))
}

fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

async fn write_page(target: &Path, page: &str) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(target, page).await
}
