use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::patterns::IgnoreMatcher;
use crate::constants::scan::{BINARY_EXCLUDE_PATTERN, CODE_FILE_EXTENSIONS, DEFAULT_IGNORE_PATTERN};
use crate::types::Result;

pub struct FileScanner {
    root: PathBuf,
    extensions: Vec<String>,
    ignore: Vec<String>,
    exclude: Vec<String>,
    max_file_size: Option<u64>,
    respect_gitignore: bool,
}

impl FileScanner {
    /// Create a scanner with the default extension allow-list and ignore globs
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: CODE_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ignore: vec![DEFAULT_IGNORE_PATTERN.to_string()],
            exclude: vec![BINARY_EXCLUDE_PATTERN.to_string()],
            max_file_size: None,
            respect_gitignore: false,
        }
    }

    /// Replace the extension allow-list (matched case-insensitively)
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Replace the user-configurable ignore globs
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore = patterns;
        self
    }

    /// Replace the fixed exclusion globs (binary files, output directory)
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn with_max_file_size(mut self, size: Option<u64>) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn respect_gitignore(mut self, enabled: bool) -> Self {
        self.respect_gitignore = enabled;
        self
    }

    /// Collect eligible files, sorted by relative path
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let mut raw = self.ignore.clone();
        raw.extend(self.exclude.iter().cloned());
        let matcher = IgnoreMatcher::new(&raw)?;

        let prune = matcher.clone();
        let prune_root = self.root.clone();

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .ignore(false)
            .parents(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                if !entry.file_type().is_some_and(|t| t.is_dir()) {
                    return true;
                }
                match relative_slash_path(&prune_root, entry.path()) {
                    Some(relative) => !prune.excludes_dir(&relative),
                    None => true,
                }
            })
            .build();

        let mut files = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Some(relative_path) = relative_slash_path(&self.root, path) else {
                continue;
            };

            if matcher.is_match(&relative_path) {
                continue;
            }

            let Some(extension) = self.allowed_extension(path) else {
                continue;
            };

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    debug!("Skipping {}: {}", relative_path, e);
                    continue;
                }
            };

            if let Some(max) = self.max_file_size
                && metadata.len() > max
            {
                debug!("Skipping {} ({} bytes > {})", relative_path, metadata.len(), max);
                continue;
            }

            files.push(ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size: metadata.len(),
                extension,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(files)
    }

    #[cfg(test)]
    fn paths(&self) -> Result<Vec<String>> {
        Ok(self
            .scan()?
            .into_iter()
            .map(|f| f.relative_path)
            .collect())
    }

    /// Original-case extension when its lowercase form is allow-listed
    fn allowed_extension(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;
        let lower = ext.to_lowercase();
        self.extensions
            .iter()
            .any(|allowed| *allowed == lower)
            .then(|| ext.to_string())
    }
}

/// `/`-separated path of `path` relative to `root`
fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated
    pub relative_path: String,
    pub size: u64,
    /// Extension as it appears on disk
    pub extension: String,
}
