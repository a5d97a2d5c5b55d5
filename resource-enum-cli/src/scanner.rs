//! Source file scanner for discovering Rust files.
//!
//! This module provides functionality to recursively scan directories
//! for Rust source files, respecting `.gitignore` patterns and custom filters.
//! Every file also gets the module path it declares, which becomes the
//! package of the declarations found in it.

use crate::error::{CliResult, ScanError};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};

/// File stems that name their parent module rather than a child.
const MODULE_ROOTS: [&str; 3] = ["lib", "main", "mod"];

/// A discovered source file with its content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path to the file.
    pub path: PathBuf,

    /// Path relative to the scan root.
    pub relative_path: PathBuf,

    /// Dot-separated module path of the file (`app.i18n`), empty at the root.
    pub module_path: String,

    /// File content.
    pub content: String,
}

/// Scanner for discovering Rust source files.
#[derive(Debug)]
pub struct SourceScanner {
    /// Root directory to scan.
    root: PathBuf,

    /// Whether to respect .gitignore files.
    respect_gitignore: bool,

    /// Optional glob filter pattern.
    filter: Option<glob::Pattern>,
}

impl SourceScanner {
    /// Create a new scanner for the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_gitignore: true,
            filter: None,
        }
    }

    /// Set whether to respect .gitignore files.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Set a glob filter pattern for files.
    ///
    /// Only files matching the pattern will be included.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let glob_pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(glob_pattern);
        Ok(self)
    }

    /// Scan the directory and return all discovered Rust files, sorted by path.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.exists() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .hidden(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if path.extension().map_or(true, |ext| ext != "rs") {
                continue;
            }

            let relative = self.relative_path(path);
            if let Some(ref pattern) = self.filter {
                if !pattern.matches_path(&relative) {
                    continue;
                }
            }

            let content = std::fs::read_to_string(path).map_err(|e| ScanError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

            tracing::trace!(path = %relative.display(), "found source file");
            files.push(SourceFile {
                path: path.to_path_buf(),
                module_path: module_path(&relative),
                relative_path: relative,
                content,
            });
        }

        if files.is_empty() {
            return Err(ScanError::no_rust_files(self.root.clone()).into());
        }

        Ok(files)
    }

    /// Scan without failing on empty results.
    ///
    /// Returns an empty vector if no files are found.
    pub fn scan_allow_empty(&self) -> CliResult<Vec<SourceFile>> {
        match self.scan() {
            Ok(files) => Ok(files),
            Err(crate::error::CliError::Scan(ScanError::NoRustFiles { .. })) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Get the relative path from root.
    fn relative_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root).unwrap_or(path).to_path_buf()
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Module path declared by a file at `relative` under the source root.
///
/// `app/i18n.rs` and `app/i18n/mod.rs` are both `app.i18n`; `lib.rs` and
/// `main.rs` are the root. Hyphens become underscores.
pub fn module_path(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().replace('-', "_")),
            _ => None,
        })
        .collect();

    if let Some(stem) = relative.file_stem().map(|stem| stem.to_string_lossy()) {
        let is_root = MODULE_ROOTS.contains(&stem.as_ref());
        if !is_root {
            segments.push(stem.replace('-', "_"));
        }
    }

    segments.join(".")
}
