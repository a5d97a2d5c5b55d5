//! Reads source text for comparison against generated output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliResult;

/// A UTF-8 text file loaded for comparison.
#[derive(Debug, Clone)]
pub struct SourceFileReader {
    path: PathBuf,
    content: String,
}

impl SourceFileReader {
    /// Read `path` as UTF-8.
    pub fn read(path: impl AsRef<Path>) -> CliResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    /// Wrap text that is already in memory.
    pub fn from_text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The text as read.
    pub fn to_source_code(&self) -> &str {
        &self.content
    }

    /// Whether `source` equals this file's text once each side has had every
    /// line trimmed and blank lines dropped.
    pub fn matches(&self, source: &str) -> bool {
        normalize(&self.content) == normalize(source)
    }
}

/// Trim each line, drop blank ones and join with `\n`.
///
/// Makes comparisons insensitive to indentation and line endings.
pub fn normalize(source: &str) -> String {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
