//! Persisting generated artifacts.
//!
//! An artifact for `app.messages.Message` lands at
//! `<output>/app/messages/message.rs`. A file whose content already equals the
//! generated source is left alone, so its timestamp only moves when the enum
//! actually changes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::WriteError;
use crate::generator::Artifact;

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    Written { path: PathBuf, bytes: usize },
    /// The file on disk already held this source.
    Unchanged { path: PathBuf },
    /// Dry run; `source` is what would have been written.
    DryRun { path: PathBuf, source: String },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written { path, .. } | Self::Unchanged { path } | Self::DryRun { path, .. } => {
                path
            }
        }
    }

    /// Whether the file on disk was created or replaced.
    pub fn was_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Writes artifacts below one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    dry_run: bool,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run: false,
        }
    }

    /// Report what would be written without touching the file system.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where `artifact` is written.
    pub fn target(&self, artifact: &Artifact) -> PathBuf {
        self.output_dir.join(artifact.relative_path())
    }

    /// Write `artifact`, creating its package directories as needed.
    pub fn write(&self, artifact: &Artifact) -> Result<WriteResult, WriteError> {
        let path = self.target(artifact);
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                path,
                source: artifact.source.clone(),
            });
        }

        if fs::read_to_string(&path).is_ok_and(|existing| existing == artifact.source) {
            tracing::debug!(path = %path.display(), "generated source unchanged");
            return Ok(WriteResult::Unchanged { path });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &artifact.source).map_err(|source| WriteError::WriteFile {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            artifact = %artifact.qualified_name(),
            "wrote generated source"
        );
        Ok(WriteResult::Written {
            path,
            bytes: artifact.source.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCE: &str = "pub enum Message { A }\n";

    fn artifact(package: &str, source: &str) -> Artifact {
        Artifact {
            package: package.to_string(),
            type_name: "Message".to_string(),
            source: source.to_string(),
            origin: "app".to_string(),
        }
    }

    #[test]
    fn test_write_creates_package_directories() {
        let dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        let result = writer.write(&artifact("app.messages", SOURCE)).unwrap();

        let expected = dir.path().join("app/messages/message.rs");
        assert_eq!(
            result,
            WriteResult::Written {
                path: expected.clone(),
                bytes: SOURCE.len()
            }
        );
        assert_eq!(fs::read_to_string(expected).unwrap(), SOURCE);
    }

    #[test]
    fn test_identical_source_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(dir.path());
        writer.write(&artifact("", SOURCE)).unwrap();

        let again = writer.write(&artifact("", SOURCE)).unwrap();
        let changed = writer.write(&artifact("", "pub enum Message { B }\n")).unwrap();

        assert!(matches!(again, WriteResult::Unchanged { .. }));
        assert!(changed.was_written());
        assert_eq!(
            fs::read_to_string(dir.path().join("message.rs")).unwrap(),
            "pub enum Message { B }\n"
        );
    }

    #[test]
    fn test_dry_run_returns_source() {
        let dir = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(dir.path()).with_dry_run(true);

        let result = writer.write(&artifact("app", SOURCE)).unwrap();

        assert!(!result.was_written());
        assert_eq!(result.path(), dir.path().join("app/message.rs").as_path());
        assert!(matches!(result, WriteResult::DryRun { source, .. } if source == SOURCE));
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_blocked_directory_is_create_dir_error() {
        let dir = TempDir::new().unwrap();
        // A file where the package directory belongs.
        fs::write(dir.path().join("app"), "").unwrap();

        let result = ArtifactWriter::new(dir.path()).write(&artifact("app", SOURCE));

        assert!(matches!(result, Err(WriteError::CreateDir { .. })));
    }
}
