//! Error types for bundle resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Error raised while locating, reading or querying a resource bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// No bundle file exists for the base name under any candidate locale.
    #[error("Can't find bundle for base name {base_name}, locale {locale}")]
    NotFound { base_name: String, locale: String },

    /// The bundle was found but does not define the key.
    #[error("Can't find resource for bundle {base_name}, key {key}")]
    MissingKey { base_name: String, key: String },

    /// A bundle file could not be read.
    #[error("Failed to read bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bundle file is not valid `.properties` text.
    #[error("Malformed bundle {path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl BundleError {
    /// Create a not found error.
    pub fn not_found(base_name: impl Into<String>, locale: impl ToString) -> Self {
        Self::NotFound {
            base_name: base_name.into(),
            locale: locale.to_string(),
        }
    }

    /// Create a missing key error.
    pub fn missing_key(base_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            base_name: base_name.into(),
            key: key.into(),
        }
    }

    /// Check whether this error means the bundle itself could not be resolved.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BundleError::NotFound { .. })
    }
}
