//! Error types for the CLI.
//!
//! This module defines all error types used throughout the CLI,
//! providing detailed error messages with context for debugging.

use std::path::PathBuf;
use thiserror::Error;

use resource_enum::BundleError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error during source file scanning.
    #[error("Failed to scan directory: {0}")]
    Scan(#[from] ScanError),

    /// Error during Rust source parsing.
    #[error("Failed to parse source file: {0}")]
    Parse(#[from] ParseError),

    /// Error during enum generation.
    #[error("Failed to generate enums: {0}")]
    Generate(#[from] GenerateError),

    /// A collaborator was set up without a mandatory input.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Validation failed (generated sources out of date).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during source file scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Directory does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// No Rust files found in directory.
    #[error("No Rust files found in: {path}")]
    NoRustFiles { path: PathBuf },

    /// Invalid filter pattern.
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error during scanning.
    #[error("IO error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from ignore crate walker.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Error during Rust source parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Syntax error in Rust source.
    #[error("Syntax error in {file}:{line}:{column}: {message}")]
    Syntax {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// IO error reading file.
    #[error("Failed to read {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error during enum generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The resource bundle could not be resolved.
    #[error("Resource bundle not found: {0}")]
    ResourceNotFound(#[source] BundleError),

    /// A member query was made on a declaration that has no members.
    #[error("'{name}' is a {kind}, not a module, impl block or trait")]
    InvalidDeclarationKind { name: String, kind: String },

    /// Two bundle keys map to the same enum variant.
    #[error("Keys '{first}' and '{second}' of '{base_name}' both map to variant '{member}'")]
    DuplicateMemberName {
        base_name: String,
        member: String,
        first: String,
        second: String,
    },

    /// The bundle exists but could not be read or parsed.
    #[error("Failed to load resource bundle: {0}")]
    Bundle(#[source] BundleError),
}

/// Error in configuration, either a collaborator's setup or the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A generator was constructed without its marker.
    #[error("Generator '{generator}' has no marker configured")]
    MissingMarker { generator: String },

    /// A marker name was empty.
    #[error("Marker name must not be empty")]
    EmptyMarker,

    /// A generator was used before being bound to a diagnostic sink.
    #[error("No diagnostic sink configured")]
    MissingDiagnosticSink,

    /// The synthesizer was given an empty resource base name.
    #[error("Resource base name must not be empty")]
    EmptyBaseName,

    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// `init` would overwrite an existing file.
    #[error("Configuration file already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading or writing config.
    #[error("Failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create a syntax error with location information.
    pub fn syntax(file: PathBuf, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            file,
            line,
            column,
            message: message.into(),
        }
    }
}

impl ScanError {
    /// Create a directory not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    /// Create a no Rust files error.
    pub fn no_rust_files(path: PathBuf) -> Self {
        Self::NoRustFiles { path }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl GenerateError {
    /// Whether this is the `ResourceNotFound` condition.
    pub fn is_resource_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound(_))
    }
}

impl ConfigError {
    /// Create a missing marker error.
    pub fn missing_marker(generator: impl Into<String>) -> Self {
        Self::MissingMarker {
            generator: generator.into(),
        }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<BundleError> for GenerateError {
    /// Only [`BundleError::NotFound`] is `ResourceNotFound`; unreadable or
    /// malformed files keep their own variant.
    fn from(error: BundleError) -> Self {
        if error.is_not_found() {
            Self::ResourceNotFound(error)
        } else {
            Self::Bundle(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_enum::Locale;

    #[test]
    fn test_bundle_error_maps_to_resource_not_found() {
        let error: GenerateError = BundleError::not_found("resource.gone", Locale::JAPAN).into();
        assert!(error.is_resource_not_found());
        assert!(error.to_string().contains("resource.gone"));
    }

    #[test]
    fn test_malformed_bundle_is_not_resource_not_found() {
        let error: GenerateError = BundleError::Parse {
            path: PathBuf::from("resource/message.properties"),
            line: 1,
            message: "malformed \\uXXXX escape".to_string(),
        }
        .into();
        assert!(!error.is_resource_not_found());
        assert!(matches!(error, GenerateError::Bundle(BundleError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_syntax_error_location() {
        let error = ParseError::syntax(PathBuf::from("a.rs"), 1, 2, "expected item");
        assert_eq!(error.to_string(), "Syntax error in a.rs:1:2: expected item");
    }

    #[test]
    fn test_layered_conversion() {
        let error: CliError = ConfigError::MissingDiagnosticSink.into();
        assert!(matches!(
            error,
            CliError::Config(ConfigError::MissingDiagnosticSink)
        ));
    }
}
