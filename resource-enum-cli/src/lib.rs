//! # resource-enum-cli
//!
//! CLI library for generating Rust enums from localized `.properties`
//! resource bundles.
//!
//! This crate provides the core functionality for the `resource-enum` CLI
//! tool: finding declarations marked `#[generate_resource_enum]`, turning
//! each bundle they name into an enum and writing the result.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`scanner`] - Source file discovery and filtering
//! - [`parser`] - Marked declaration discovery with `syn`
//! - [`declaration`] - Read-only declaration view and package naming
//! - [`generator`] - Generator contract, registry and the resource-enum generator
//! - [`synthesizer`] - Bundle to enumeration description
//! - [`emitter`] - Enumeration description to Rust source
//! - [`pipeline`] - One generation pass, from discovery to persistence
//! - [`writer`] - Artifact output, skipping unchanged files, and dry runs
//! - [`source_reader`] - Reading sources back for comparison
//! - [`diagnostics`] - Diagnostic sinks
//! - [`config`] - Configuration management and TOML parsing
//! - [`error`] - Error types and handling

pub mod config;
pub mod declaration;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod parser;
pub mod pipeline;
pub mod scanner;
pub mod source_reader;
pub mod synthesizer;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use diagnostics::{CollectingSink, DiagnosticSink, Severity, TracingSink};
pub use error::{CliError, CliResult};
pub use generator::{Artifact, Generator, GeneratorRegistry, ResourceEnumGenerator};
pub use parser::{Declaration, Discovery, RustParser};
pub use pipeline::{GenerationOutcome, GenerationPipeline};
pub use scanner::{SourceFile, SourceScanner};
pub use source_reader::SourceFileReader;
pub use synthesizer::{EnumerationDescription, ResourceEnumSynthesizer, ResourceKeyEntry};
pub use writer::ArtifactWriter;
