//! Generator trait definition.
//!
//! This module defines the `Generator` trait every generator implements,
//! the `Marker` a generator is bound to, the `Artifact` it produces and the
//! configuration shared by all generators in a pass.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use convert_case::{Case, Casing};

use crate::diagnostics::DiagnosticSink;
use crate::error::{CliResult, ConfigError};
use crate::parser::Declaration;

/// Trait for generators.
///
/// A generator is bound to one declaration [`Marker`]. The pipeline asks it
/// whether a discovered declaration is in scope ([`Generator::filter`]) and,
/// if so, to produce zero or more artifacts for it. Generators do not know
/// about each other or about how declarations were discovered.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use resource_enum_cli::diagnostics::DiagnosticSink;
/// use resource_enum_cli::generator::{Artifact, Generator, GeneratorConfig, Marker};
/// use resource_enum_cli::parser::Declaration;
/// use resource_enum_cli::CliResult;
///
/// struct NoopGenerator {
///     marker: Marker,
/// }
///
/// impl Generator for NoopGenerator {
///     fn id(&self) -> &'static str { "noop" }
///     fn marker(&self) -> Option<&Marker> { Some(&self.marker) }
///     fn bind(&mut self, _sink: Arc<dyn DiagnosticSink>) {}
///
///     fn produce(&self, _declaration: &Declaration, _config: &GeneratorConfig) -> CliResult<Vec<Artifact>> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Generator: Send + Sync {
    /// Short identifier used in logs and errors (`"resource-enum"`).
    fn id(&self) -> &'static str;

    /// The declaration marker this generator is bound to.
    fn marker(&self) -> Option<&Marker>;

    /// Bind the diagnostic sink. Called once by the registry.
    fn bind(&mut self, sink: Arc<dyn DiagnosticSink>);

    /// Whether `declaration` carries this generator's marker.
    ///
    /// Fails with [`ConfigError::MissingMarker`] if the generator has no
    /// marker.
    fn filter(&self, declaration: &Declaration) -> Result<bool, ConfigError> {
        let marker = self
            .marker()
            .ok_or_else(|| ConfigError::missing_marker(self.id()))?;
        Ok(declaration.has_marker(marker.name()))
    }

    /// Produce the artifacts for a declaration accepted by [`Generator::filter`].
    ///
    /// Precondition failures are reported through the bound sink and yield an
    /// empty result. Errors abort the pass.
    fn produce(
        &self,
        declaration: &Declaration,
        config: &GeneratorConfig,
    ) -> CliResult<Vec<Artifact>>;
}

/// Name of a marker attribute, without path or brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Marker(String);

impl Marker {
    /// Create a marker from an attribute name.
    ///
    /// Path-qualified names keep their last segment:
    /// `resource_enum::target_resource` is `target_resource`.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ConfigError> {
        let name = name
            .as_ref()
            .rsplit("::")
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(Self(name.to_string()))
    }

    /// Marker for a name that is already a bare identifier.
    pub(crate) fn from_ident(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#[{}]", self.0)
    }
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Dot-separated package, empty for the output root.
    pub package: String,

    /// Name of the generated type.
    pub type_name: String,

    /// Generated source text.
    pub source: String,

    /// Name of the declaration the artifact was generated for.
    pub origin: String,
}

impl Artifact {
    /// File stem: the snake-cased type name.
    pub fn module_name(&self) -> String {
        self.type_name.to_case(Case::Snake)
    }

    /// Path relative to the output directory.
    ///
    /// Package `i18n.web` and type `Errors` give `i18n/web/errors.rs`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.rs", self.module_name()));
        path
    }

    /// Fully qualified type name (`i18n.web.Errors`).
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package, self.type_name)
        }
    }
}

/// Generator configuration options.
///
/// Controls the layout of generated source text.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Whether to generate documentation comments
    pub generate_docs: bool,

    /// Indentation style
    pub indent: IndentStyle,

    /// Line ending style
    pub line_ending: LineEnding,

    /// Path of the runtime crate referenced by generated code
    pub runtime_crate: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_docs: true,
            indent: IndentStyle::default(),
            line_ending: LineEnding::default(),
            runtime_crate: "resource_enum".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new generator config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to generate documentation comments.
    pub fn with_generate_docs(mut self, generate: bool) -> Self {
        self.generate_docs = generate;
        self
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Set the runtime crate path used in generated `use` items.
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Get the indentation string based on current settings.
    pub fn indent_str(&self) -> &str {
        self.indent.as_str()
    }

    /// Get the line ending string based on current settings.
    pub fn line_ending_str(&self) -> &str {
        self.line_ending.as_str()
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    /// Use 2 spaces for indentation
    Spaces2,

    /// Use 4 spaces for indentation (rustfmt default)
    #[default]
    Spaces4,

    /// Use tabs for indentation
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Create an indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}
