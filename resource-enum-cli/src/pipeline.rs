//! One generation pass: discovery, dispatch and persistence.
//!
//! The pipeline walks discovered declarations marker by marker, asks every
//! registered generator whether it claims each one, and concatenates what the
//! claiming generators produce. Writing the result is a separate step so the
//! caller can inspect, compare or discard artifacts first.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::io::Write;

use crate::diagnostics::Severity;
use crate::error::{CliResult, ParseError};
use crate::generator::{Artifact, GeneratorConfig, GeneratorRegistry};
use crate::parser::{Discovery, RustParser};
use crate::scanner::SourceScanner;
use crate::writer::{ArtifactWriter, WriteResult};

/// Everything one scan-and-generate pass found.
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    /// Artifacts in emission order.
    pub artifacts: Vec<Artifact>,
    /// Files that could not be parsed. They contribute no declarations.
    pub parse_errors: Vec<ParseError>,
    pub files: usize,
    pub declarations: usize,
}

/// Dispatches discovered declarations to registered generators.
#[derive(Debug)]
pub struct GenerationPipeline {
    registry: GeneratorRegistry,
    config: GeneratorConfig,
    echo: bool,
}

impl GenerationPipeline {
    pub fn new(registry: GeneratorRegistry, config: GeneratorConfig) -> Self {
        Self {
            registry,
            config,
            echo: false,
        }
    }

    /// Echo each generated source while persisting it.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Parser looking for every registered generator's marker.
    pub fn parser(&self) -> RustParser {
        RustParser::new(self.registry.markers())
    }

    /// Produce artifacts for every discovered declaration.
    ///
    /// Declarations are visited per registered marker, in discovery order. A
    /// generator is invoked at most once per declaration even when the
    /// declaration carries several markers. Nothing matching is an empty
    /// result, not an error.
    ///
    /// Two artifacts may not share an output path. The first one wins; each
    /// later one is dropped and reported as an error on its declaration.
    pub fn run(&self, discovery: &Discovery) -> CliResult<Vec<Artifact>> {
        let mut invoked = HashSet::new();
        let mut owners = HashMap::new();
        let mut artifacts = Vec::new();

        for marker in self.registry.markers() {
            for (index, declaration) in discovery.declarations().iter().enumerate() {
                if !declaration.has_marker(marker) {
                    continue;
                }

                for (slot, generator) in self.registry.generators().iter().enumerate() {
                    if !generator.filter(declaration)? || !invoked.insert((slot, index)) {
                        continue;
                    }

                    let produced = generator.produce(declaration, &self.config)?;
                    tracing::debug!(
                        generator = generator.id(),
                        declaration = %declaration.name,
                        artifacts = produced.len(),
                        "generator produced"
                    );
                    for artifact in produced {
                        match owners.entry(artifact.relative_path()) {
                            Entry::Vacant(entry) => {
                                entry.insert(artifact.origin.clone());
                                artifacts.push(artifact);
                            }
                            Entry::Occupied(entry) => {
                                let message = format!(
                                    "{} would overwrite {}, already generated for {}",
                                    artifact.qualified_name(),
                                    entry.key().display(),
                                    entry.get()
                                );
                                self.registry.sink().report(Severity::Error, &message, declaration);
                            }
                        }
                    }
                }
            }
        }

        Ok(artifacts)
    }

    /// Scan, parse and run.
    ///
    /// Unparseable files are reported in the outcome and otherwise skipped.
    pub fn generate(&self, scanner: &SourceScanner) -> CliResult<GenerationOutcome> {
        let files = scanner.scan_allow_empty()?;
        let (discovery, parse_errors) = self.parser().parse_files(&files);
        for error in &parse_errors {
            tracing::warn!(%error, "skipping unparseable file");
        }

        let artifacts = self.run(&discovery)?;
        Ok(GenerationOutcome {
            artifacts,
            parse_errors,
            files: files.len(),
            declarations: discovery.len(),
        })
    }

    /// Write artifacts through `writer` in order.
    ///
    /// With echo enabled each source is also written to `echo` first. The
    /// first failed write aborts the remaining ones.
    pub fn persist(
        &self,
        artifacts: &[Artifact],
        writer: &ArtifactWriter,
        echo: &mut dyn Write,
    ) -> CliResult<Vec<WriteResult>> {
        let mut results = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            if self.echo {
                writeln!(echo, "// {}", artifact.relative_path().display())?;
                echo.write_all(artifact.source.as_bytes())?;
            }
            results.push(writer.write(artifact)?);
        }
        Ok(results)
    }
}
