//! Generator registry.
//!
//! The registry owns an ordered list of generators, each bound once to the
//! shared diagnostic sink when the registry is built.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::DiagnosticSink;
use crate::error::ConfigError;
use crate::generator::traits::Generator;

/// Ordered, bound collection of generators.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn Generator>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl GeneratorRegistry {
    pub fn builder() -> GeneratorRegistryBuilder {
        GeneratorRegistryBuilder::default()
    }

    /// Generators in registration order.
    pub fn generators(&self) -> &[Box<dyn Generator>] {
        &self.generators
    }

    /// Declaration markers of every generator, deduplicated, in registration
    /// order.
    pub fn markers(&self) -> Vec<&str> {
        let mut markers: Vec<&str> = Vec::new();
        for marker in self.generators.iter().filter_map(|g| g.marker()) {
            if !markers.contains(&marker.name()) {
                markers.push(marker.name());
            }
        }
        markers
    }

    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field(
                "generators",
                &self.generators.iter().map(|g| g.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for [`GeneratorRegistry`].
#[derive(Default)]
pub struct GeneratorRegistryBuilder {
    generators: Vec<Box<dyn Generator>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl GeneratorRegistryBuilder {
    /// Set the sink every generator reports to.
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Append a generator.
    pub fn register(mut self, generator: impl Generator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    /// Bind every generator to the sink.
    ///
    /// Fails if no sink was given or a generator has no marker.
    pub fn build(self) -> Result<GeneratorRegistry, ConfigError> {
        let sink = self.sink.ok_or(ConfigError::MissingDiagnosticSink)?;

        let mut generators = self.generators;
        for generator in &mut generators {
            if generator.marker().is_none() {
                return Err(ConfigError::missing_marker(generator.id()));
            }
            generator.bind(Arc::clone(&sink));
            tracing::debug!(generator = generator.id(), "registered generator");
        }

        Ok(GeneratorRegistry { generators, sink })
    }
}
