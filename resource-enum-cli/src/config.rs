//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `resource-enum.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use crate::generator::GeneratorConfig;
use resource_enum::{BundleLoader, DefaultControl, FallbackControl, Locale, NoFallbackControl};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "resource-enum.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where bundles are read from.
    pub resources: ResourcesConfig,

    /// How default values are computed.
    pub generation: GenerationConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Resource bundle locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Resource roots, searched in order.
    pub dirs: Vec<PathBuf>,
}

/// Bundle lookup used at generation time.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Locale for default values. Unset uses the platform default.
    pub locale: Option<Locale>,

    /// Fallback control. Unset uses the loader's standard behavior.
    pub fallback: Option<FallbackMode>,
}

/// Named fallback controls selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackMode {
    /// Retry with the platform default locale.
    Default,
    /// Never retry; unmatched locales use the base bundle.
    NoFallback,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Whether to print generated sources while writing them.
    pub echo: bool,

    /// Whether to generate doc comments.
    pub generate_docs: bool,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dirs: vec![PathBuf::from("resources")],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            echo: false,
            generate_docs: true,
        }
    }
}

impl FallbackMode {
    pub fn control(self) -> Arc<dyn FallbackControl> {
        match self {
            FallbackMode::Default => Arc::new(DefaultControl),
            FallbackMode::NoFallback => Arc::new(NoFallbackControl),
        }
    }
}

impl Config {
    /// Reject values no generation pass can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resources.dirs.is_empty() {
            return Err(ConfigError::invalid_value(
                "resources.dirs",
                "at least one resource directory is required",
            ));
        }
        Ok(())
    }

    /// Loader over the configured resource roots.
    pub fn bundle_loader(&self) -> BundleLoader {
        BundleLoader::new(self.resources.dirs.iter().cloned())
    }

    /// Fallback control selected by `generation.fallback`.
    pub fn fallback_control(&self) -> Option<Arc<dyn FallbackControl>> {
        self.generation.fallback.map(FallbackMode::control)
    }

    /// Layout options for emitted sources.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new().with_generate_docs(self.output.generate_docs)
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// An explicit path must exist. Without one, `resource-enum.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
                .into());
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path.clone(), e.to_string()))?;
        config.validate()?;

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if !args.resources.is_empty() {
            config.resources.dirs = args.resources.clone();
        }

        if let Some(ref locale) = args.locale {
            config.generation.locale = Some(locale.clone());
        }

        if args.no_fallback {
            config.generation.fallback = Some(FallbackMode::NoFallback);
        }

        if args.echo {
            config.output.echo = true;
        }

        if let Some(generate_docs) = args.generate_docs {
            config.output.generate_docs = generate_docs;
        }

        config
    }

    /// Write the default configuration to `path`.
    ///
    /// An existing file is only replaced when `force` is set.
    pub fn init(path: &Path, force: bool) -> Result<(), ConfigError> {
        if path.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        std::fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# resource-enum configuration file

[resources]
# Directories holding .properties bundles, searched in order.
# Base name `resource.message` maps to `<dir>/resource/message_<locale>.properties`.
dirs = ["resources"]

[generation]
# Locale whose values become the compiled defaults (e.g. "ja_JP").
# Unset uses the platform default locale.
# locale = "ja_JP"

# Fallback control: "default" retries with the platform default locale,
# "no-fallback" uses the base bundle when the locale has no file.
# fallback = "no-fallback"

[output]
# Output directory for generated Rust files
dir = "./generated"

# Print each generated source while writing it
echo = false

# Whether to generate doc comments with default values
generate_docs = true
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Resource roots override. Empty keeps the configured roots.
    pub resources: Vec<PathBuf>,

    /// Locale override.
    pub locale: Option<Locale>,

    /// Force the no-fallback control.
    pub no_fallback: bool,

    /// Enable echo.
    pub echo: bool,

    /// Generate docs override.
    pub generate_docs: Option<bool>,
}
