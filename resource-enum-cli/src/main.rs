//! # resource-enum
//!
//! CLI tool generating Rust enums from localized `.properties` bundles.
//!
//! ## Usage
//!
//! ```bash
//! # Generate enums for every marked declaration under ./src
//! resource-enum generate --input src --resources resources
//!
//! # Compute default values for a fixed locale without falling back
//! resource-enum generate --locale ja_JP --no-fallback
//!
//! # Dry run to preview changes
//! resource-enum generate --dry-run --echo
//!
//! # Initialize configuration
//! resource-enum init
//!
//! # Check that generated enums are up-to-date
//! resource-enum validate --output ./generated
//! ```

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use resource_enum::Locale;
use resource_enum_cli::{
    config::{CliArgs, Config, ConfigManager},
    diagnostics::{CollectingSink, Severity},
    error::{CliError, ParseError},
    generator::{GeneratorRegistry, ResourceEnumGenerator},
    pipeline::{GenerationOutcome, GenerationPipeline},
    scanner::SourceScanner,
    source_reader::SourceFileReader,
    writer::{ArtifactWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "resource-enum")]
#[command(author, version, about = "Generate Rust enums from .properties resource bundles", long_about = None)]
struct Cli {
    /// Log generator decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate enums for every marked declaration
    Generate(GenerateArgs),

    /// Initialize a new resource-enum configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "resource-enum.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated enums are up-to-date
    Validate(ValidateArgs),
}

/// Flags deciding what gets generated and where it lands.
///
/// Shared by `generate` and `validate` so both compute the same artifacts.
#[derive(Args, Debug)]
struct GenerationArgs {
    /// Input directory containing Rust source files
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Output directory for generated Rust files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Resource root holding .properties bundles (repeatable)
    #[arg(short, long = "resources")]
    resources: Vec<PathBuf>,

    /// Locale whose values become the compiled defaults (e.g. ja_JP)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// Use the base bundle when the locale has no file of its own
    #[arg(long)]
    no_fallback: bool,

    /// Filter source files by path pattern (glob)
    #[arg(long)]
    filter: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    generation: GenerationArgs,

    /// Print each generated source
    #[arg(long)]
    echo: bool,

    /// Preview changes without writing files
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    generation: GenerationArgs,
}

impl GenerationArgs {
    /// Load the configuration file and apply these flags over it.
    fn config(&self, echo: bool) -> Result<Config, CliError> {
        let config = ConfigManager::load(self.config.as_deref())?;
        let config = ConfigManager::merge_cli_args(
            config,
            &CliArgs {
                output: self.output.clone(),
                resources: self.resources.clone(),
                locale: self.locale.clone(),
                no_fallback: self.no_fallback,
                echo,
                generate_docs: None,
            },
        );
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Install a subscriber when asked to or when `RUST_LOG` is set.
fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("resource_enum=debug,resource_enum_cli=debug"),
        Err(_) => return,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Commands::Generate(args) => cmd_generate(args),

        Commands::Init { output, force } => cmd_init(output, force).map(|()| ExitCode::SUCCESS),

        Commands::Validate(args) => cmd_validate(args).map(|()| ExitCode::SUCCESS),
    }
}

/// Registry with the resource-enum generator, configured from `config`.
fn build_pipeline(config: &Config, sink: Arc<CollectingSink>) -> Result<GenerationPipeline, CliError> {
    let generator = ResourceEnumGenerator::new(Arc::new(config.bundle_loader()))
        .with_locale(config.generation.locale.clone())
        .with_fallback_control(config.fallback_control());

    let registry = GeneratorRegistry::builder()
        .diagnostics(sink)
        .register(generator)
        .build()?;

    Ok(GenerationPipeline::new(registry, config.generator_config()).with_echo(config.output.echo))
}

/// Scan the input directory and generate in memory.
fn generate_all(
    args: &GenerationArgs,
    config: &Config,
    sink: &Arc<CollectingSink>,
) -> Result<(GenerationPipeline, GenerationOutcome), CliError> {
    println!("{}", "Scanning for Rust source files...".cyan());

    let mut scanner = SourceScanner::new(&args.input);
    if let Some(pattern) = args.filter.as_deref() {
        scanner = scanner.with_filter(pattern)?;
    }

    let pipeline = build_pipeline(config, Arc::clone(sink))?;
    let outcome = pipeline.generate(&scanner)?;

    println!("  Found {} Rust file(s)", outcome.files.to_string().green());
    if !outcome.parse_errors.is_empty() {
        println!(
            "{} {} parse error(s):",
            "Warning:".yellow(),
            outcome.parse_errors.len()
        );
        for error in &outcome.parse_errors {
            println!("  {}", format_parse_error(error));
        }
    }
    println!(
        "  Found {} marked declaration(s)",
        outcome.declarations.to_string().green()
    );

    print_diagnostics(sink);
    Ok((pipeline, outcome))
}

/// Generate command implementation.
fn cmd_generate(args: GenerateArgs) -> Result<ExitCode, CliError> {
    let config = args.generation.config(args.echo)?;

    let sink = Arc::new(CollectingSink::new());
    let (pipeline, outcome) = generate_all(&args.generation, &config, &sink)?;

    if outcome.artifacts.is_empty() {
        println!("{}", "No enums generated.".yellow());
    } else {
        println!(
            "{} {} enum(s)...",
            "Writing".cyan(),
            outcome.artifacts.len().to_string().green()
        );
    }

    let writer = ArtifactWriter::new(&config.output.dir).with_dry_run(args.dry_run);
    let stdout = std::io::stdout();
    let mut echo = stdout.lock();
    let results = pipeline.persist(&outcome.artifacts, &writer, &mut echo)?;
    echo.flush()?;
    drop(echo);

    for result in &results {
        match result {
            WriteResult::Written { path, bytes } => {
                println!("{} Written {} bytes to {}", "✓".green(), bytes, path.display());
            }
            WriteResult::Unchanged { path } => {
                println!("{} Unchanged {}", "-".dimmed(), path.display());
            }
            WriteResult::DryRun { path, .. } => {
                println!("{} Would write {}", "[dry-run]".yellow(), path.display());
            }
        }
    }

    if sink.has_errors() {
        println!(
            "{} {} declaration error(s) reported",
            "✗".red(),
            sink.count(Severity::Error)
        );
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    ConfigManager::init(&output, force)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
///
/// Regenerates in memory and compares each artifact with the file on disk.
fn cmd_validate(args: ValidateArgs) -> Result<(), CliError> {
    let config = args.generation.config(false)?;

    let sink = Arc::new(CollectingSink::new());
    let (_, outcome) = generate_all(&args.generation, &config, &sink)?;

    println!("{}", "Validating generated enums...".cyan());
    let mut stale = Vec::new();
    for artifact in &outcome.artifacts {
        let path = config.output.dir.join(artifact.relative_path());
        let up_to_date = path.exists()
            && SourceFileReader::read(&path)?.matches(&artifact.source);
        if !up_to_date {
            println!("  {} {}", "✗".red(), path.display());
            stale.push(path);
        }
    }

    if stale.is_empty() {
        println!("{} Generated enums are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("  Run 'resource-enum generate' to update");
        Err(CliError::Validation(format!(
            "{} generated file(s) out of date",
            stale.len()
        )))
    }
}

fn print_diagnostics(sink: &CollectingSink) {
    for diagnostic in sink.diagnostics() {
        let label = match diagnostic.severity {
            Severity::Error => "error:".red().bold(),
            Severity::Warning => "warning:".yellow().bold(),
            Severity::Note => "note:".cyan(),
        };
        println!(
            "{} {} ({} at {})",
            label, diagnostic.message, diagnostic.declaration, diagnostic.subject
        );
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

/// Format a parse error for display.
fn format_parse_error(error: &ParseError) -> String {
    match error {
        ParseError::Syntax {
            file,
            line,
            column,
            message,
        } => {
            format!("{}:{}:{}: {}", file.display(), line, column, message)
        }
        ParseError::Io { file, source } => {
            format!("{}: {}", file.display(), source)
        }
    }
}
