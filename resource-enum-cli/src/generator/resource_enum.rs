//! The resource-enum generator.
//!
//! Claims declarations marked `#[generate_resource_enum]` and produces one
//! enum per `#[target_resource]` constant inside them. The constant's string
//! value is the bundle base name; the declaration's marker arguments and
//! module path decide the package.

use std::sync::Arc;

use resource_enum::{BundleLoader, FallbackControl, Locale};

use crate::declaration::{DeclarationView, PackageNamingPolicy};
use crate::diagnostics::{DiagnosticSink, Severity};
use crate::emitter::RustEmitter;
use crate::error::{CliResult, ConfigError, GenerateError};
use crate::generator::traits::{Artifact, Generator, GeneratorConfig, Marker};
use crate::parser::{Declaration, Member};
use crate::synthesizer::ResourceEnumSynthesizer;

/// Declaration-level marker claimed by [`ResourceEnumGenerator`].
pub const DECLARATION_MARKER: &str = "generate_resource_enum";

/// Member-level marker naming a bundle.
pub const MEMBER_MARKER: &str = "target_resource";

/// Generates resource enums for marked declarations.
pub struct ResourceEnumGenerator {
    loader: Arc<BundleLoader>,
    locale: Option<Locale>,
    control: Option<Arc<dyn FallbackControl>>,
    marker: Option<Marker>,
    member_marker: Marker,
    emitter: RustEmitter,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl ResourceEnumGenerator {
    /// Generator bound to the standard markers, reading bundles through
    /// `loader`.
    pub fn new(loader: Arc<BundleLoader>) -> Self {
        Self {
            loader,
            locale: None,
            control: None,
            marker: Some(Marker::from_ident(DECLARATION_MARKER)),
            member_marker: Marker::from_ident(MEMBER_MARKER),
            emitter: RustEmitter::new(),
            sink: None,
        }
    }

    /// Locale used to compute default values. `None` uses the platform
    /// default.
    pub fn with_locale(mut self, locale: Option<Locale>) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_fallback_control(mut self, control: Option<Arc<dyn FallbackControl>>) -> Self {
        self.control = control;
        self
    }

    /// Rebind to other markers.
    pub fn with_markers(mut self, declaration: Option<Marker>, member: Marker) -> Self {
        self.marker = declaration;
        self.member_marker = member;
        self
    }

    /// Message reported when a marked declaration names no bundle.
    pub fn precondition_message(&self) -> String {
        let declaration = self
            .marker
            .as_ref()
            .map_or_else(|| format!("#[{DECLARATION_MARKER}]"), Marker::to_string);
        format!(
            "{declaration} annotated. {} annotated field is required.",
            self.member_marker
        )
    }

    fn policy(&self, declaration: &Declaration) -> PackageNamingPolicy {
        self.marker
            .as_ref()
            .and_then(|marker| declaration.marker(marker.name()))
            .map(PackageNamingPolicy::from_marker)
            .unwrap_or_default()
    }

    fn produce_member(
        &self,
        member: &Member,
        base_name: &str,
        package: &str,
        declaration: &Declaration,
        config: &GeneratorConfig,
        sink: &dyn DiagnosticSink,
    ) -> CliResult<Option<Artifact>> {
        let description = ResourceEnumSynthesizer::builder(base_name)
            .locale(self.locale.clone())
            .fallback_control(self.control.clone())
            .package_name(package)
            .build()?
            .synthesize(&self.loader)?;

        if description.is_empty() {
            sink.report(
                Severity::Error,
                &format!(
                    "resource bundle '{base_name}' named by `{}` has no keys",
                    member.name
                ),
                declaration,
            );
            return Ok(None);
        }

        tracing::debug!(
            declaration = %declaration.name,
            base_name,
            type_name = %description.type_name,
            members = description.members.len(),
            "generated resource enum"
        );
        Ok(Some(self.emitter.emit_artifact(
            &description,
            config,
            declaration.name.clone(),
        )))
    }
}

impl Generator for ResourceEnumGenerator {
    fn id(&self) -> &'static str {
        "resource-enum"
    }

    fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    fn bind(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.sink = Some(sink);
    }

    fn produce(
        &self,
        declaration: &Declaration,
        config: &GeneratorConfig,
    ) -> CliResult<Vec<Artifact>> {
        let sink = self
            .sink
            .as_deref()
            .ok_or(ConfigError::MissingDiagnosticSink)?;
        let view = DeclarationView::new(declaration);

        let members = match view.members(self.member_marker.name()) {
            Ok(members) => members,
            Err(e @ GenerateError::InvalidDeclarationKind { .. }) => {
                sink.report(Severity::Error, &e.to_string(), declaration);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if members.is_empty() {
            tracing::warn!(declaration = %declaration.name, "no resource-bearing members");
            sink.report(Severity::Error, &self.precondition_message(), declaration);
            return Ok(Vec::new());
        }

        let package = view.package_name(&self.policy(declaration));
        let mut artifacts = Vec::with_capacity(members.len());
        for member in members {
            let Some(base_name) = member.constant.as_deref() else {
                sink.report(
                    Severity::Warning,
                    &format!(
                        "`{}` is not a string literal constant and was skipped",
                        member.name
                    ),
                    declaration,
                );
                continue;
            };

            if let Some(artifact) =
                self.produce_member(member, base_name, &package, declaration, config, sink)?
            {
                artifacts.push(artifact);
            }
        }

        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::error::CliError;
    use crate::parser::RustParser;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        generator: ResourceEnumGenerator,
        sink: Arc<CollectingSink>,
    }

    fn fixture(files: &[(&str, &str)]) -> Fixture {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join("resource").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let sink = Arc::new(CollectingSink::new());
        let mut generator = ResourceEnumGenerator::new(Arc::new(BundleLoader::new([dir.path()])))
            .with_locale(Some(Locale::ROOT));
        generator.bind(sink.clone());
        Fixture {
            _dir: dir,
            generator,
            sink,
        }
    }

    fn declaration(code: &str, package: &str) -> Declaration {
        RustParser::new([DECLARATION_MARKER])
            .parse_source(code, Path::new("src/lib.rs"), package)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_filter_claims_marked_declarations() {
        let f = fixture(&[]);
        let marked = declaration("#[generate_resource_enum] mod m {}", "");
        assert!(f.generator.filter(&marked).unwrap());

        let other = RustParser::new(["other"])
            .parse_source("#[other] mod m {}", Path::new("src/lib.rs"), "")
            .unwrap()
            .remove(0);
        assert!(!f.generator.filter(&other).unwrap());
    }

    #[test]
    fn test_precondition_failure_reports_once() {
        let f = fixture(&[]);
        let decl = declaration(
            r#"
            #[generate_resource_enum]
            mod sample {
                const NOT_MARKED: &str = "resource.message";
            }
            "#,
            "",
        );

        let artifacts = f.generator.produce(&decl, &GeneratorConfig::default()).unwrap();

        assert!(artifacts.is_empty());
        let diagnostics = f.sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(
            diagnostics[0].message,
            "#[generate_resource_enum] annotated. #[target_resource] annotated field is required."
        );
    }

    #[test]
    fn test_one_artifact_per_member() {
        let f = fixture(&[
            ("message.properties", "b=2\na=1\n"),
            ("message6.properties", "x={0}\n"),
        ]);
        let decl = declaration(
            r#"
            #[generate_resource_enum(sub_package = "Messages")]
            mod sample {
                #[target_resource]
                const FIRST: &str = "resource.message";
                #[target_resource]
                const SECOND: &str = "resource.message6";
            }
            "#,
            "app",
        );

        let artifacts = f.generator.produce(&decl, &GeneratorConfig::default()).unwrap();

        let names: Vec<_> = artifacts.iter().map(|a| a.qualified_name()).collect();
        assert_eq!(names, vec!["app.messages.Message", "app.messages.Message6"]);
        assert!(artifacts.iter().all(|a| a.origin == "sample"));
        assert!(f.sink.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_bundle_propagates() {
        let f = fixture(&[]);
        let decl = declaration(
            r#"
            #[generate_resource_enum]
            mod sample {
                #[target_resource]
                const MISSING: &str = "resource.messagenotexist";
            }
            "#,
            "",
        );

        let result = f.generator.produce(&decl, &GeneratorConfig::default());
        match result {
            Err(CliError::Generate(e)) => assert!(e.is_resource_not_found()),
            other => panic!("expected ResourceNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_bundle_reported() {
        let f = fixture(&[("empty.properties", "# nothing here\n")]);
        let decl = declaration(
            r#"
            #[generate_resource_enum]
            mod sample {
                #[target_resource]
                const EMPTY: &str = "resource.empty";
            }
            "#,
            "",
        );

        let artifacts = f.generator.produce(&decl, &GeneratorConfig::default()).unwrap();

        assert!(artifacts.is_empty());
        assert_eq!(f.sink.count(Severity::Error), 1);
        assert!(f.sink.diagnostics()[0].message.contains("has no keys"));
    }

    #[test]
    fn test_non_literal_member_skipped_with_warning() {
        let f = fixture(&[("message.properties", "a=1\n")]);
        let decl = declaration(
            r#"
            #[generate_resource_enum]
            mod sample {
                #[target_resource]
                const COMPUTED: &str = concat!("resource.", "message");
                #[target_resource]
                const LITERAL: &str = "resource.message";
            }
            "#,
            "",
        );

        let artifacts = f.generator.produce(&decl, &GeneratorConfig::default()).unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(f.sink.count(Severity::Warning), 1);
    }

    #[test]
    fn test_non_composite_declaration_reported() {
        let f = fixture(&[]);
        let decl = declaration("#[generate_resource_enum] struct Sample;", "");

        let artifacts = f.generator.produce(&decl, &GeneratorConfig::default()).unwrap();

        assert!(artifacts.is_empty());
        assert_eq!(f.sink.count(Severity::Error), 1);
    }

    #[test]
    fn test_unbound_generator_fails() {
        let generator = ResourceEnumGenerator::new(Arc::new(BundleLoader::new(["."])));
        let decl = declaration("#[generate_resource_enum] mod m {}", "");

        assert!(matches!(
            generator.produce(&decl, &GeneratorConfig::default()),
            Err(CliError::Config(ConfigError::MissingDiagnosticSink))
        ));
    }

    #[test]
    fn test_generator_without_marker() {
        let generator = ResourceEnumGenerator::new(Arc::new(BundleLoader::new(["."])))
            .with_markers(None, Marker::new(MEMBER_MARKER).unwrap());
        let decl = declaration("#[generate_resource_enum] mod m {}", "");

        assert!(matches!(
            generator.filter(&decl),
            Err(ConfigError::MissingMarker { .. })
        ));
    }
}
