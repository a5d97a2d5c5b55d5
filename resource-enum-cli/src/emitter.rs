//! Rust source emitter.
//!
//! Turns an [`EnumerationDescription`] into the source text of one enum and
//! its accessors. Output layout follows [`GeneratorConfig`]: indentation,
//! line endings, whether doc comments are written and which path the runtime
//! crate is imported from.

use crate::generator::{Artifact, GeneratorConfig};
use crate::synthesizer::{EnumerationDescription, ResourceKeyEntry};

/// Emits the Rust rendition of a resource enum.
#[derive(Debug, Clone, Default)]
pub struct RustEmitter;

impl RustEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Emit source text for `description`.
    pub fn emit(&self, description: &EnumerationDescription, config: &GeneratorConfig) -> String {
        let mut out = SourceBuilder::new(config);

        self.emit_header(&mut out, description);
        self.emit_enum(&mut out, description);
        self.emit_constants(&mut out, description);
        self.emit_display(&mut out, description);

        out.finish()
    }

    /// Emit `description` wrapped in an [`Artifact`].
    pub fn emit_artifact(
        &self,
        description: &EnumerationDescription,
        config: &GeneratorConfig,
        origin: impl Into<String>,
    ) -> Artifact {
        Artifact {
            package: description.package_name.clone(),
            type_name: description.type_name.clone(),
            source: self.emit(description, config),
            origin: origin.into(),
        }
    }

    // =========================================================================
    // Header
    // =========================================================================

    fn emit_header(&self, out: &mut SourceBuilder<'_>, description: &EnumerationDescription) {
        if out.config.generate_docs {
            out.line(0, &format!("//! Generated from resource bundle `{}`.", description.base_name));
            out.line(0, "//!");
            out.line(0, "//! Do not edit: rerun `resource-enum generate` instead.");
            out.blank();
        }

        out.line(0, "use std::fmt;");
        out.line(0, "use std::sync::Arc;");
        out.blank();
        let runtime_use = format!(
            "use {}::{{format_message, FallbackControl, Locale, ResolutionStrategy}};",
            out.config.runtime_crate
        );
        out.line(0, &runtime_use);
        out.blank();
        out.line(0, "static STRATEGY: ResolutionStrategy = ResolutionStrategy::new();");
        out.blank();
    }

    // =========================================================================
    // Enum
    // =========================================================================

    fn emit_enum(&self, out: &mut SourceBuilder<'_>, description: &EnumerationDescription) {
        if out.config.generate_docs {
            out.line(
                0,
                &format!("/// Keys of resource bundle `{}`.", description.base_name),
            );
        }
        out.line(0, "#[allow(non_camel_case_types)]");
        out.line(0, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]");
        out.line(0, &format!("pub enum {} {{", description.type_name));

        for entry in &description.members {
            if out.config.generate_docs {
                // Bare carriage returns are not allowed in doc comments.
                for line in entry.default_value.lines() {
                    out.doc(1, &line.replace('\r', ""));
                }
                if entry.default_value.is_empty() {
                    out.doc(1, "");
                }
                out.doc(1, "");
                out.doc(1, &format!("parameter count = {}", entry.placeholder_count));
            }
            out.line(1, &format!("{},", entry.member_name));
        }

        out.line(0, "}");
        out.blank();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    fn emit_constants(&self, out: &mut SourceBuilder<'_>, description: &EnumerationDescription) {
        let type_name = &description.type_name;
        let docs = out.config.generate_docs;

        out.line(0, &format!("impl {type_name} {{"));

        if docs {
            out.doc(1, "Base name of the bundle this enum was generated from.");
        }
        out.line(
            1,
            &format!("pub const BASE_NAME: &'static str = {:?};", description.base_name),
        );
        out.blank();

        if docs {
            out.doc(1, "Every variant, in key order.");
        }
        let all: Vec<String> = description
            .members
            .iter()
            .map(|entry| format!("Self::{}", entry.member_name))
            .collect();
        out.line(
            1,
            &format!("pub const ALL: &'static [{type_name}] = &[{}];", all.join(", ")),
        );
        out.blank();

        self.emit_match_fn(out, description, "Bundle key.", "key", "&'static str", |entry| {
            format!("{:?}", entry.key)
        });
        self.emit_match_fn(
            out,
            description,
            "Number of `{n}` placeholders in the default value.",
            "param_count",
            "usize",
            |entry| entry.placeholder_count.to_string(),
        );
        self.emit_match_fn(
            out,
            description,
            "Value compiled in at generation time.",
            "default_value",
            "&'static str",
            |entry| format!("{:?}", entry.default_value),
        );

        if docs {
            out.doc(1, "Override the locale used by [`Self::resolve`].");
            out.doc(1, "");
            out.doc(1, "The override is process-wide; the last writer wins.");
        }
        out.line(1, "pub fn set_locale(locale: Option<Locale>) {");
        out.line(2, "STRATEGY.set_locale(locale);");
        out.line(1, "}");
        out.blank();

        if docs {
            out.doc(1, "Override the fallback control used by [`Self::resolve`].");
            out.doc(1, "");
            out.doc(1, "The override is process-wide; the last writer wins.");
        }
        out.line(
            1,
            "pub fn set_fallback_control(control: Option<Arc<dyn FallbackControl>>) {",
        );
        out.line(2, "STRATEGY.set_fallback_control(control);");
        out.line(1, "}");
        out.blank();

        if docs {
            out.doc(1, "Current localized value, or [`Self::default_value`] if lookup fails.");
        }
        out.line(1, "pub fn resolve(self) -> String {");
        out.line(2, "self.resolve_with(&STRATEGY)");
        out.line(1, "}");
        out.blank();

        if docs {
            out.doc(1, "Like [`Self::resolve`] with an explicit strategy.");
        }
        out.line(1, "pub fn resolve_with(self, strategy: &ResolutionStrategy) -> String {");
        out.line(
            2,
            "strategy.resolve(Self::BASE_NAME, self.key(), self.default_value())",
        );
        out.line(1, "}");
        out.blank();

        if docs {
            out.doc(1, "Resolve and substitute positional `{n}` placeholders.");
        }
        out.line(1, "pub fn format(self, args: &[&dyn fmt::Display]) -> String {");
        out.line(2, "format_message(&self.resolve(), args)");
        out.line(1, "}");

        out.line(0, "}");
        out.blank();
    }

    fn emit_match_fn(
        &self,
        out: &mut SourceBuilder<'_>,
        description: &EnumerationDescription,
        doc: &str,
        name: &str,
        return_type: &str,
        value: impl Fn(&ResourceKeyEntry) -> String,
    ) {
        if out.config.generate_docs {
            out.doc(1, doc);
        }
        out.line(1, &format!("pub const fn {name}(self) -> {return_type} {{"));
        out.line(2, "match self {");
        for entry in &description.members {
            out.line(3, &format!("Self::{} => {},", entry.member_name, value(entry)));
        }
        out.line(2, "}");
        out.line(1, "}");
        out.blank();
    }

    fn emit_display(&self, out: &mut SourceBuilder<'_>, description: &EnumerationDescription) {
        out.line(0, &format!("impl fmt::Display for {} {{", description.type_name));
        out.line(1, "fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {");
        out.line(2, "f.write_str(&self.resolve())");
        out.line(1, "}");
        out.line(0, "}");
    }
}

/// Line-oriented source buffer honoring the configured layout.
struct SourceBuilder<'a> {
    config: &'a GeneratorConfig,
    buf: String,
}

impl<'a> SourceBuilder<'a> {
    fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            buf: String::new(),
        }
    }

    fn line(&mut self, depth: usize, text: &str) {
        if !text.is_empty() {
            self.buf.push_str(&self.config.indent.indent(depth));
            self.buf.push_str(text);
        }
        self.buf.push_str(self.config.line_ending_str());
    }

    fn doc(&mut self, depth: usize, text: &str) {
        if text.is_empty() {
            self.line(depth, "///");
        } else {
            self.line(depth, &format!("/// {text}"));
        }
    }

    fn blank(&mut self) {
        self.line(0, "");
    }

    fn finish(self) -> String {
        self.buf
    }
}
