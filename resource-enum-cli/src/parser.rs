//! Rust source parser for discovering marked declarations.
//!
//! This module parses Rust source files using `syn` and extracts every item
//! carrying one of a configured set of marker attributes, together with the
//! members (constants, statics, functions) declared inside it.

use crate::error::{CliError, CliResult, ParseError};
use crate::scanner::SourceFile;
use quote::ToTokens;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, ImplItem, Item, Lit, Meta, TraitItem, Type};

/// Source location for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File path.
    pub file: PathBuf,

    /// Line number (1-indexed).
    pub line: usize,

    /// Column number (1-indexed).
    pub column: usize,
}

impl SourceLocation {
    fn of(span: proc_macro2::Span, file: &Path) -> Self {
        let start = span.start();
        Self {
            file: file.to_path_buf(),
            line: start.line,
            column: start.column + 1,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Syntactic kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `mod name { ... }`
    Module,
    /// `mod name;`, whose body lives in another file.
    ModuleFile,
    /// Inherent or trait `impl` block.
    Impl,
    Trait,
    Struct,
    Enum,
    Function,
    Const,
    Static,
    Other,
}

impl DeclarationKind {
    /// Whether declarations of this kind have members.
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Module | Self::Impl | Self::Trait)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Module => "module",
            Self::ModuleFile => "out-of-line module",
            Self::Impl => "impl block",
            Self::Trait => "trait",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Function => "function",
            Self::Const => "const",
            Self::Static => "static",
            Self::Other => "item",
        })
    }
}

/// One attribute on a declaration or member, with its `key = "value"` args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerUse {
    /// Last path segment of the attribute (`generate_resource_enum`).
    pub name: String,

    /// String-valued `key = "value"` arguments, in source order.
    pub args: Vec<(String, String)>,
}

impl MarkerUse {
    /// Value of a string argument.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// A member declared inside a composite declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub kind: DeclarationKind,
    pub markers: Vec<MarkerUse>,
    /// Compile-time string value, when the member is a `const` or `static`
    /// initialised with a string literal.
    pub constant: Option<String>,
    pub location: SourceLocation,
}

impl Member {
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m.name == marker)
    }
}

/// A declaration carrying at least one of the parser's markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Simple name: the item's identifier, or the self type for `impl`.
    pub name: String,
    pub kind: DeclarationKind,
    /// Dot-separated module path enclosing the declaration.
    pub package: String,
    pub markers: Vec<MarkerUse>,
    /// Members, for composite kinds. Empty otherwise.
    pub members: Vec<Member>,
    pub location: SourceLocation,
}

impl Declaration {
    pub fn has_marker(&self, marker: &str) -> bool {
        self.marker(marker).is_some()
    }

    pub fn marker(&self, marker: &str) -> Option<&MarkerUse> {
        self.markers.iter().find(|m| m.name == marker)
    }
}

/// Declarations discovered in one pass, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    declarations: Vec<Declaration>,
}

impl Discovery {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Parser for Rust source files.
#[derive(Debug, Default)]
pub struct RustParser {
    /// Declaration markers to look for, by last path segment.
    markers: BTreeSet<String>,
}

impl RustParser {
    /// Create a parser collecting declarations carrying any of `markers`.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a source file and extract marked declarations.
    pub fn parse_file(&self, source: &SourceFile) -> CliResult<Vec<Declaration>> {
        self.parse_source(&source.content, &source.relative_path, &source.module_path)
    }

    /// Parse source code and extract marked declarations.
    ///
    /// `package` is the module path of the file itself.
    pub fn parse_source(
        &self,
        content: &str,
        file_path: &Path,
        package: &str,
    ) -> CliResult<Vec<Declaration>> {
        let syntax = syn::parse_file(content).map_err(|e| {
            let start = e.span().start();
            ParseError::syntax(file_path.to_path_buf(), start.line, start.column + 1, e.to_string())
        })?;

        let mut declarations = Vec::new();
        self.collect(&syntax.items, package, file_path, &mut declarations);
        Ok(declarations)
    }

    /// Parse multiple source files, collecting errors.
    pub fn parse_files(&self, sources: &[SourceFile]) -> (Discovery, Vec<ParseError>) {
        let mut declarations = Vec::new();
        let mut errors = Vec::new();

        for source in sources {
            match self.parse_file(source) {
                Ok(found) => declarations.extend(found),
                Err(CliError::Parse(e)) => errors.push(e),
                Err(e) => tracing::warn!(file = %source.path.display(), error = %e, "skipping file"),
            }
        }

        (Discovery::new(declarations), errors)
    }

    fn collect(&self, items: &[Item], package: &str, file: &Path, out: &mut Vec<Declaration>) {
        for item in items {
            let attrs = item_attrs(item);
            // Only generation markers; `derive`, `cfg` and docs are not kept.
            let markers: Vec<MarkerUse> = attrs
                .iter()
                .map(marker_use)
                .filter(|m| self.markers.contains(&m.name))
                .collect();
            if !markers.is_empty() {
                out.push(declaration(item, markers, package, file));
            }

            if let Item::Mod(module) = item {
                if let Some((_, inner)) = &module.content {
                    let nested = join_package(package, &module.ident.to_string());
                    self.collect(inner, &nested, file, out);
                }
            }
        }
    }
}

fn declaration(item: &Item, markers: Vec<MarkerUse>, package: &str, file: &Path) -> Declaration {
    let (name, kind, members) = match item {
        Item::Mod(module) => match &module.content {
            Some((_, items)) => (
                module.ident.to_string(),
                DeclarationKind::Module,
                items.iter().filter_map(|i| module_member(i, file)).collect(),
            ),
            None => (module.ident.to_string(), DeclarationKind::ModuleFile, Vec::new()),
        },
        Item::Impl(block) => (
            self_type_name(&block.self_ty),
            DeclarationKind::Impl,
            block.items.iter().filter_map(|i| impl_member(i, file)).collect(),
        ),
        Item::Trait(declaration) => (
            declaration.ident.to_string(),
            DeclarationKind::Trait,
            declaration
                .items
                .iter()
                .filter_map(|i| trait_member(i, file))
                .collect(),
        ),
        Item::Struct(s) => (s.ident.to_string(), DeclarationKind::Struct, Vec::new()),
        Item::Enum(e) => (e.ident.to_string(), DeclarationKind::Enum, Vec::new()),
        Item::Fn(f) => (f.sig.ident.to_string(), DeclarationKind::Function, Vec::new()),
        Item::Const(c) => (c.ident.to_string(), DeclarationKind::Const, Vec::new()),
        Item::Static(s) => (s.ident.to_string(), DeclarationKind::Static, Vec::new()),
        other => (
            other.to_token_stream().to_string(),
            DeclarationKind::Other,
            Vec::new(),
        ),
    };

    Declaration {
        name,
        kind,
        package: package.to_string(),
        markers,
        members,
        location: SourceLocation::of(name_span(item), file),
    }
}

fn module_member(item: &Item, file: &Path) -> Option<Member> {
    let (ident, kind, attrs, constant) = match item {
        Item::Const(c) => (&c.ident, DeclarationKind::Const, &c.attrs, string_literal(&c.expr)),
        Item::Static(s) => (&s.ident, DeclarationKind::Static, &s.attrs, string_literal(&s.expr)),
        Item::Fn(f) => (&f.sig.ident, DeclarationKind::Function, &f.attrs, None),
        _ => return None,
    };
    Some(member(ident, kind, attrs, constant, file))
}

fn impl_member(item: &ImplItem, file: &Path) -> Option<Member> {
    let (ident, kind, attrs, constant) = match item {
        ImplItem::Const(c) => (&c.ident, DeclarationKind::Const, &c.attrs, string_literal(&c.expr)),
        ImplItem::Fn(f) => (&f.sig.ident, DeclarationKind::Function, &f.attrs, None),
        _ => return None,
    };
    Some(member(ident, kind, attrs, constant, file))
}

fn trait_member(item: &TraitItem, file: &Path) -> Option<Member> {
    let (ident, kind, attrs, constant) = match item {
        TraitItem::Const(c) => (
            &c.ident,
            DeclarationKind::Const,
            &c.attrs,
            c.default.as_ref().and_then(|(_, expr)| string_literal(expr)),
        ),
        TraitItem::Fn(f) => (&f.sig.ident, DeclarationKind::Function, &f.attrs, None),
        _ => return None,
    };
    Some(member(ident, kind, attrs, constant, file))
}

fn member(
    ident: &syn::Ident,
    kind: DeclarationKind,
    attrs: &[Attribute],
    constant: Option<String>,
    file: &Path,
) -> Member {
    Member {
        name: ident.to_string(),
        kind,
        markers: attrs.iter().map(marker_use).collect(),
        constant,
        location: SourceLocation::of(ident.span(), file),
    }
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Mod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::Const(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        _ => &[],
    }
}

fn name_span(item: &Item) -> proc_macro2::Span {
    match item {
        Item::Mod(i) => i.ident.span(),
        Item::Impl(i) => i.self_ty.span(),
        Item::Trait(i) => i.ident.span(),
        Item::Struct(i) => i.ident.span(),
        Item::Enum(i) => i.ident.span(),
        Item::Fn(i) => i.sig.ident.span(),
        Item::Const(i) => i.ident.span(),
        Item::Static(i) => i.ident.span(),
        other => other.span(),
    }
}

/// Attribute name (last path segment) and its string arguments.
fn marker_use(attr: &Attribute) -> MarkerUse {
    let name = attr
        .path()
        .segments
        .last()
        .map(|segment| segment.ident.to_string())
        .unwrap_or_default();

    let args = match &attr.meta {
        Meta::List(_) => attr
            .parse_args_with(
                syn::punctuated::Punctuated::<syn::MetaNameValue, syn::Token![,]>::parse_terminated,
            )
            .map(|pairs| {
                pairs
                    .into_iter()
                    .filter_map(|pair| {
                        let key = pair.path.get_ident()?.to_string();
                        let value = string_literal(&pair.value)?;
                        Some((key, value))
                    })
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    MarkerUse { name, args }
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Some(s.value()),
        Expr::Group(group) => string_literal(&group.expr),
        Expr::Paren(paren) => string_literal(&paren.expr),
        _ => None,
    }
}

/// Last path segment of an `impl` self type (`Holder` for `impl a::Holder<T>`).
fn self_type_name(ty: &Type) -> String {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default(),
        Type::Reference(reference) => self_type_name(&reference.elem),
        Type::Paren(paren) => self_type_name(&paren.elem),
        Type::Group(group) => self_type_name(&group.elem),
        other => other.to_token_stream().to_string(),
    }
}

fn join_package(package: &str, segment: &str) -> String {
    if package.is_empty() {
        segment.to_string()
    } else {
        format!("{package}.{segment}")
    }
}
