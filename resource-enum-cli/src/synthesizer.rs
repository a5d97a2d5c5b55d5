//! Resource bundle to enumeration synthesis.
//!
//! Turns a bundle base name into an [`EnumerationDescription`]: one entry per
//! key in lexicographic order, each with its default value and the number of
//! `{n}` placeholders the value contains. The same inputs and bundle files
//! always give an identical description.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use resource_enum::{BundleLoader, FallbackControl, Locale};

use crate::error::{ConfigError, GenerateError};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[0-9]\}").expect("placeholder pattern is valid"));

/// One bundle key and what the generated variant carries for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKeyEntry {
    pub key: String,
    /// Enum variant name: the key upper-cased and made a valid identifier.
    pub member_name: String,
    pub default_value: String,
    pub placeholder_count: usize,
}

/// Everything the emitter needs to write one enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationDescription {
    pub base_name: String,
    pub type_name: String,
    pub package_name: String,
    /// Entries in lexicographic key order.
    pub members: Vec<ResourceKeyEntry>,
}

impl EnumerationDescription {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builds an [`EnumerationDescription`] for one bundle.
pub struct ResourceEnumSynthesizer {
    base_name: String,
    locale: Option<Locale>,
    control: Option<Arc<dyn FallbackControl>>,
    package_name: String,
}

impl ResourceEnumSynthesizer {
    pub fn builder(base_name: impl Into<String>) -> SynthesizerBuilder {
        SynthesizerBuilder {
            base_name: base_name.into(),
            locale: None,
            control: None,
            package_name: String::new(),
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Resolve the bundle through `loader` and describe it.
    ///
    /// Fails with [`GenerateError::ResourceNotFound`] if no bundle file
    /// exists, [`GenerateError::Bundle`] if one cannot be read or parsed, and
    /// with [`GenerateError::DuplicateMemberName`] if two keys
    /// map to the same variant name.
    pub fn synthesize(&self, loader: &BundleLoader) -> Result<EnumerationDescription, GenerateError> {
        let bundle = loader.lookup(&self.base_name, self.locale.as_ref(), self.control.as_deref())?;
        tracing::debug!(
            base_name = %self.base_name,
            locale = %bundle.locale(),
            "synthesizing enum"
        );

        let mut by_member: BTreeMap<String, String> = BTreeMap::new();
        let mut members = Vec::new();
        for key in bundle.keys() {
            let default_value = bundle.get_string(key)?.to_string();
            let member_name = member_name(key);

            if let Some(first) = by_member.insert(member_name.clone(), key.to_string()) {
                return Err(GenerateError::DuplicateMemberName {
                    base_name: self.base_name.clone(),
                    member: member_name,
                    first,
                    second: key.to_string(),
                });
            }

            members.push(ResourceKeyEntry {
                key: key.to_string(),
                member_name,
                placeholder_count: placeholder_count(&default_value),
                default_value,
            });
        }

        Ok(EnumerationDescription {
            base_name: self.base_name.clone(),
            type_name: type_name(&self.base_name),
            package_name: self.package_name.clone(),
            members,
        })
    }
}

/// Builder for [`ResourceEnumSynthesizer`].
pub struct SynthesizerBuilder {
    base_name: String,
    locale: Option<Locale>,
    control: Option<Arc<dyn FallbackControl>>,
    package_name: String,
}

impl SynthesizerBuilder {
    pub fn locale(mut self, locale: Option<Locale>) -> Self {
        self.locale = locale;
        self
    }

    pub fn fallback_control(mut self, control: Option<Arc<dyn FallbackControl>>) -> Self {
        self.control = control;
        self
    }

    /// Package of the generated enum; empty for the root.
    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    pub fn build(self) -> Result<ResourceEnumSynthesizer, ConfigError> {
        if self.base_name.trim().is_empty() {
            return Err(ConfigError::EmptyBaseName);
        }
        Ok(ResourceEnumSynthesizer {
            base_name: self.base_name,
            locale: self.locale,
            control: self.control,
            package_name: self.package_name,
        })
    }
}

/// Number of `{n}` placeholder occurrences in `value`.
///
/// Repeated indices count once per occurrence: `"{0}{0}"` has two.
pub fn placeholder_count(value: &str) -> usize {
    PLACEHOLDER.find_iter(value).count()
}

/// Type name for a base name: its last segment with the first character
/// upper-cased (`resource.message6` is `Message6`).
pub fn type_name(base_name: &str) -> String {
    let segment = base_name.rsplit('.').next().unwrap_or(base_name);
    let mut chars = segment.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    identifier(&capitalized)
}

/// Variant name for a key: upper-cased, then made a valid identifier.
pub fn member_name(key: &str) -> String {
    identifier(&key.to_uppercase())
}

/// Replace characters that cannot appear in an identifier with `_` and
/// prefix `_` when the first character cannot start one.
///
/// Non-ASCII letters are kept, so keys such as `名前` and `住所` stay distinct.
fn identifier(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| if continues_identifier(c) { c } else { '_' })
        .collect();
    if !name.starts_with(starts_identifier) {
        name.insert(0, '_');
    }
    // `_` and `Self` are reserved.
    if !is_ident(&name) {
        name.insert(0, '_');
    }
    name
}

fn starts_identifier(c: char) -> bool {
    if c.is_ascii() {
        c == '_' || c.is_ascii_alphabetic()
    } else {
        c.is_alphabetic() && is_ident(&format!("{c}_x"))
    }
}

fn continues_identifier(c: char) -> bool {
    if c.is_ascii() {
        c == '_' || c.is_ascii_alphanumeric()
    } else {
        c.is_alphanumeric() && is_ident(&format!("_x{c}"))
    }
}

/// Whether the Rust lexer accepts `text` as a single identifier.
fn is_ident(text: &str) -> bool {
    syn::parse_str::<syn::Ident>(text).is_ok()
}
