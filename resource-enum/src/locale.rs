//! Locale identifiers used to select bundle files.
//!
//! A [`Locale`] is a language, an optional country and an optional variant,
//! rendered the way bundle file suffixes expect them (`ja_JP`, `en`, `en__POSIX`).
//! [`Locale::ROOT`] is the empty locale and selects the base bundle file.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use thiserror::Error;

/// Process-wide override for [`Locale::default_locale`].
static DEFAULT_OVERRIDE: RwLock<Option<Locale>> = RwLock::new(None);

/// Environment variables consulted for the platform default, in priority order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A language/country/variant triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Locale {
    language: Cow<'static, str>,
    country: Cow<'static, str>,
    variant: Cow<'static, str>,
}

/// Error returned when a locale string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid locale '{input}': {message}")]
pub struct LocaleParseError {
    pub input: String,
    pub message: String,
}

impl Locale {
    /// The empty locale; selects the base bundle.
    pub const ROOT: Locale = Locale::from_static("", "", "");
    pub const ENGLISH: Locale = Locale::from_static("en", "", "");
    pub const JAPANESE: Locale = Locale::from_static("ja", "", "");
    pub const ITALIAN: Locale = Locale::from_static("it", "", "");
    pub const US: Locale = Locale::from_static("en", "US", "");
    pub const JAPAN: Locale = Locale::from_static("ja", "JP", "");

    const fn from_static(language: &'static str, country: &'static str, variant: &'static str) -> Self {
        Self {
            language: Cow::Borrowed(language),
            country: Cow::Borrowed(country),
            variant: Cow::Borrowed(variant),
        }
    }

    /// Create a locale for a language (lower-cased).
    pub fn new(language: &str) -> Self {
        Self {
            language: Cow::Owned(language.to_ascii_lowercase()),
            country: Cow::Borrowed(""),
            variant: Cow::Borrowed(""),
        }
    }

    /// Set the country (upper-cased).
    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Cow::Owned(country.to_ascii_uppercase());
        self
    }

    /// Set the variant (kept as given).
    pub fn with_variant(mut self, variant: &str) -> Self {
        self.variant = Cow::Owned(variant.to_string());
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Check whether this is [`Locale::ROOT`].
    pub fn is_root(&self) -> bool {
        self.language.is_empty() && self.country.is_empty() && self.variant.is_empty()
    }

    /// The platform default locale.
    ///
    /// Returns the value installed with [`Locale::set_default`] if any, otherwise
    /// the locale named by `LC_ALL`, `LC_MESSAGES` or `LANG`, otherwise
    /// [`Locale::ROOT`].
    pub fn default_locale() -> Locale {
        let installed = match DEFAULT_OVERRIDE.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        installed.unwrap_or_else(Self::from_environment)
    }

    /// Install (or with `None`, clear) a process-wide default locale.
    pub fn set_default(locale: Option<Locale>) {
        match DEFAULT_OVERRIDE.write() {
            Ok(mut guard) => *guard = locale,
            Err(poisoned) => *poisoned.into_inner() = locale,
        }
    }

    fn from_environment() -> Locale {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .map(|value| Self::from_posix(&value))
            .unwrap_or(Locale::ROOT)
    }

    /// Parse a POSIX locale name such as `ja_JP.UTF-8` or `de_DE@euro`.
    pub fn from_posix(value: &str) -> Locale {
        let name = value.split(['.', '@']).next().unwrap_or_default().trim();
        if name == "C" || name == "POSIX" {
            return Locale::ROOT;
        }
        name.parse().unwrap_or(Locale::ROOT)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::ROOT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return Ok(());
        }
        write!(f, "{}", self.language)?;
        if !self.country.is_empty() || !self.variant.is_empty() {
            write!(f, "_{}", self.country)?;
        }
        if !self.variant.is_empty() {
            write!(f, "_{}", self.variant)?;
        }
        Ok(())
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Locale::ROOT);
        }

        let mut parts = trimmed.splitn(3, ['_', '-']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();
        let variant = parts.next().unwrap_or_default();

        let invalid = |message: &str| LocaleParseError {
            input: s.to_string(),
            message: message.to_string(),
        };
        if !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("language must be alphabetic"));
        }
        if !country.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("country must be alphanumeric"));
        }
        if !variant
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(invalid("variant contains invalid characters"));
        }

        Ok(Locale::new(language)
            .with_country(country)
            .with_variant(variant))
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}
