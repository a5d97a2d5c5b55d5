//! Fallback-control strategies.
//!
//! A [`FallbackControl`] decides which locales are tried, and in what order,
//! when a bundle is resolved, and which locale to retry with when nothing
//! more specific than the base bundle exists.

use std::fmt;

use crate::locale::Locale;

/// Strategy governing candidate locales during bundle resolution.
///
/// Both methods have defaults matching [`DefaultControl`]; implementors
/// usually override one of them.
///
/// # Example
///
/// ```rust
/// use resource_enum::{FallbackControl, Locale};
///
/// /// Prefers English bundles for Japanese users.
/// struct EnglishFirst;
///
/// impl FallbackControl for EnglishFirst {
///     fn candidate_locales(&self, base_name: &str, locale: &Locale) -> Vec<Locale> {
///         if *locale == Locale::JAPAN {
///             vec![Locale::ENGLISH, locale.clone(), Locale::JAPANESE, Locale::ROOT]
///         } else {
///             resource_enum::control::default_candidates(locale)
///         }
///     }
/// }
/// ```
pub trait FallbackControl: Send + Sync {
    /// Locales to try for `locale`, most specific first.
    fn candidate_locales(&self, _base_name: &str, locale: &Locale) -> Vec<Locale> {
        default_candidates(locale)
    }

    /// Locale to retry with when only the base bundle matched `locale`.
    fn fallback_locale(&self, _base_name: &str, locale: &Locale) -> Option<Locale> {
        let default = Locale::default_locale();
        (default != *locale).then_some(default)
    }
}

impl fmt::Debug for dyn FallbackControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FallbackControl")
    }
}

/// The standard strategy: truncate the locale part by part, then fall back to
/// the platform default locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultControl;

impl FallbackControl for DefaultControl {}

/// Like [`DefaultControl`] but never retries with the platform default locale,
/// so an unmatched locale resolves to the base bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallbackControl;

impl FallbackControl for NoFallbackControl {
    fn fallback_locale(&self, _base_name: &str, _locale: &Locale) -> Option<Locale> {
        None
    }
}

/// Candidate list for `locale`: `lang_COUNTRY_variant`, `lang_COUNTRY`,
/// `lang`, then [`Locale::ROOT`], skipping duplicates of empty parts.
pub fn default_candidates(locale: &Locale) -> Vec<Locale> {
    let mut candidates = Vec::with_capacity(4);
    let language = locale.language();
    let country = locale.country();

    if !locale.variant().is_empty() {
        candidates.push(locale.clone());
    }
    if !country.is_empty() {
        candidates.push(Locale::new(language).with_country(country));
    }
    if !language.is_empty() {
        candidates.push(Locale::new(language));
    }
    candidates.push(Locale::ROOT);
    candidates
}
