//! Resolved resource bundles.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{BundleError, BundleResult};
use crate::locale::Locale;
use crate::properties::Properties;

static ROOT_LOCALE: Locale = Locale::ROOT;

/// A bundle resolved for one base name and locale.
///
/// Holds the most specific matching file followed by its parents
/// (for `ja_JP`: `ja_JP`, `ja`, root, whichever exist). Key lookup walks the
/// chain from child to parent.
#[derive(Debug, Clone)]
pub struct ResourceBundle {
    base_name: String,
    chain: Vec<(Locale, Arc<Properties>)>,
}

impl ResourceBundle {
    /// Build a bundle from an ordered, non-empty chain of files.
    pub(crate) fn new(base_name: impl Into<String>, chain: Vec<(Locale, Arc<Properties>)>) -> Self {
        debug_assert!(!chain.is_empty(), "bundle chain must not be empty");
        Self {
            base_name: base_name.into(),
            chain,
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Locale of the most specific file in the chain.
    pub fn locale(&self) -> &Locale {
        self.chain
            .first()
            .map(|(locale, _)| locale)
            .unwrap_or(&ROOT_LOCALE)
    }

    /// Locales of every file in the chain, child first.
    pub fn chain_locales(&self) -> impl Iterator<Item = &Locale> {
        self.chain.iter().map(|(locale, _)| locale)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.chain.iter().find_map(|(_, props)| props.get(key))
    }

    /// Look up a key, failing with [`BundleError::MissingKey`] if no file in
    /// the chain defines it.
    pub fn get_string(&self, key: &str) -> BundleResult<&str> {
        self.get(key)
            .ok_or_else(|| BundleError::missing_key(&self.base_name, key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Union of the keys of every file in the chain.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.chain
            .iter()
            .flat_map(|(_, props)| props.keys())
            .collect()
    }
}
