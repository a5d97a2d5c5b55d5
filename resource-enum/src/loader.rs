//! Bundle lookup over one or more resource roots.
//!
//! Base name `resource.message` with locale `ja_JP` maps to
//! `<root>/resource/message_ja_JP.properties`; the base bundle is
//! `<root>/resource/message.properties`. Roots are searched in order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::bundle::ResourceBundle;
use crate::control::{DefaultControl, FallbackControl};
use crate::error::{BundleError, BundleResult};
use crate::locale::Locale;
use crate::properties::Properties;

/// Environment variable listing resource roots for [`loader`].
pub const RESOURCE_PATH_ENV: &str = "RESOURCE_ENUM_PATH";

/// Root used by [`loader`] when nothing else is configured.
pub const DEFAULT_RESOURCE_ROOT: &str = "resources";

const BUNDLE_EXTENSION: &str = "properties";

static GLOBAL_LOADER: RwLock<Option<Arc<BundleLoader>>> = RwLock::new(None);

/// Resolves bundles from `.properties` files.
///
/// Parsed files are cached per path for the lifetime of the loader,
/// including the fact that a file does not exist.
#[derive(Debug, Default)]
pub struct BundleLoader {
    roots: Vec<PathBuf>,
    cache: RwLock<HashMap<PathBuf, Option<Arc<Properties>>>>,
}

impl BundleLoader {
    /// Create a loader searching the given roots in order.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Create a loader from [`RESOURCE_PATH_ENV`], or [`DEFAULT_RESOURCE_ROOT`].
    pub fn from_env() -> Self {
        match std::env::var_os(RESOURCE_PATH_ENV) {
            Some(paths) if !paths.is_empty() => Self::new(std::env::split_paths(&paths)),
            _ => Self::new([DEFAULT_RESOURCE_ROOT]),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Drop every cached file.
    pub fn clear_cache(&self) {
        match self.cache.write() {
            Ok(mut cache) => cache.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    /// Relative file path for a base name and locale.
    pub fn bundle_file_name(base_name: &str, locale: &Locale) -> PathBuf {
        let stem = base_name.replace('.', "/");
        let file = if locale.is_root() {
            format!("{stem}.{BUNDLE_EXTENSION}")
        } else {
            format!("{stem}_{locale}.{BUNDLE_EXTENSION}")
        };
        PathBuf::from(file)
    }

    /// Resolve with the default locale and default control.
    pub fn get_bundle(&self, base_name: &str) -> BundleResult<ResourceBundle> {
        self.resolve(base_name, &Locale::default_locale(), &DefaultControl)
    }

    /// Resolve for a locale with the default control.
    pub fn get_bundle_for_locale(
        &self,
        base_name: &str,
        locale: &Locale,
    ) -> BundleResult<ResourceBundle> {
        self.resolve(base_name, locale, &DefaultControl)
    }

    /// Resolve for the default locale with a custom control.
    pub fn get_bundle_with_control(
        &self,
        base_name: &str,
        control: &dyn FallbackControl,
    ) -> BundleResult<ResourceBundle> {
        self.resolve(base_name, &Locale::default_locale(), control)
    }

    /// Resolve for a locale with a custom control.
    pub fn get_bundle_for_locale_with_control(
        &self,
        base_name: &str,
        locale: &Locale,
        control: &dyn FallbackControl,
    ) -> BundleResult<ResourceBundle> {
        self.resolve(base_name, locale, control)
    }

    /// Pick the lookup form matching which of `locale` and `control` are given.
    pub fn lookup(
        &self,
        base_name: &str,
        locale: Option<&Locale>,
        control: Option<&dyn FallbackControl>,
    ) -> BundleResult<ResourceBundle> {
        match (locale, control) {
            (None, None) => self.get_bundle(base_name),
            (Some(locale), None) => self.get_bundle_for_locale(base_name, locale),
            (None, Some(control)) => self.get_bundle_with_control(base_name, control),
            (Some(locale), Some(control)) => {
                self.get_bundle_for_locale_with_control(base_name, locale, control)
            }
        }
    }

    fn resolve(
        &self,
        base_name: &str,
        locale: &Locale,
        control: &dyn FallbackControl,
    ) -> BundleResult<ResourceBundle> {
        let mut chain = self.find_chain(base_name, locale, control)?;

        // Only the base bundle (or nothing) matched: retry with the fallback locale.
        if !locale.is_root() && chain.iter().all(|(found, _)| found.is_root()) {
            let fallback = control
                .fallback_locale(base_name, locale)
                .filter(|fallback| fallback != locale);
            if let Some(fallback) = fallback {
                let alternative = self.find_chain(base_name, &fallback, control)?;
                if chain.is_empty() || alternative.iter().any(|(found, _)| !found.is_root()) {
                    tracing::trace!(%base_name, %locale, %fallback, "using fallback locale");
                    chain = alternative;
                }
            }
        }

        if chain.is_empty() {
            return Err(BundleError::not_found(base_name, locale));
        }

        let bundle = ResourceBundle::new(base_name, chain);
        tracing::debug!(
            %base_name,
            requested = %locale,
            resolved = %bundle.locale(),
            "resolved bundle"
        );
        Ok(bundle)
    }

    fn find_chain(
        &self,
        base_name: &str,
        locale: &Locale,
        control: &dyn FallbackControl,
    ) -> BundleResult<Vec<(Locale, Arc<Properties>)>> {
        let mut chain = Vec::new();
        for candidate in control.candidate_locales(base_name, locale) {
            if chain.iter().any(|(found, _)| *found == candidate) {
                continue;
            }
            if let Some(props) = self.load_file(base_name, &candidate)? {
                chain.push((candidate, props));
            }
        }
        Ok(chain)
    }

    fn load_file(&self, base_name: &str, locale: &Locale) -> BundleResult<Option<Arc<Properties>>> {
        let relative = Self::bundle_file_name(base_name, locale);
        for root in &self.roots {
            let path = root.join(&relative);
            if let Some(cached) = self.cached(&path) {
                match cached {
                    Some(props) => return Ok(Some(props)),
                    None => continue,
                }
            }

            let loaded = if path.is_file() {
                Some(Arc::new(read_properties(&path)?))
            } else {
                None
            };
            self.store(path, loaded.clone());
            if loaded.is_some() {
                return Ok(loaded);
            }
        }
        Ok(None)
    }

    fn cached(&self, path: &Path) -> Option<Option<Arc<Properties>>> {
        match self.cache.read() {
            Ok(cache) => cache.get(path).cloned(),
            Err(poisoned) => poisoned.into_inner().get(path).cloned(),
        }
    }

    fn store(&self, path: PathBuf, props: Option<Arc<Properties>>) {
        match self.cache.write() {
            Ok(mut cache) => {
                cache.insert(path, props);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(path, props);
            }
        }
    }
}

fn read_properties(path: &Path) -> BundleResult<Properties> {
    tracing::trace!(path = %path.display(), "reading bundle file");
    let content = std::fs::read_to_string(path).map_err(|e| BundleError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Properties::parse(&content).map_err(|e| BundleError::Parse {
        path: path.to_path_buf(),
        line: e.line,
        message: e.message,
    })
}

/// The process-wide loader used by generated enums.
///
/// Created on first use from [`BundleLoader::from_env`] unless
/// [`set_resource_roots`] installed one.
pub fn loader() -> Arc<BundleLoader> {
    let installed = match GLOBAL_LOADER.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    if let Some(loader) = installed {
        return loader;
    }

    let mut guard = match GLOBAL_LOADER.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard
        .get_or_insert_with(|| Arc::new(BundleLoader::from_env()))
        .clone()
}

/// Replace the process-wide loader with one searching `roots`.
pub fn set_resource_roots<I, P>(roots: I)
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let loader = Arc::new(BundleLoader::new(roots));
    match GLOBAL_LOADER.write() {
        Ok(mut guard) => *guard = Some(loader),
        Err(poisoned) => *poisoned.into_inner() = Some(loader),
    }
}
