//! Call-time resolution state shared by a generated enum.
//!
//! Every generated enum owns one `static` [`ResolutionStrategy`]. Its locale
//! and fallback control are process-wide override hooks: setting them affects
//! every thread, and the last writer wins. They are meant for bootstrap code
//! and tests. Callers needing an isolated configuration build their own
//! strategy and pass it to the enum's `resolve_with`.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::control::FallbackControl;
use crate::error::BundleResult;
use crate::loader::{loader, BundleLoader};
use crate::locale::Locale;

/// Locale and fallback control used when a generated enum resolves its value.
pub struct ResolutionStrategy {
    locale: RwLock<Option<Locale>>,
    control: RwLock<Option<Arc<dyn FallbackControl>>>,
}

impl ResolutionStrategy {
    /// A strategy with neither locale nor control set.
    pub const fn new() -> Self {
        Self {
            locale: RwLock::new(None),
            control: RwLock::new(None),
        }
    }

    pub fn with_locale(self, locale: Locale) -> Self {
        self.set_locale(Some(locale));
        self
    }

    pub fn with_fallback_control(self, control: Arc<dyn FallbackControl>) -> Self {
        self.set_fallback_control(Some(control));
        self
    }

    /// Set or clear the locale override.
    pub fn set_locale(&self, locale: Option<Locale>) {
        match self.locale.write() {
            Ok(mut guard) => *guard = locale,
            Err(poisoned) => *poisoned.into_inner() = locale,
        }
    }

    /// Set or clear the fallback control.
    pub fn set_fallback_control(&self, control: Option<Arc<dyn FallbackControl>>) {
        match self.control.write() {
            Ok(mut guard) => *guard = control,
            Err(poisoned) => *poisoned.into_inner() = control,
        }
    }

    pub fn locale(&self) -> Option<Locale> {
        match self.locale.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn fallback_control(&self) -> Option<Arc<dyn FallbackControl>> {
        match self.control.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The locale override, or the platform default when none is set.
    pub fn effective_locale(&self) -> Locale {
        self.locale().unwrap_or_else(Locale::default_locale)
    }

    /// Resolve `key` in `base_name` through `loader`, reporting failures.
    pub fn lookup(&self, loader: &BundleLoader, base_name: &str, key: &str) -> BundleResult<String> {
        let locale = self.effective_locale();
        let control = self.fallback_control();
        let bundle = loader.lookup(base_name, Some(&locale), control.as_deref())?;
        bundle.get_string(key).map(str::to_string)
    }

    /// Resolve `key` through the process-wide loader.
    ///
    /// Never fails: any lookup error yields `default_value`.
    pub fn resolve(&self, base_name: &str, key: &str, default_value: &str) -> String {
        self.resolve_in(&loader(), base_name, key, default_value)
    }

    /// Resolve `key` through `loader`, yielding `default_value` on any error.
    pub fn resolve_in(
        &self,
        loader: &BundleLoader,
        base_name: &str,
        key: &str,
        default_value: &str,
    ) -> String {
        match self.lookup(loader, base_name, key) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(%base_name, %key, error = %e, "lookup failed, using compiled default");
                default_value.to_string()
            }
        }
    }
}

impl Default for ResolutionStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionStrategy")
            .field("locale", &self.locale())
            .field("fallback_control", &self.fallback_control().is_some())
            .finish()
    }
}
