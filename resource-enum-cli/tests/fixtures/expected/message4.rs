//! Generated from resource bundle `resource.message4`.
//!
//! Do not edit: rerun `resource-enum generate` instead.

use std::fmt;
use std::sync::Arc;

use resource_enum::{format_message, FallbackControl, Locale, ResolutionStrategy};

static STRATEGY: ResolutionStrategy = ResolutionStrategy::new();

/// Keys of resource bundle `resource.message4`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message4 {
    /// root 41
    ///
    /// parameter count = 0
    MSG41,
    /// root 42 {0}
    ///
    /// parameter count = 1
    MSG42,
}

impl Message4 {
    /// Base name of the bundle this enum was generated from.
    pub const BASE_NAME: &'static str = "resource.message4";

    /// Every variant, in key order.
    pub const ALL: &'static [Message4] = &[Self::MSG41, Self::MSG42];

    /// Bundle key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::MSG41 => "msg41",
            Self::MSG42 => "msg42",
        }
    }

    /// Number of `{n}` placeholders in the default value.
    pub const fn param_count(self) -> usize {
        match self {
            Self::MSG41 => 0,
            Self::MSG42 => 1,
        }
    }

    /// Value compiled in at generation time.
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::MSG41 => "root 41",
            Self::MSG42 => "root 42 {0}",
        }
    }

    /// Override the locale used by [`Self::resolve`].
    ///
    /// The override is process-wide; the last writer wins.
    pub fn set_locale(locale: Option<Locale>) {
        STRATEGY.set_locale(locale);
    }

    /// Override the fallback control used by [`Self::resolve`].
    ///
    /// The override is process-wide; the last writer wins.
    pub fn set_fallback_control(control: Option<Arc<dyn FallbackControl>>) {
        STRATEGY.set_fallback_control(control);
    }

    /// Current localized value, or [`Self::default_value`] if lookup fails.
    pub fn resolve(self) -> String {
        self.resolve_with(&STRATEGY)
    }

    /// Like [`Self::resolve`] with an explicit strategy.
    pub fn resolve_with(self, strategy: &ResolutionStrategy) -> String {
        strategy.resolve(Self::BASE_NAME, self.key(), self.default_value())
    }

    /// Resolve and substitute positional `{n}` placeholders.
    pub fn format(self, args: &[&dyn fmt::Display]) -> String {
        format_message(&self.resolve(), args)
    }
}

impl fmt::Display for Message4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}
