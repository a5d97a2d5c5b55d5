//! # resource-enum
//!
//! Runtime support for enums generated from localized `.properties` resource
//! bundles.
//!
//! The `resource-enum` CLI scans Rust sources for declarations marked with
//! `#[generate_resource_enum]`, reads the bundle named by each
//! `#[target_resource]` constant and writes one enum per bundle. Every
//! variant mirrors a bundle key and carries the key's default text and its
//! placeholder count. This crate is what the generated code links against.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resource_enum::generate_resource_enum;
//!
//! #[generate_resource_enum(sub_package = "messages")]
//! mod app {
//!     #[target_resource]
//!     const MESSAGES: &str = "resource.message";
//! }
//!
//! // After `resource-enum generate`, `app::messages::Message` exists:
//! let text = Message::MSG332.format(&[&"a", &"b"]);
//! ```
//!
//! ## Resolution
//!
//! A generated value is looked up again every time it is displayed:
//!
//! 1. the locale is the enum's override if set, otherwise
//!    [`Locale::default_locale`];
//! 2. the bundle is resolved by the process-wide [`loader`] with the enum's
//!    [`FallbackControl`] if one is set;
//! 3. any failure yields the default text compiled into the enum.
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `derive` | Re-export the marker attributes | ✅ |
//! | `serde` | `Serialize`/`Deserialize` for [`Locale`] as a string | ❌ |

pub mod bundle;
pub mod control;
pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod properties;
pub mod strategy;

pub use bundle::ResourceBundle;
pub use control::{DefaultControl, FallbackControl, NoFallbackControl};
pub use error::{BundleError, BundleResult};
pub use format::format_message;
pub use loader::{loader, set_resource_roots, BundleLoader};
pub use locale::{Locale, LocaleParseError};
pub use properties::Properties;
pub use strategy::ResolutionStrategy;

#[cfg(feature = "derive")]
pub use resource_enum_macros::{generate_resource_enum, target_resource};
