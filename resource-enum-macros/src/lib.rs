//! # resource-enum-macros
//!
//! Marker attributes read by the `resource-enum` generator.
//!
//! The attributes do not generate code themselves. They validate their
//! arguments at compile time and pass the item through, so a marked
//! declaration compiles exactly as written while the CLI discovers it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use resource_enum::generate_resource_enum;
//!
//! #[generate_resource_enum(base_package = "i18n", sub_package = "web")]
//! mod messages {
//!     #[target_resource]
//!     const MESSAGES: &str = "resource.message";
//!
//!     #[target_resource]
//!     const ERRORS: &str = "resource.errors";
//! }
//! ```
//!
//! ## Attributes
//!
//! - `#[generate_resource_enum]` - on an inline `mod`, an inherent `impl`
//!   block or a `trait`. Optional `base_package = "..."` and
//!   `sub_package = "..."` pick where the generated enums are placed.
//!   Inner `#[target_resource]` markers are stripped.
//! - `#[target_resource]` - on a `const` initialised with a string literal
//!   naming a resource bundle (`"resource.message"`).

use proc_macro::TokenStream;

mod marker;

/// Mark a declaration whose `#[target_resource]` constants name resource
/// bundles to generate enums for.
#[proc_macro_attribute]
pub fn generate_resource_enum(args: TokenStream, item: TokenStream) -> TokenStream {
    marker::expand_declaration(args.into(), item.into()).into()
}

/// Mark a `const` string naming a resource bundle.
#[proc_macro_attribute]
pub fn target_resource(args: TokenStream, item: TokenStream) -> TokenStream {
    marker::expand_member(args.into(), item.into()).into()
}
