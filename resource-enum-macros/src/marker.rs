//! Validation and pass-through for the two marker attributes.

use darling::ast::NestedMeta;
use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, ImplItem, Item, ItemConst, Lit, TraitItem};

const MEMBER_MARKER: &str = "target_resource";

/// Arguments of `#[generate_resource_enum(...)]`.
#[derive(Debug, Default, FromMeta)]
pub(crate) struct DeclarationArgs {
    /// Package the generated enums are placed under.
    #[darling(default)]
    pub base_package: Option<String>,

    /// Package appended to the declaration's own package.
    #[darling(default)]
    pub sub_package: Option<String>,
}

impl DeclarationArgs {
    fn parse(args: TokenStream) -> darling::Result<Self> {
        let items = NestedMeta::parse_meta_list(args)?;
        let parsed = Self::from_list(&items)?;
        let mut errors = darling::Error::accumulator();
        for (name, value) in [
            ("base_package", &parsed.base_package),
            ("sub_package", &parsed.sub_package),
        ] {
            if let Some(value) = value {
                if !is_package_path(value) {
                    errors.push(
                        darling::Error::custom(format!(
                            "`{value}` is not a dot-separated package path"
                        ))
                        .at(name),
                    );
                }
            }
        }
        errors.finish_with(parsed)
    }
}

/// Empty, or `seg(.seg)*` where each segment is an identifier.
fn is_package_path(value: &str) -> bool {
    value.is_empty()
        || value.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}

fn is_member_marker(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == MEMBER_MARKER)
}

/// Require a string literal initializer.
fn check_literal(expr: &Expr) -> syn::Result<()> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(_), ..
        }) => Ok(()),
        other => Err(syn::Error::new(
            other.span(),
            "#[target_resource] constants must be initialised with a string literal",
        )),
    }
}

/// Drop `#[target_resource]` from `attrs`, reporting whether one was present.
fn strip_marker(attrs: &mut Vec<Attribute>) -> bool {
    let before = attrs.len();
    attrs.retain(|attr| !is_member_marker(attr));
    attrs.len() != before
}

fn strip_members(item: &mut Item) -> syn::Result<()> {
    match item {
        Item::Mod(module) => {
            let Some((_, items)) = module.content.as_mut() else {
                return Err(syn::Error::new(
                    module.span(),
                    "#[generate_resource_enum] requires an inline module body",
                ));
            };
            for inner in items {
                if let Item::Const(constant) = inner {
                    if strip_marker(&mut constant.attrs) {
                        check_literal(&constant.expr)?;
                    }
                }
            }
            Ok(())
        }
        Item::Impl(block) => {
            if let Some((_, path, _)) = &block.trait_ {
                return Err(syn::Error::new(
                    path.span(),
                    "#[generate_resource_enum] requires an inherent impl block",
                ));
            }
            for inner in &mut block.items {
                if let ImplItem::Const(constant) = inner {
                    if strip_marker(&mut constant.attrs) {
                        check_literal(&constant.expr)?;
                    }
                }
            }
            Ok(())
        }
        Item::Trait(declaration) => {
            for inner in &mut declaration.items {
                if let TraitItem::Const(constant) = inner {
                    if strip_marker(&mut constant.attrs) {
                        match &constant.default {
                            Some((_, expr)) => check_literal(expr)?,
                            None => {
                                return Err(syn::Error::new(
                                    constant.ident.span(),
                                    "#[target_resource] constants must have a value",
                                ))
                            }
                        }
                    }
                }
            }
            Ok(())
        }
        other => Err(syn::Error::new(
            other.span(),
            "#[generate_resource_enum] can only be applied to an inline `mod`, an inherent `impl` or a `trait`",
        )),
    }
}

pub(crate) fn expand_declaration(args: TokenStream, item: TokenStream) -> TokenStream {
    if let Err(e) = DeclarationArgs::parse(args) {
        return e.write_errors();
    }

    let mut item = match syn::parse2::<Item>(item) {
        Ok(item) => item,
        Err(e) => return e.into_compile_error(),
    };

    match strip_members(&mut item) {
        Ok(()) => item.into_token_stream(),
        Err(e) => e.into_compile_error(),
    }
}

pub(crate) fn expand_member(args: TokenStream, item: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(args.span(), "#[target_resource] takes no arguments")
            .into_compile_error();
    }

    match syn::parse2::<ItemConst>(item.clone()) {
        Ok(constant) => match check_literal(&constant.expr) {
            Ok(()) => constant.into_token_stream(),
            Err(e) => e.into_compile_error(),
        },
        Err(_) => syn::Error::new(
            item.span(),
            "#[target_resource] expects a `const` initialised with a string literal",
        )
        .into_compile_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn is_error(tokens: &TokenStream) -> bool {
        tokens.to_string().contains("compile_error")
    }

    #[test]
    fn test_declaration_args_parse() {
        let args = DeclarationArgs::parse(quote!(base_package = "app.i18n", sub_package = "web"))
            .unwrap();
        assert_eq!(args.base_package.as_deref(), Some("app.i18n"));
        assert_eq!(args.sub_package.as_deref(), Some("web"));

        let empty = DeclarationArgs::parse(quote!()).unwrap();
        assert!(empty.base_package.is_none());
        assert!(empty.sub_package.is_none());
    }

    #[test]
    fn test_declaration_args_reject_unknown_and_invalid() {
        assert!(DeclarationArgs::parse(quote!(package = "x")).is_err());
        assert!(DeclarationArgs::parse(quote!(base_package = "app..web")).is_err());
        assert!(DeclarationArgs::parse(quote!(sub_package = "9lives")).is_err());
        assert!(DeclarationArgs::parse(quote!(sub_package = "")).is_ok());
    }

    #[test]
    fn test_module_markers_stripped() {
        let out = expand_declaration(
            quote!(sub_package = "messages"),
            quote! {
                mod app {
                    #[target_resource]
                    const MESSAGES: &str = "resource.message";
                    const OTHER: u32 = 1;
                }
            },
        );
        let text = out.to_string();
        assert!(!is_error(&out));
        assert!(!text.contains("target_resource"));
        assert!(text.contains("\"resource.message\""));
        assert!(text.contains("OTHER"));
    }

    #[test]
    fn test_impl_and_trait_accepted() {
        let impl_out = expand_declaration(
            quote!(),
            quote! {
                impl Holder {
                    #[resource_enum::target_resource]
                    const MESSAGES: &'static str = "resource.message";
                }
            },
        );
        assert!(!is_error(&impl_out));
        assert!(!impl_out.to_string().contains("target_resource"));

        let trait_out = expand_declaration(
            quote!(),
            quote! {
                trait Holder {
                    #[target_resource]
                    const MESSAGES: &'static str = "resource.message";
                }
            },
        );
        assert!(!is_error(&trait_out));
    }

    #[test]
    fn test_invalid_kinds_rejected() {
        assert!(is_error(&expand_declaration(quote!(), quote!(struct Holder;))));
        assert!(is_error(&expand_declaration(quote!(), quote!(mod app;))));
        assert!(is_error(&expand_declaration(
            quote!(),
            quote!(impl Display for Holder {})
        )));
    }

    #[test]
    fn test_non_literal_member_rejected() {
        let out = expand_declaration(
            quote!(),
            quote! {
                mod app {
                    #[target_resource]
                    const MESSAGES: &str = concat!("resource", ".message");
                }
            },
        );
        assert!(is_error(&out));

        let trait_out = expand_declaration(
            quote!(),
            quote! {
                trait Holder {
                    #[target_resource]
                    const MESSAGES: &'static str;
                }
            },
        );
        assert!(is_error(&trait_out));
    }

    #[test]
    fn test_member_marker_alone() {
        let ok = expand_member(quote!(), quote!(const M: &str = "resource.message";));
        assert!(!is_error(&ok));

        assert!(is_error(&expand_member(
            quote!(extra),
            quote!(const M: &str = "resource.message";)
        )));
        assert!(is_error(&expand_member(quote!(), quote!(fn nope() {}))));
        assert!(is_error(&expand_member(quote!(), quote!(const M: u8 = 1;))));
    }
}
