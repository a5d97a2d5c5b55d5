//! Integration tests for bundle resolution and generated enums.
//!
//! Every test installs `ja_JP` as the platform default and points the
//! process-wide loader at `tests/resources`, so all tests agree on global
//! state.

use std::path::PathBuf;
use std::sync::Arc;

use resource_enum::{
    format_message, BundleError, BundleLoader, FallbackControl, Locale, NoFallbackControl,
    ResolutionStrategy,
};

#[path = "generated/message2.rs"]
mod message2;

use message2::Message2;

fn resources_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources")
}

fn setup() -> BundleLoader {
    Locale::set_default(Some(Locale::JAPAN));
    resource_enum::set_resource_roots([resources_path()]);
    BundleLoader::new([resources_path()])
}

/// Tries English before anything else for Japanese users.
struct EnglishFirst;

impl FallbackControl for EnglishFirst {
    fn candidate_locales(&self, _base_name: &str, locale: &Locale) -> Vec<Locale> {
        if *locale == Locale::JAPAN {
            vec![Locale::ENGLISH, Locale::JAPANESE, Locale::ROOT]
        } else {
            resource_enum::control::default_candidates(locale)
        }
    }
}

// =============================================================================
// Lookup Forms
// =============================================================================

#[test]
fn test_lookup_default_locale_and_control() {
    let loader = setup();
    let bundle = loader.lookup("resource.message2", None, None).unwrap();

    assert_eq!(bundle.locale(), &Locale::JAPANESE);
    assert_eq!(bundle.get_string("greeting").unwrap(), "こんにちは");
}

#[test]
fn test_lookup_explicit_locale() {
    let loader = setup();
    let bundle = loader
        .lookup("resource.message2", Some(&Locale::US), None)
        .unwrap();

    assert_eq!(bundle.locale(), &Locale::ENGLISH);
    assert_eq!(bundle.get_string("farewell").unwrap(), "Goodbye {0}");
}

#[test]
fn test_lookup_custom_control() {
    let loader = setup();
    let bundle = loader
        .lookup("resource.message2", None, Some(&EnglishFirst))
        .unwrap();

    assert_eq!(bundle.get_string("greeting").unwrap(), "Hello");
}

#[test]
fn test_lookup_locale_and_control() {
    let loader = setup();
    let bundle = loader
        .lookup(
            "resource.message2",
            Some(&Locale::ITALIAN),
            Some(&NoFallbackControl),
        )
        .unwrap();

    assert!(bundle.locale().is_root());
    assert_eq!(bundle.get_string("greeting").unwrap(), "Hello from root");
}

// =============================================================================
// Fallback and Failures
// =============================================================================

#[test]
fn test_unmatched_locale_uses_default_locale() {
    let loader = setup();
    let bundle = loader
        .lookup("resource.message2", Some(&Locale::ITALIAN), None)
        .unwrap();

    assert_eq!(bundle.get_string("greeting").unwrap(), "こんにちは");
}

#[test]
fn test_missing_key_falls_through_to_parent() {
    let loader = setup();
    let bundle = loader
        .lookup("resource.partial", Some(&Locale::JAPAN), None)
        .unwrap();

    assert_eq!(bundle.get_string("title").unwrap(), "日本語タイトル");
    assert_eq!(bundle.get_string("footer").unwrap(), "Root footer");
    assert_eq!(bundle.keys().into_iter().collect::<Vec<_>>(), vec!["footer", "title"]);
}

#[test]
fn test_missing_key_error() {
    let loader = setup();
    let bundle = loader.lookup("resource.partial", None, None).unwrap();

    let err = bundle.get_string("absent").unwrap_err();
    assert!(matches!(err, BundleError::MissingKey { .. }));
    assert!(!err.is_not_found());
}

#[test]
fn test_missing_bundle_is_not_found() {
    let loader = setup();
    let err = loader
        .lookup("resource.messagenotexist", Some(&Locale::ROOT), None)
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn test_malformed_bundle_is_parse_error() {
    let loader = setup();
    let err = loader
        .lookup("resource.malformed", Some(&Locale::ROOT), None)
        .unwrap_err();

    assert!(matches!(err, BundleError::Parse { line: 1, .. }));
}

#[test]
fn test_strategy_resolve_in_uses_default_on_failure() {
    let loader = setup();
    let strategy = ResolutionStrategy::new().with_locale(Locale::ENGLISH);

    assert_eq!(
        strategy.resolve_in(&loader, "resource.message2", "greeting", "fallback"),
        "Hello"
    );
    assert_eq!(
        strategy.resolve_in(&loader, "resource.message2", "absent", "fallback"),
        "fallback"
    );
    assert_eq!(
        strategy.resolve_in(&loader, "resource.messagenotexist", "greeting", "fallback"),
        "fallback"
    );
}

// =============================================================================
// Generated Enum
// =============================================================================

#[test]
fn test_generated_constants() {
    assert_eq!(Message2::BASE_NAME, "resource.message2");
    assert_eq!(Message2::ALL, &[Message2::FAREWELL, Message2::GREETING]);
    assert_eq!(Message2::FAREWELL.key(), "farewell");
    assert_eq!(Message2::FAREWELL.param_count(), 1);
    assert_eq!(Message2::GREETING.default_value(), "Hello");
}

#[test]
fn test_generated_resolve_with_strategy() {
    setup();
    let english = ResolutionStrategy::new().with_locale(Locale::ENGLISH);
    let root = ResolutionStrategy::new()
        .with_locale(Locale::ITALIAN)
        .with_fallback_control(Arc::new(NoFallbackControl));

    assert_eq!(Message2::GREETING.resolve_with(&english), "Hello");
    assert_eq!(Message2::GREETING.resolve_with(&root), "Hello from root");
}

#[test]
fn test_generated_resolve_and_format() {
    setup();

    // The only test touching the enum's own overrides.
    assert_eq!(Message2::GREETING.resolve(), "こんにちは");
    assert_eq!(Message2::FAREWELL.format(&[&"Bob"]), "さようならBob");
    assert_eq!(Message2::GREETING.to_string(), "こんにちは");

    Message2::set_locale(Some(Locale::ENGLISH));
    assert_eq!(Message2::FAREWELL.format(&[&"Bob"]), "Goodbye Bob");

    Message2::set_locale(None);
    Message2::set_fallback_control(Some(Arc::new(EnglishFirst)));
    assert_eq!(Message2::GREETING.resolve(), "Hello");

    Message2::set_fallback_control(None);
    assert_eq!(Message2::GREETING.resolve(), "こんにちは");
}

#[test]
fn test_format_message_placeholders() {
    assert_eq!(
        format_message("{1} before {0}, {0} again", &[&"a", &2]),
        "2 before a, a again"
    );
    assert_eq!(format_message("no args {0}", &[]), "no args {0}");
}
