use memory_forms::{
    config::field_model::RootConfig,
    engine::controller::resolve_locale,
    locale::messages::Locale,
    page::{
        context::PageContext,
        resolver::{DEFAULT_PAGE, resolve_page_id},
    },
};

// ============================================================================
// Page resolver
// ============================================================================

#[test]
fn resolves_known_keywords() {
    assert_eq!(resolve_page_id("/vision/index.html"), "vision");
    assert_eq!(resolve_page_id("/jp-memory/index.html"), "jp-memory");
    assert_eq!(resolve_page_id("/memory/"), "memory");
}

#[test]
fn resolution_is_case_insensitive() {
    assert_eq!(resolve_page_id("/VISION/"), "vision");
    assert_eq!(resolve_page_id("/JP-Memory/form.html"), "jp-memory");
}

#[test]
fn unmatched_paths_use_default() {
    assert_eq!(resolve_page_id("/"), DEFAULT_PAGE);
    assert_eq!(resolve_page_id(""), DEFAULT_PAGE);
    assert_eq!(resolve_page_id("/about/contact.html"), "memory");
    assert_eq!(resolve_page_id("/jp/memory"), "memory", "keywords match as whole substrings");
}

#[test]
fn earlier_rule_wins_when_several_match() {
    assert_eq!(resolve_page_id("/jp-memory/vision-board"), "vision");
    assert_eq!(resolve_page_id("/vision/jp-memory"), "vision");
}

#[test]
fn context_resolves_its_own_page() {
    let context = PageContext::new("/Vision/share.html")
        .with_lang("zh-TW")
        .with_user_agent("agent/1.0");
    assert_eq!(context.page_id(), "vision");
    assert_eq!(context.lang.as_deref(), Some("zh-TW"));
    assert_eq!(context.user_agent, "agent/1.0");
}

// ============================================================================
// Locale selection
// ============================================================================

#[test]
fn locale_from_language_tags() {
    assert_eq!(Locale::from_tag("zh-TW"), Some(Locale::ZhTw));
    assert_eq!(Locale::from_tag("zh_Hant"), Some(Locale::ZhTw));
    assert_eq!(Locale::from_tag("ja-JP"), Some(Locale::Ja));
    assert_eq!(Locale::from_tag("EN-us"), Some(Locale::En));
    assert_eq!(Locale::from_tag("fr"), None);
    assert_eq!(Locale::from_tag(""), None);
}

#[test]
fn locale_tags_round_trip_through_display() {
    for locale in [Locale::ZhTw, Locale::Ja, Locale::En] {
        assert_eq!(Locale::from_tag(&locale.to_string()), Some(locale));
    }
}

#[test]
fn page_language_beats_site_default() {
    let config = RootConfig::from_json(r#"{ "meta": { "locale": "en" } }"#).unwrap();

    let with_lang = PageContext::new("/memory").with_lang("ja");
    assert_eq!(resolve_locale(&with_lang, &config), Locale::Ja);

    let without_lang = PageContext::new("/memory");
    assert_eq!(resolve_locale(&without_lang, &config), Locale::En);

    let unknown_lang = PageContext::new("/memory").with_lang("de");
    assert_eq!(resolve_locale(&unknown_lang, &config), Locale::En);
}

#[test]
fn locale_defaults_to_traditional_chinese() {
    let config = RootConfig::default();
    assert_eq!(resolve_locale(&PageContext::new("/"), &config), Locale::ZhTw);
}
