use memory_forms::dom::{
    document::{Document, FormScope, SubmitButton},
    selector::{Selectable, Selector, SelectorError},
    static_form::StaticDocument,
};

use crate::common::fixtures::{bound, page};

mod common;

// ============================================================================
// Selector parsing and matching
// ============================================================================

struct El {
    tag: &'static str,
    id: Option<&'static str>,
    name: Option<&'static str>,
    input_type: Option<&'static str>,
    classes: Vec<&'static str>,
    checked: bool,
}

impl El {
    fn input(id: &'static str) -> Self {
        El {
            tag: "input",
            id: Some(id),
            name: None,
            input_type: Some("text"),
            classes: vec![],
            checked: false,
        }
    }
}

impl Selectable for El {
    fn tag(&self) -> &str {
        self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id,
            "name" => self.name,
            "type" => self.input_type,
            _ => None,
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    fn is_checked(&self) -> bool {
        self.checked
    }
}

#[test]
fn id_tag_and_class_selectors() {
    let mut el = El::input("email");
    el.classes = vec!["field", "wide"];

    assert!(Selector::parse("#email").unwrap().matches(&el));
    assert!(Selector::parse("input#email").unwrap().matches(&el));
    assert!(Selector::parse("INPUT").unwrap().matches(&el));
    assert!(Selector::parse("*").unwrap().matches(&el));
    assert!(Selector::parse(".field.wide").unwrap().matches(&el));
    assert!(!Selector::parse(".field.narrow").unwrap().matches(&el));
    assert!(!Selector::parse("textarea#email").unwrap().matches(&el));
    assert!(!Selector::parse("#name").unwrap().matches(&el));
}

#[test]
fn attribute_selectors_with_and_without_quotes() {
    let mut el = El::input("visit-1");
    el.name = Some("visit");
    el.input_type = Some("radio");

    assert!(Selector::parse("input[name=visit]").unwrap().matches(&el));
    assert!(Selector::parse("input[name=\"visit\"]").unwrap().matches(&el));
    assert!(Selector::parse("[type='radio'][name=visit]").unwrap().matches(&el));
    assert!(Selector::parse("[name]").unwrap().matches(&el));
    assert!(!Selector::parse("[placeholder]").unwrap().matches(&el));
    assert!(!Selector::parse("[name=other]").unwrap().matches(&el));
}

#[test]
fn checked_pseudo_class() {
    let mut el = El::input("consent");
    assert!(!Selector::parse("#consent:checked").unwrap().matches(&el));
    el.checked = true;
    assert!(Selector::parse("#consent:checked").unwrap().matches(&el));
    assert!(Selector::parse("#consent").unwrap().checked().matches(&el));
}

#[test]
fn selector_groups_match_any_alternative() {
    let el = El::input("story");
    let selector: Selector = "#nickname, #story".parse().unwrap();
    assert!(selector.matches(&el));
}

#[test]
fn commas_inside_attribute_values_do_not_split_groups() {
    let mut el = El::input("area");
    el.name = Some("north,south");

    let quoted: Selector = "input[name=\"north,south\"], #other".parse().unwrap();
    assert!(quoted.matches(&el));
    let single: Selector = "[name='north,south']".parse().unwrap();
    assert!(single.matches(&el));
    assert!(!Selector::parse("[name=\"north\"]").unwrap().matches(&el));
}

#[test]
fn unsupported_syntax_is_an_error() {
    assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
    assert_eq!(Selector::parse("#a,"), Err(SelectorError::Empty));
    assert!(matches!(Selector::parse("form #a"), Err(SelectorError::Unsupported(_))));
    assert!(matches!(Selector::parse("input:focus"), Err(SelectorError::Unsupported(_))));
    assert!(matches!(Selector::parse("#"), Err(SelectorError::Unsupported(_))));
    assert_eq!(
        Selector::parse("input[name=visit"),
        Err(SelectorError::UnterminatedAttribute)
    );
}

// ============================================================================
// StaticDocument
// ============================================================================

#[test]
fn fixture_context_comes_from_page() {
    let document = page("memory_page.yaml");
    let context = document.context();
    assert_eq!(context.path, "/memory/index.html");
    assert_eq!(context.lang.as_deref(), Some("en"));
    assert_eq!(context.user_agent, "Mozilla/5.0 (fixture)");
}

#[test]
fn form_lookup_picks_the_matching_form() {
    let document = page("memory_page.yaml");
    let (form, button) = bound(&document, "#memoryForm", "button[type=submit]");

    assert_eq!(button.label(), "Send");
    assert!(form.query("#name").is_some());
    assert!(form.query("#newsletterEmail").is_none(), "lookups are scoped to the form");
}

#[test]
fn missing_or_invalid_selectors_find_nothing() {
    let document = page("memory_page.yaml");
    assert!(document.form("#nope").is_none());
    assert!(document.form("form > #memoryForm").is_none());

    let (form, _) = bound(&document, "#memoryForm", "button");
    assert!(document.submit_button(&form, "#missing").is_none());
    assert!(form.query("input::weird").is_none());
}

#[test]
fn form_classes_and_button_ids_are_matchable() {
    let document = page("vision_page.yaml");
    let (_, button) = bound(&document, "form.vision-form", "#visionSubmit");
    assert_eq!(button.label(), "送出");

    let (_, first_button) = bound(&document, "form.card", "button");
    assert_eq!(first_button.label(), "清除", "first matching button wins");
}

#[test]
fn radio_groups_keep_a_single_checked_option() {
    let document = page("vision_page.yaml");
    let (form, _) = bound(&document, "#visionForm", "#visionSubmit");

    assert!(form.set_checked("#visit-first", true));
    assert!(form.set_checked("#visit-again", true));

    let checked = form.query_checked("input[name=visit]").unwrap();
    assert_eq!(checked.id.as_deref(), Some("visit-again"));
    assert!(!form.query("#visit-first").unwrap().checked);
}

#[test]
fn reset_restores_initial_values() {
    let document = page("vision_page.yaml");
    let (form, _) = bound(&document, "#visionForm", "#visionSubmit");

    form.set_value("#nickname", "Yuki");
    form.set_checked("#consent", true);
    assert_eq!(form.query("#nickname").unwrap().value, "Yuki");

    form.reset();

    assert_eq!(form.query("#nickname").unwrap().value, "");
    assert!(!form.query("#consent").unwrap().checked);
    // Radio values come back too
    assert_eq!(form.query("#visit-first").unwrap().value, "first");
}

#[test]
fn handles_share_page_state() {
    let document = page("memory_page.yaml");
    let (form, button) = bound(&document, "#memoryForm", "button");
    let (again, button_again) = bound(&document, "#memoryForm", "button");

    form.set_value("#email", "a@b.co");
    button.set_disabled(true);

    assert_eq!(again.query("#email").unwrap().value, "a@b.co");
    assert!(button_again.is_disabled());
}

#[test]
fn setters_report_missing_controls() {
    let document = page("memory_page.yaml");
    let (form, _) = bound(&document, "#memoryForm", "button");
    assert!(!form.set_value("#nope", "x"));
    assert!(!form.set_checked("#nope", true));
    assert!(!form.set_value("bad selector", "x"));
}

#[test]
fn fixtures_parse_from_inline_yaml() {
    let yaml = r#"
path: /memory
forms:
  - id: f
    controls:
      - { tag: textarea, name: story, value: "  hello  ", attrs: { data-kind: long } }
    buttons:
      - { label: Go, disabled: true }
"#;
    let document = StaticDocument::from_yaml(yaml).unwrap();
    assert!(document.context().lang.is_none());

    let (form, button) = bound(&document, "#f", "button");
    assert!(button.is_disabled());
    let story = form.query("textarea[data-kind=long]").unwrap();
    assert_eq!(story.value, "  hello  ");
    assert_eq!(story.id, None);
    assert_eq!(form.controls().len(), 1);
}
