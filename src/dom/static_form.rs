use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::document::{ControlState, Document, FormScope, SubmitButton};
use crate::dom::selector::{Selectable, Selector};
use crate::page::context::PageContext;

// ============================================================================
// Page fixtures (YAML or JSON) describing a rendered page
// ============================================================================

/// Attributes shared by every element kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Any other attribute, e.g. `data-role`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
}

impl ElementAttrs {
    fn get(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "name" => self.name.as_deref(),
            "type" => self.input_type.as_deref(),
            _ => self.attrs.get(name).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlFixture {
    #[serde(default = "default_control_tag")]
    pub tag: String,
    #[serde(flatten)]
    pub attrs: ElementAttrs,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonFixture {
    #[serde(flatten)]
    pub attrs: ElementAttrs,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFixture {
    #[serde(flatten)]
    pub attrs: ElementAttrs,
    #[serde(default)]
    pub controls: Vec<ControlFixture>,
    #[serde(default)]
    pub buttons: Vec<ButtonFixture>,
}

/// A whole page: where it lives, its language and its forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFixture {
    pub path: String,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub forms: Vec<FormFixture>,
}

fn default_control_tag() -> String {
    "input".to_string()
}

/// Borrowed view used for selector matching.
struct ElementView<'a> {
    tag: &'a str,
    attrs: &'a ElementAttrs,
    value: Option<&'a str>,
    checked: bool,
}

impl Selectable for ElementView<'_> {
    fn tag(&self) -> &str {
        self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "value" => self.value,
            "class" => None,
            _ => self.attrs.get(name),
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.attrs.class.iter().any(|c| c == class)
    }

    fn is_checked(&self) -> bool {
        self.checked
    }
}

impl ControlFixture {
    fn view(&self) -> ElementView<'_> {
        ElementView {
            tag: &self.tag,
            attrs: &self.attrs,
            value: Some(&self.value),
            checked: self.checked,
        }
    }

    fn state(&self) -> ControlState {
        ControlState {
            id: self.attrs.id.clone(),
            value: self.value.clone(),
            checked: self.checked,
        }
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(s) => Some(s),
        Err(e) => {
            debug!(selector, error = %e, "selector matches nothing");
            None
        }
    }
}

// ============================================================================
// In-memory document
// ============================================================================

#[derive(Debug)]
struct FormState {
    form: FormFixture,
    initial: Vec<ControlFixture>,
}

/// A page held in memory, built from a [`PageFixture`].
#[derive(Debug, Clone)]
pub struct StaticDocument {
    context: PageContext,
    forms: Vec<Arc<Mutex<FormState>>>,
}

impl StaticDocument {
    pub fn from_fixture(fixture: PageFixture) -> Self {
        let mut context = PageContext::new(fixture.path);
        context.lang = fixture.lang;
        context.user_agent = fixture.user_agent.unwrap_or_default();

        let forms = fixture
            .forms
            .into_iter()
            .map(|form| {
                let initial = form.controls.clone();
                Arc::new(Mutex::new(FormState { form, initial }))
            })
            .collect();

        Self { context, forms }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let fixture: PageFixture = serde_yaml::from_str(yaml)?;
        Ok(Self::from_fixture(fixture))
    }

    /// Load a fixture file. JSON is accepted too, being a subset of YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }
}

impl Document for StaticDocument {
    type Form = StaticForm;
    type Button = StaticButton;

    fn form(&self, selector: &str) -> Option<StaticForm> {
        let selector = parse_selector(selector)?;
        self.forms
            .iter()
            .find(|state| {
                let state = lock(state);
                selector.matches(&ElementView {
                    tag: "form",
                    attrs: &state.form.attrs,
                    value: None,
                    checked: false,
                })
            })
            .map(|state| StaticForm {
                state: Arc::clone(state),
            })
    }

    fn submit_button(&self, form: &StaticForm, selector: &str) -> Option<StaticButton> {
        let selector = parse_selector(selector)?;
        let index = form.lock().form.buttons.iter().position(|b| {
            selector.matches(&ElementView {
                tag: "button",
                attrs: &b.attrs,
                value: None,
                checked: false,
            })
        })?;

        Some(StaticButton {
            state: Arc::clone(&form.state),
            index,
        })
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a form inside a [`StaticDocument`].
#[derive(Debug, Clone)]
pub struct StaticForm {
    state: Arc<Mutex<FormState>>,
}

impl StaticForm {
    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock(&self.state)
    }

    /// Type into the first control matching `selector`. Returns false if none matched.
    pub fn set_value(&self, selector: &str, value: &str) -> bool {
        let Some(selector) = parse_selector(selector) else {
            return false;
        };
        let mut state = self.lock();
        match state.form.controls.iter_mut().find(|c| selector.matches(&c.view())) {
            Some(control) => {
                control.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Check or uncheck the first control matching `selector`. Checking a
    /// radio unchecks the other radios of its group.
    pub fn set_checked(&self, selector: &str, checked: bool) -> bool {
        let Some(selector) = parse_selector(selector) else {
            return false;
        };
        let mut state = self.lock();
        let Some(index) = state.form.controls.iter().position(|c| selector.matches(&c.view())) else {
            return false;
        };

        let control = &state.form.controls[index];
        let radio_group = (control.attrs.input_type.as_deref() == Some("radio") && checked)
            .then(|| control.attrs.name.clone())
            .flatten();

        if let Some(group) = radio_group {
            for other in state.form.controls.iter_mut() {
                if other.attrs.input_type.as_deref() == Some("radio")
                    && other.attrs.name.as_deref() == Some(group.as_str())
                {
                    other.checked = false;
                }
            }
        }

        state.form.controls[index].checked = checked;
        true
    }

    /// Snapshot of all controls in document order.
    pub fn controls(&self) -> Vec<ControlState> {
        self.lock().form.controls.iter().map(ControlFixture::state).collect()
    }
}

impl FormScope for StaticForm {
    fn query(&self, selector: &str) -> Option<ControlState> {
        let selector = parse_selector(selector)?;
        self.lock()
            .form
            .controls
            .iter()
            .find(|c| selector.matches(&c.view()))
            .map(ControlFixture::state)
    }

    fn query_checked(&self, selector: &str) -> Option<ControlState> {
        let selector = parse_selector(selector)?.checked();
        self.lock()
            .form
            .controls
            .iter()
            .find(|c| selector.matches(&c.view()))
            .map(ControlFixture::state)
    }

    fn reset(&self) {
        let mut state = self.lock();
        state.form.controls = state.initial.clone();
    }
}

/// Handle to a button inside a [`StaticForm`].
#[derive(Debug, Clone)]
pub struct StaticButton {
    state: Arc<Mutex<FormState>>,
    index: usize,
}

impl StaticButton {
    fn with<T>(&self, f: impl FnOnce(&mut ButtonFixture) -> T) -> T {
        let mut state = lock(&self.state);
        f(&mut state.form.buttons[self.index])
    }
}

impl SubmitButton for StaticButton {
    fn label(&self) -> String {
        self.with(|b| b.label.clone())
    }

    fn set_label(&self, label: &str) {
        self.with(|b| b.label = label.to_string())
    }

    fn is_disabled(&self) -> bool {
        self.with(|b| b.disabled)
    }

    fn set_disabled(&self, disabled: bool) {
        self.with(|b| b.disabled = disabled)
    }
}
