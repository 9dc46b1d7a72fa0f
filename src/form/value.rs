use serde::Serialize;

use crate::config::field_model::{FieldSpec, FieldType, ValueFrom};
use crate::dom::document::{ControlState, FormScope};

/// The current value of one configured field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Empty text and an unchecked box both count as "not filled in".
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(b) => !b,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }
}

/// Read a field's value from the form. Missing elements give an empty value,
/// never an error.
pub fn extract_value(form: &impl FormScope, field: &FieldSpec) -> FieldValue {
    match field.field_type {
        FieldType::Radio => {
            let value = form
                .query_checked(&field.selector)
                .map(|option| radio_value(option, field.value_from))
                .unwrap_or_default();
            FieldValue::Text(value)
        }
        FieldType::Checkbox => {
            let checked = form.query(&field.selector).is_some_and(|el| el.checked);
            FieldValue::Flag(checked)
        }
        FieldType::Text | FieldType::Email | FieldType::Textarea => {
            let value = form
                .query(&field.selector)
                .map(|el| trim_input(&el.value).to_string())
                .unwrap_or_default();
            FieldValue::Text(value)
        }
    }
}

/// Strip surrounding whitespace, including a stray byte-order mark.
fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn radio_value(option: ControlState, value_from: Option<ValueFrom>) -> String {
    let id = option.id.filter(|id| !id.is_empty());
    let value = Some(option.value).filter(|v| !v.is_empty());

    match value_from {
        Some(ValueFrom::CheckedId) => id.or(value),
        Some(ValueFrom::Checked) | None => value.or(id),
    }
    .unwrap_or_default()
}
