use std::sync::LazyLock;

use regex::Regex;

use crate::config::field_model::{FieldSpec, FieldType};
use crate::dom::document::FormScope;
use crate::form::value::{FieldValue, extract_value};
use crate::locale::messages::{Locale, Messages};

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot in the domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// A single rule violation, independent of how it is worded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Required { label: String },
    InvalidEmail { label: String },
    TooShort { label: String, min: usize },
    TooLong { label: String, max: usize, actual: usize },
}

impl ValidationIssue {
    pub fn label(&self) -> &str {
        match self {
            ValidationIssue::Required { label }
            | ValidationIssue::InvalidEmail { label }
            | ValidationIssue::TooShort { label, .. }
            | ValidationIssue::TooLong { label, .. } => label,
        }
    }

    /// Word the issue for the user.
    pub fn message(&self, locale: Locale) -> String {
        let messages = locale.messages();
        match self {
            ValidationIssue::Required { label } => messages.field_message(label, messages.required),
            ValidationIssue::InvalidEmail { label } => {
                messages.field_message(label, messages.invalid_email)
            }
            ValidationIssue::TooShort { label, min } => {
                let suffix = Messages::render(messages.too_short, &[("n", &min.to_string())]);
                messages.field_message(label, &suffix)
            }
            ValidationIssue::TooLong { label, max, actual } => {
                let suffix = Messages::render(
                    messages.too_long,
                    &[("max", &max.to_string()), ("len", &actual.to_string())],
                );
                messages.field_message(label, &suffix)
            }
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Check one field against its rules. Every violated rule is reported.
pub fn check_field(field: &FieldSpec, value: &FieldValue) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let label = || field.label.clone();

    if field.required && value.is_empty() {
        issues.push(ValidationIssue::Required { label: label() });
    }

    let text = match value.as_text() {
        Some(text) if !text.is_empty() => text,
        _ => return issues,
    };

    if field.field_type == FieldType::Email && !is_valid_email(text) {
        issues.push(ValidationIssue::InvalidEmail { label: label() });
    }

    let length = text.chars().count();
    if let Some(min) = field.min_length {
        if length < min {
            issues.push(ValidationIssue::TooShort { label: label(), min });
        }
    }
    if let Some(max) = field.max_length {
        if length > max {
            issues.push(ValidationIssue::TooLong {
                label: label(),
                max,
                actual: length,
            });
        }
    }

    issues
}

/// Validate every field of a form, in configuration order.
pub fn validate_issues(form: &impl FormScope, fields: &[FieldSpec]) -> Vec<ValidationIssue> {
    fields
        .iter()
        .flat_map(|field| check_field(field, &extract_value(form, field)))
        .collect()
}

/// Validate a form and word the result for the user. Empty means valid.
pub fn validate(form: &impl FormScope, fields: &[FieldSpec], locale: Locale) -> Vec<String> {
    validate_issues(form, fields)
        .iter()
        .map(|issue| issue.message(locale))
        .collect()
}
