use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::field_model::FieldSpec;
use crate::dom::document::FormScope;
use crate::form::value::{FieldValue, extract_value};
use crate::locale::messages::Locale;

pub const SOURCE_PAGE_KEY: &str = "sourcePage";
pub const LOCALE_KEY: &str = "locale";
pub const PATH_KEY: &str = "path";
pub const CREATED_AT_KEY: &str = "createdAt";
pub const USER_AGENT_KEY: &str = "ua";

/// One value in a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Flag(bool),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl From<FieldValue> for PayloadValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => PayloadValue::Text(s),
            FieldValue::Flag(b) => PayloadValue::Flag(b),
        }
    }
}

/// Fixed metadata attached to every submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadMetadata {
    pub source_page: String,
    pub locale: Locale,
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub user_agent: String,
}

/// The record handed to the document store. Built per attempt and dropped
/// once the store call settles.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    entries: BTreeMap<String, PayloadValue>,
}

impl SubmissionPayload {
    pub fn insert(&mut self, key: impl Into<String>, value: PayloadValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(PayloadValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Build the payload: metadata first, then every field's current value.
///
/// A field named like a metadata key replaces that key.
pub fn assemble_payload(
    form: &impl FormScope,
    fields: &[FieldSpec],
    meta: PayloadMetadata,
) -> SubmissionPayload {
    let mut payload = SubmissionPayload::default();
    payload.insert(SOURCE_PAGE_KEY, PayloadValue::Text(meta.source_page));
    payload.insert(LOCALE_KEY, PayloadValue::Text(meta.locale.tag().to_string()));
    payload.insert(PATH_KEY, PayloadValue::Text(meta.path));
    payload.insert(CREATED_AT_KEY, PayloadValue::Timestamp(meta.created_at));
    payload.insert(USER_AGENT_KEY, PayloadValue::Text(meta.user_agent));

    for field in fields {
        payload.insert(field.name.clone(), extract_value(form, field).into());
    }

    payload
}
