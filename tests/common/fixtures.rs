#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use memory_forms::{
    config::field_model::RootConfig,
    dom::{
        document::{Document, SubmitButton},
        static_form::{StaticButton, StaticDocument, StaticForm},
    },
    engine::feedback::Notifier,
    form::payload::SubmissionPayload,
    store::document_store::{DocumentRef, DocumentStore, StoreError},
};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should be readable")
}

pub fn root_config() -> RootConfig {
    RootConfig::from_json(&fixture_text("fields-config.json")).expect("fixture config should parse")
}

pub fn page(name: &str) -> StaticDocument {
    StaticDocument::load(fixture_path(name)).expect("fixture page should load")
}

/// The form and submit button a page config points at.
pub fn bound(document: &StaticDocument, form: &str, button: &str) -> (StaticForm, StaticButton) {
    let form = document.form(form).expect("form should exist");
    let button = document
        .submit_button(&form, button)
        .expect("button should exist");
    (form, button)
}

/// Collects every message shown to the user.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// What the submit control looked like while the store call was running.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSnapshot {
    pub disabled: bool,
    pub label: String,
}

/// A store that records the button state at call time, then succeeds or fails.
pub struct ObservingStore {
    button: StaticButton,
    fail_with: Option<String>,
    pub seen: Mutex<Vec<ButtonSnapshot>>,
    pub payloads: Mutex<Vec<(String, SubmissionPayload)>>,
}

impl ObservingStore {
    pub fn new(button: StaticButton) -> Arc<Self> {
        Arc::new(Self {
            button,
            fail_with: None,
            seen: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(button: StaticButton, message: &str) -> Arc<Self> {
        Arc::new(Self {
            button,
            fail_with: Some(message.to_string()),
            seen: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for ObservingStore {
    async fn add(
        &self,
        collection: &str,
        payload: &SubmissionPayload,
    ) -> Result<DocumentRef, StoreError> {
        self.seen.lock().unwrap().push(ButtonSnapshot {
            disabled: self.button.is_disabled(),
            label: self.button.label(),
        });
        self.payloads
            .lock()
            .unwrap()
            .push((collection.to_string(), payload.clone()));

        match &self.fail_with {
            Some(message) => Err(StoreError::Rejected {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(DocumentRef {
                id: "abc123".into(),
                path: None,
            }),
        }
    }
}
