use async_trait::async_trait;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::form::payload::{PayloadValue, SubmissionPayload};
use crate::store::document_store::{DocumentRef, DocumentStore, StoreError};

pub const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";

/// The parts of a Firebase web app configuration the REST API needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirebaseSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub project_id: String,
    /// Override for the Firestore host, e.g. an emulator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedDocument {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Cloud Firestore over its REST API.
pub struct FirestoreStore {
    client: reqwest::Client,
    endpoint: String,
    settings: FirebaseSettings,
}

impl FirestoreStore {
    pub fn new(settings: FirebaseSettings) -> Result<Self, StoreError> {
        Self::with_client(reqwest::Client::new(), settings)
    }

    pub fn with_client(
        client: reqwest::Client,
        settings: FirebaseSettings,
    ) -> Result<Self, StoreError> {
        if settings.project_id.trim().is_empty() {
            return Err(StoreError::Unavailable(
                "firebase project_id is not configured".into(),
            ));
        }

        let endpoint = settings
            .endpoint
            .as_deref()
            .unwrap_or(DEFAULT_ENDPOINT)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            endpoint,
            settings,
        })
    }

    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.endpoint,
            urlencoding::encode(&self.settings.project_id),
            urlencoding::encode(collection)
        )
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn add(
        &self,
        collection: &str,
        payload: &SubmissionPayload,
    ) -> Result<DocumentRef, StoreError> {
        let url = self.collection_url(collection);
        debug!(collection, fields = payload.len(), "creating firestore document");

        let mut request = self.client.post(&url).json(&encode_document(payload));
        if !self.settings.api_key.is_empty() {
            request = request.query(&[("key", self.settings.api_key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => match err.error.status {
                    Some(code) => format!("{} {}", code, err.error.message),
                    None => err.error.message,
                },
                Err(_) if body.trim().is_empty() => {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                }
                Err(_) => body.trim().to_string(),
            };
            warn!(collection, status = status.as_u16(), %message, "firestore rejected document");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedDocument = serde_json::from_str(&body)
            .map_err(|e| StoreError::Decode(format!("{} (body: {})", e, body)))?;

        Ok(DocumentRef {
            id: document_id(&created.name).to_string(),
            path: Some(created.name),
        })
    }
}

/// Wrap a payload in Firestore's typed-value document format.
pub fn encode_document(payload: &SubmissionPayload) -> Value {
    let fields: Map<String, Value> = payload
        .iter()
        .map(|(key, value)| (key.to_string(), encode_value(value)))
        .collect();
    json!({ "fields": fields })
}

fn encode_value(value: &PayloadValue) -> Value {
    match value {
        PayloadValue::Text(s) => json!({ "stringValue": s }),
        PayloadValue::Flag(b) => json!({ "booleanValue": b }),
        PayloadValue::Timestamp(t) => {
            json!({ "timestampValue": t.to_rfc3339_opts(SecondsFormat::Millis, true) })
        }
    }
}

/// Last path segment of a document resource name.
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
