use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::form::payload::SubmissionPayload;
use crate::store::document_store::{DocumentRef, DocumentStore, StoreError};

/// A document accepted by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub collection: String,
    pub payload: SubmissionPayload,
}

/// Keeps documents in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<Vec<StoredDocument>>,
    calls: Mutex<usize>,
    reject_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every document with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reject_with: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn documents(&self) -> Vec<StoredDocument> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `add` calls, accepted or not.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add(
        &self,
        collection: &str,
        payload: &SubmissionPayload,
    ) -> Result<DocumentRef, StoreError> {
        *self.calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        if let Some(message) = &self.reject_with {
            return Err(StoreError::Unavailable(message.clone()));
        }

        let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        let id = format!("doc-{:04}", documents.len() + 1);
        debug!(collection, id = %id, "stored document in memory");

        documents.push(StoredDocument {
            id: id.clone(),
            collection: collection.to_string(),
            payload: payload.clone(),
        });

        Ok(DocumentRef {
            path: Some(format!("{}/{}", collection, id)),
            id,
        })
    }
}
