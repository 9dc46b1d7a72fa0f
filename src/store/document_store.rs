use async_trait::async_trait;

use crate::form::payload::SubmissionPayload;

/// Handle to a document the store accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: String,
    /// Full resource path, when the backend reports one.
    pub path: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store rejected the document ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected store response: {0}")]
    Decode(String),

    #[error("{0}")]
    Unavailable(String),
}

/// A schema-less backend that accepts key-value documents.
///
/// One call is one attempt: implementations must not retry on their own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn add(
        &self,
        collection: &str,
        payload: &SubmissionPayload,
    ) -> Result<DocumentRef, StoreError>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for std::sync::Arc<S> {
    async fn add(
        &self,
        collection: &str,
        payload: &SubmissionPayload,
    ) -> Result<DocumentRef, StoreError> {
        (**self).add(collection, payload).await
    }
}
