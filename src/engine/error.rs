use crate::store::document_store::StoreError;

/// Failure to obtain the field configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to fetch {location}: {source}")]
    Request {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {location} returned HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{location} is not a valid field configuration: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// An element the configuration points at is not on the page.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("form not found: {selector}")]
    FormNotFound { selector: String },

    #[error("submit button not found: {selector}")]
    ButtonNotFound { selector: String },
}

/// Initialisation failed; the engine does not attach.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    #[error("no configuration for page '{0}'")]
    UnknownPage(String),

    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Outcome of a submit attempt that did not produce a document.
///
/// All of these leave the form usable; the user has already been notified
/// for `Validation` and `Persistence`.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    Busy,

    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("submission failed: {0}")]
    Persistence(#[from] StoreError),
}
