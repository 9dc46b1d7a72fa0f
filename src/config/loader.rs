use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::field_model::RootConfig;
use crate::engine::error::ConfigLoadError;

/// Where the site serves its field configuration.
pub const CONFIG_PATH: &str = "/assets/js/fields-config.json";

// ============================================================================
// ConfigSource trait: where the raw configuration text comes from
// ============================================================================

#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Read the raw configuration document.
    async fn fetch(&self) -> Result<String, ConfigLoadError>;

    /// Human-readable location, used in errors and logs.
    fn location(&self) -> String;
}

/// Fetches the configuration over HTTP, always revalidating.
pub struct HttpConfigSource {
    client: reqwest::Client,
    url: String,
}

impl HttpConfigSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Source for the well-known configuration path under a site base URL.
    pub fn for_site(base_url: &str) -> Self {
        Self::new(format!("{}{}", base_url.trim_end_matches('/'), CONFIG_PATH))
    }
}

#[async_trait]
impl ConfigSource for HttpConfigSource {
    async fn fetch(&self) -> Result<String, ConfigLoadError> {
        let response = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|source| ConfigLoadError::Request {
                location: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigLoadError::Status {
                location: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ConfigLoadError::Request {
            location: self.url.clone(),
            source,
        })
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Reads the configuration from a local file.
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn fetch(&self) -> Result<String, ConfigLoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigLoadError::Io {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// ConfigLoader: parse once, serve the cached copy afterwards
// ============================================================================

/// Loads a `RootConfig` from a source and keeps it for the loader's lifetime.
///
/// Only a successful load is cached; after a failure the next call fetches again.
pub struct ConfigLoader<S> {
    source: S,
    cached: OnceCell<Arc<RootConfig>>,
}

impl<S: ConfigSource> ConfigLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cached: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<Arc<RootConfig>, ConfigLoadError> {
        self.cached
            .get_or_try_init(|| async {
                let location = self.source.location();
                debug!(location = %location, "fetching field configuration");

                let body = self.source.fetch().await?;
                let config = RootConfig::from_json(&body)
                    .map_err(|source| ConfigLoadError::Parse {
                        location: location.clone(),
                        source,
                    })?;

                info!(location = %location, pages = config.pages.len(), "field configuration loaded");
                Ok::<_, ConfigLoadError>(Arc::new(config))
            })
            .await
            .cloned()
    }

    /// The cached configuration, if a load has already succeeded.
    pub fn cached(&self) -> Option<Arc<RootConfig>> {
        self.cached.get().cloned()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    async fn fetch(&self) -> Result<String, ConfigLoadError> {
        (**self).fetch().await
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
