use serde::{Deserialize, Serialize};

use crate::page::resolver::resolve_page_id;

/// What the engine knows about the page it is mounted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContext {
    /// Navigation path, e.g. `/jp-memory/index.html`.
    pub path: String,
    /// Document language tag (`<html lang>`), if any.
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub user_agent: String,
}

impl PageContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lang: None,
            user_agent: String::new(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn page_id(&self) -> &'static str {
        resolve_page_id(&self.path)
    }
}
