use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Collection used when the configuration does not name one.
pub const DEFAULT_COLLECTION: &str = "submissions";

// ============================================================================
// Field configuration, deserialized from fields-config.json
// ============================================================================

/// Kind of input a field is bound to. Drives both extraction and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Radio,
    Checkbox,
    Textarea,
}

/// Which attribute of a checked radio option becomes the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFrom {
    /// The option's `value`, falling back to its id.
    Checked,
    /// The option's id, falling back to its `value`.
    CheckedId,
}

/// Declarative description of one form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Payload key. Expected to be unique within a page.
    pub name: String,
    /// Display name used in validation messages.
    pub label: String,
    /// Selector scoped to the bound form.
    pub selector: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFrom>,
}

/// Form binding and ordered field list for one logical page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub form_selector: String,
    pub submit_button_selector: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Site-wide default language tag, e.g. "zh-TW".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// The whole configuration document: page identifiers at the top level,
/// next to an optional `meta` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaConfig>,
    #[serde(flatten)]
    pub pages: BTreeMap<String, PageConfig>,
}

impl RootConfig {
    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn page(&self, page_id: &str) -> Option<&PageConfig> {
        self.pages.get(page_id)
    }

    /// Target collection, `"submissions"` unless `meta.collection` is set.
    pub fn collection(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|m| m.collection.as_deref())
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLLECTION)
    }

    pub fn default_locale(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.locale.as_deref())
    }
}
