use std::collections::HashSet;
use std::fmt;

use crate::config::field_model::{FieldType, RootConfig};

/// A problem found in a field configuration. Submissions still run against
/// such a configuration; these are reported by `memory-forms check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    /// Two fields share a payload key; the later value would overwrite the earlier one.
    DuplicateName { page: String, name: String },

    /// `minLength` is greater than `maxLength`, so no non-empty value can pass.
    ImpossibleLength { page: String, field: String, min: usize, max: usize },

    /// `valueFrom` is only read for radio fields.
    IgnoredValueFrom { page: String, field: String },

    /// Length bounds are only checked on string fields.
    IgnoredLength { page: String, field: String },

    EmptySelector { page: String, field: String },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::DuplicateName { page, name } => {
                write!(f, "[{}] field name '{}' is used more than once", page, name)
            }
            ConfigIssue::ImpossibleLength { page, field, min, max } => {
                write!(f, "[{}] field '{}' has minLength {} > maxLength {}", page, field, min, max)
            }
            ConfigIssue::IgnoredValueFrom { page, field } => {
                write!(f, "[{}] field '{}' sets valueFrom but is not a radio field", page, field)
            }
            ConfigIssue::IgnoredLength { page, field } => {
                write!(f, "[{}] field '{}' sets length bounds on a checkbox", page, field)
            }
            ConfigIssue::EmptySelector { page, field } => {
                write!(f, "[{}] field '{}' has an empty selector", page, field)
            }
        }
    }
}

/// Check every page of a configuration for problems the engine does not
/// detect at submit time.
pub fn lint(config: &RootConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for (page, page_config) in &config.pages {
        let mut seen = HashSet::new();

        for field in &page_config.fields {
            if !seen.insert(field.name.as_str()) {
                issues.push(ConfigIssue::DuplicateName {
                    page: page.clone(),
                    name: field.name.clone(),
                });
            }

            if field.selector.trim().is_empty() {
                issues.push(ConfigIssue::EmptySelector {
                    page: page.clone(),
                    field: field.name.clone(),
                });
            }

            if let (Some(min), Some(max)) = (field.min_length, field.max_length) {
                if min > max {
                    issues.push(ConfigIssue::ImpossibleLength {
                        page: page.clone(),
                        field: field.name.clone(),
                        min,
                        max,
                    });
                }
            }

            if field.value_from.is_some() && field.field_type != FieldType::Radio {
                issues.push(ConfigIssue::IgnoredValueFrom {
                    page: page.clone(),
                    field: field.name.clone(),
                });
            }

            if field.field_type == FieldType::Checkbox
                && (field.min_length.is_some() || field.max_length.is_some())
            {
                issues.push(ConfigIssue::IgnoredLength {
                    page: page.clone(),
                    field: field.name.clone(),
                });
            }
        }
    }

    issues
}
