use std::sync::Arc;

use crate::cli::config::AppConfig;
use crate::config::field_model::RootConfig;
use crate::config::lint::lint;
use crate::config::loader::{ConfigLoader, ConfigSource, FileConfigSource, HttpConfigSource};
use crate::dom::static_form::StaticDocument;
use crate::engine::controller::FormEngine;
use crate::engine::feedback::ConsoleNotifier;
use crate::page::resolver::resolve_page_id;
use crate::store::document_store::DocumentStore;
use crate::store::firestore::FirestoreStore;
use crate::store::memory::MemoryStore;

// ============================================================================
// check subcommand
// ============================================================================

/// Parse and lint a field configuration. Returns whether it is clean.
pub fn cmd_check(fields_path: &str, verbose: u8) -> Result<bool, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(fields_path)?;
    let config = RootConfig::from_json(&content)?;

    println!(
        "{}: {} pages, collection '{}'",
        fields_path,
        config.pages.len(),
        config.collection()
    );

    if verbose > 0 {
        for (page, page_config) in &config.pages {
            println!(
                "  [{}] form {} ({} fields)",
                page,
                page_config.form_selector,
                page_config.fields.len()
            );
        }
    }

    let issues = lint(&config);
    for issue in &issues {
        println!("  - {}", issue);
    }

    if issues.is_empty() {
        println!("No problems found.");
    }

    Ok(issues.is_empty())
}

// ============================================================================
// resolve subcommand
// ============================================================================

pub fn cmd_resolve(path: &str) -> &'static str {
    resolve_page_id(path)
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Attach the engine to a page fixture and click submit once.
/// Returns whether a document was stored.
pub async fn cmd_submit(
    page_path: &str,
    fields: Option<&str>,
    dry_run: bool,
    config: &AppConfig,
) -> Result<bool, Box<dyn std::error::Error>> {
    let document = StaticDocument::load(page_path)?;

    let mut context = document.context().clone();
    if let Some(locale) = &config.locale {
        context.lang = Some(locale.clone());
    }
    if context.user_agent.is_empty() {
        context.user_agent = config.site.user_agent.clone();
    }

    let loader = ConfigLoader::new(build_source(fields, config)?);

    let memory = Arc::new(MemoryStore::new());
    let store: Arc<dyn DocumentStore> = if dry_run {
        memory.clone()
    } else {
        Arc::new(FirestoreStore::new(config.firebase.clone())?)
    };

    let mut engine = FormEngine::attach(&loader, &document, context, store, ConsoleNotifier).await?;

    match engine.submit().await {
        Ok(doc) => {
            println!("Stored document {} in '{}'", doc.id, engine.collection());
            if dry_run {
                for stored in memory.documents() {
                    println!("{}", serde_json::to_string_pretty(&stored.payload)?);
                }
            }
            Ok(true)
        }
        Err(e) => {
            eprintln!("Submission did not complete: {}", e);
            Ok(false)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick where the field configuration comes from: an explicit file or URL,
/// otherwise the well-known path on the configured site.
pub fn build_source(
    fields: Option<&str>,
    config: &AppConfig,
) -> Result<Box<dyn ConfigSource>, Box<dyn std::error::Error>> {
    match (fields, config.site.base_url.as_deref()) {
        (Some(f), _) if f.starts_with("http://") || f.starts_with("https://") => {
            Ok(Box::new(HttpConfigSource::new(f)))
        }
        (Some(f), _) => Ok(Box::new(FileConfigSource::new(f))),
        (None, Some(base_url)) => Ok(Box::new(HttpConfigSource::for_site(base_url))),
        (None, None) => Err("no field configuration: pass --fields or set site.base_url".into()),
    }
}
