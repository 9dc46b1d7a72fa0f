use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::firestore::FirebaseSettings;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "memory-forms",
    version,
    about = "Validate and submit visitor-memory forms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: memory-forms.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a field configuration file for problems
    Check {
        /// Path to fields-config.json
        #[arg(long)]
        fields: String,
    },

    /// Print the page identifier for a navigation path
    Resolve {
        /// Navigation path, e.g. /jp-memory/index.html
        #[arg(long)]
        path: String,
    },

    /// Load a page fixture, attach the form engine and submit once
    Submit {
        /// Page fixture (YAML or JSON)
        #[arg(long)]
        page: String,

        /// Field configuration: local file or URL (default: site.base_url + well-known path)
        #[arg(long)]
        fields: Option<String>,

        /// Keep the document in memory instead of sending it to Firestore
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `memory-forms.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub firebase: FirebaseSettings,
    /// Feedback language, overriding the page's own.
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("memory-forms/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("memory-forms.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}
