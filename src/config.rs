//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Where the catalog is written when no output path is given
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Categories listed ahead of the alphabetical rest
    #[serde(default = "default_category_priority")]
    pub category_priority: Vec<String>,
}

fn default_output_path() -> PathBuf { PathBuf::from("public/channels.json") }
fn default_true() -> bool { true }
fn default_category_priority() -> Vec<String> {
    ["News", "Sports", "Entertainment", "Music", "Documentary", "Kids"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            pretty: true,
            category_priority: default_category_priority(),
        }
    }
}

impl CatalogConfig {
    pub fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("m3u_catalog");
        path.push("config.json");
        path
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Missing or unreadable files fall back to defaults
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "ignoring invalid config"
                        )
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read config")
                }
            }
        }

        Self::default()
    }
}
