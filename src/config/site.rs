//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,

    // Languages
    pub default_language: String,
    pub languages: Vec<String>,

    // Directory
    pub content_dir: String,
    pub i18n_dir: String,

    // URL segment placed between the language prefix and the page slugs
    pub route: String,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),

            default_language: "en".to_string(),
            languages: vec![
                "en".to_string(),
                "fr".to_string(),
                "ko".to_string(),
                "zh".to_string(),
            ],

            content_dir: "content/docs".to_string(),
            i18n_dir: "languages".to_string(),

            route: "docs".to_string(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve a requested language against the configured ones.
    ///
    /// `None` selects the default language. Codes are compared lower-cased.
    pub fn resolve_language(&self, requested: Option<&str>) -> Result<String> {
        let lang = requested
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.default_language.to_lowercase());

        if self.languages.iter().any(|l| l.eq_ignore_ascii_case(&lang)) {
            Ok(lang)
        } else {
            bail!(
                "Unknown language: {}. Available: {}",
                lang,
                self.languages.join(", ")
            )
        }
    }
}

/// Settings for the `serve` command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}
