//! blogshelf: post catalog, facets and filter/sort pipeline for
//! multilingual documentation blogs
//!
//! Content pages are read from a directory tree (or a JSON dump of page
//! descriptors), normalized into posts, and served to a listing view through
//! a pure filter/sort pipeline.

pub mod blog;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod i18n;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use blog::Catalog;
use content::{ContentSource, DirSource, JsonSource, Post};
use i18n::I18n;

/// The main application
#[derive(Clone)]
pub struct Blogshelf {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory (one sub-directory per language)
    pub content_dir: PathBuf,
    /// Translation override directory
    pub i18n_dir: PathBuf,
    /// Page descriptor dump used instead of the content directory
    pub pages_file: Option<PathBuf>,
}

impl Blogshelf {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let i18n_dir = base_dir.join(&config.i18n_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            i18n_dir,
            pages_file: None,
        })
    }

    /// Read pages from a JSON dump instead of the content directory
    pub fn with_pages_file(mut self, pages_file: Option<PathBuf>) -> Self {
        self.pages_file = pages_file.map(|p| {
            if p.is_absolute() {
                p
            } else {
                self.base_dir.join(p)
            }
        });
        self
    }

    /// The content source pages are read from
    pub fn source(&self) -> Arc<dyn ContentSource> {
        match &self.pages_file {
            Some(path) => Arc::new(JsonSource::new(path)),
            None => Arc::new(DirSource::new(&self.content_dir, &self.config.route)),
        }
    }

    /// Validate a requested language, defaulting to the configured one
    pub fn resolve_lang(&self, lang: Option<&str>) -> Result<String> {
        self.config.resolve_language(lang)
    }

    /// Load the posts of one language, newest first
    pub fn load_posts(&self, lang: &str) -> Result<Vec<Post>> {
        Ok(self.load_catalog(lang)?.posts)
    }

    /// Load posts and facets of one language
    pub fn load_catalog(&self, lang: &str) -> Result<Catalog> {
        let pages = self.source().pages(lang)?;
        let catalog = Catalog::from_pages(&pages, lang);
        tracing::info!(
            "Loaded {} posts from {} pages ({})",
            catalog.posts.len(),
            pages.len(),
            lang
        );
        Ok(catalog)
    }

    /// Built-in translations merged with the site's language files
    pub fn i18n(&self) -> Result<I18n> {
        let mut i18n = I18n::new();
        i18n.load_languages(&self.i18n_dir)?;
        Ok(i18n)
    }
}
