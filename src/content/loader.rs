//! Content sources - materialize page descriptors for a language

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{PageData, PageDescriptor};
use crate::helpers::page_url;

/// Errors raised while reading content
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid page dump {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies the content pages of one language
pub trait ContentSource: Send + Sync {
    fn pages(&self, lang: &str) -> Result<Vec<PageDescriptor>, SourceError>;
}

/// Reads `<root>/<lang>/**/*.md(x)` files with YAML front-matter
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    route: String,
}

impl DirSource {
    /// Create a source over `root`, publishing pages under `/<lang>/<route>/`
    pub fn new<P: AsRef<Path>>(root: P, route: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            route: route.trim_matches('/').to_string(),
        }
    }

    /// Load a single page from a file
    fn load_page(
        &self,
        lang: &str,
        lang_dir: &Path,
        path: &Path,
    ) -> Result<PageDescriptor, SourceError> {
        let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (data, _body) = PageData::parse(&content);

        let slugs = slugs_for(path.strip_prefix(lang_dir).unwrap_or(path));
        let url = page_url(lang, &self.route, &slugs);

        Ok(PageDescriptor::new(url, slugs, data))
    }
}

impl ContentSource for DirSource {
    fn pages(&self, lang: &str) -> Result<Vec<PageDescriptor>, SourceError> {
        let lang_dir = self.root.join(lang);
        if !lang_dir.exists() {
            tracing::debug!("No content directory for {}: {:?}", lang, lang_dir);
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(&lang_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && is_content_file(path) {
                match self.load_page(lang, &lang_dir, path) {
                    Ok(page) => {
                        tracing::debug!("Loaded page {}", page.url);
                        pages.push(page);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }
}

/// Page descriptors read from a JSON dump
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageDump {
    List(Vec<PageDescriptor>),
    ByLanguage(HashMap<String, Vec<PageDescriptor>>),
}

impl JsonSource {
    /// The file holds either an array of descriptors (used for every
    /// language) or an object keyed by language
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for JsonSource {
    fn pages(&self, lang: &str) -> Result<Vec<PageDescriptor>, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let dump: PageDump = serde_json::from_str(&content).map_err(|source| SourceError::Json {
            path: self.path.clone(),
            source,
        })?;

        Ok(match dump {
            PageDump::List(pages) => pages,
            PageDump::ByLanguage(mut by_lang) => by_lang.remove(lang).unwrap_or_default(),
        })
    }
}

/// Check if a file is a content document
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "mdx" | "markdown"))
        .unwrap_or(false)
}

/// Relative path segments with the extension removed from the last one
fn slugs_for(relative: &Path) -> Vec<String> {
    let mut slugs: Vec<String> = relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(str::to_string)
        .collect();

    if let Some(last) = slugs.last_mut() {
        if let Some((stem, _ext)) = last.rsplit_once('.') {
            *last = stem.to_string();
        }
    }

    slugs
}
